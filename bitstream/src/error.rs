//! Error types for bitstream operations.

use std::fmt;

/// Result type for bitstream operations.
pub type BitResult<T> = Result<T, BitError>;

/// Errors that can occur while reading packed data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitError {
    /// Attempted to read a byte at or past the end of the buffer.
    BufferExhausted {
        /// Byte offset of the failed read.
        offset: usize,
        /// Length of the underlying buffer.
        len: usize,
    },
}

impl BitError {
    /// Returns the byte offset at which the read failed.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::BufferExhausted { offset, .. } => *offset,
        }
    }
}

impl fmt::Display for BitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferExhausted { offset, len } => {
                write!(
                    f,
                    "buffer exhausted: attempted to read byte {offset} of a {len}-byte buffer"
                )
            }
        }
    }
}

impl std::error::Error for BitError {}
