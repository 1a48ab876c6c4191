//! Error types for map decoding.

use std::fmt;

use bitstream::BitError;

use crate::cell::Cell;

/// Result type for map decoding.
pub type MapResult<T> = Result<T, MapError>;

/// A failure to decode one map.
///
/// Every failure is fatal for that map; no partial map is ever returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapError {
    /// Index of the map being decoded.
    pub map_index: usize,
    /// Absolute byte offset where the problem was detected.
    pub offset: usize,
    /// What went wrong.
    pub kind: MapErrorKind,
}

/// The specific reason a map was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MapErrorKind {
    /// A read ran past the end of the buffer.
    BufferExhausted {
        /// Length of the buffer.
        len: usize,
    },

    /// The map index is not in the offset table.
    IndexOutOfRange {
        /// Number of maps the table holds.
        map_count: usize,
    },

    /// The prolog declares an empty or oversized grid.
    InvalidDimensions {
        /// Declared width.
        size_x: u8,
        /// Declared height.
        size_y: u8,
    },

    /// The epilog places the player outside the grid or the screen.
    InvalidPlayerPosition {
        /// Player column.
        x: u8,
        /// Player row.
        y: u8,
        /// Grid width.
        size_x: u8,
        /// Grid height.
        size_y: u8,
    },

    /// The player would stand on a non-empty cell.
    InvalidPlayerPlacement {
        /// Player column.
        x: u8,
        /// Player row.
        y: u8,
        /// Cell found under the player.
        found: Cell,
    },
}

impl MapError {
    /// Creates a new error.
    #[must_use]
    pub const fn new(map_index: usize, offset: usize, kind: MapErrorKind) -> Self {
        Self {
            map_index,
            offset,
            kind,
        }
    }

    /// Lifts a bitstream error for map `map_index`, keeping its byte offset.
    #[must_use]
    pub const fn bitstream(map_index: usize, err: BitError) -> Self {
        match err {
            BitError::BufferExhausted { offset, len } => {
                Self::new(map_index, offset, MapErrorKind::BufferExhausted { len })
            }
        }
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "map {} at offset 0x{:04X}: {}",
            self.map_index, self.offset, self.kind
        )
    }
}

impl fmt::Display for MapErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferExhausted { len } => {
                write!(f, "buffer exhausted ({len} bytes)")
            }
            Self::IndexOutOfRange { map_count } => {
                write!(f, "map index out of range, table holds {map_count} maps")
            }
            Self::InvalidDimensions { size_x, size_y } => {
                write!(f, "invalid dimensions {size_x}x{size_y}")
            }
            Self::InvalidPlayerPosition {
                x,
                y,
                size_x,
                size_y,
            } => {
                write!(
                    f,
                    "player position ({x}, {y}) outside {size_x}x{size_y} grid"
                )
            }
            Self::InvalidPlayerPlacement { x, y, found } => {
                write!(f, "player at ({x}, {y}) placed on {found}")
            }
        }
    }
}

impl std::error::Error for MapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = MapError::new(
            7,
            0x1A2B,
            MapErrorKind::InvalidDimensions {
                size_x: 41,
                size_y: 3,
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("map 7"), "should mention the map index");
        assert!(msg.contains("0x1A2B"), "should mention the offset");
        assert!(msg.contains("41x3"), "should mention the dimensions");
    }

    #[test]
    fn display_placement() {
        let err = MapError::new(
            0,
            0,
            MapErrorKind::InvalidPlayerPlacement {
                x: 2,
                y: 1,
                found: Cell::Barrel,
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("(2, 1)"));
        assert!(msg.contains("barrel"));
    }

    #[test]
    fn lift_buffer_exhausted_keeps_offset() {
        let err = MapError::bitstream(3, BitError::BufferExhausted { offset: 12, len: 12 });
        assert_eq!(err.map_index, 3);
        assert_eq!(err.offset, 12);
        assert_eq!(err.kind, MapErrorKind::BufferExhausted { len: 12 });
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<MapError>();
    }
}
