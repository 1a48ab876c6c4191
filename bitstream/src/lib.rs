//! MSB-first bit reading for packed legacy map data.
//!
//! This crate provides [`BitReader`], a bounds-checked reader that pulls single
//! bits (most significant first) and whole bytes out of a fully resident byte
//! buffer. It knows nothing about maps or cells.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked.
//! - **Explicit errors** - Short input returns [`BitError::BufferExhausted`], never a panic.
//!
//! # Example
//!
//! ```
//! use bitstream::BitReader;
//!
//! let bytes = [0b1011_0000, 0x2A];
//! let mut reader = BitReader::new(&bytes);
//! assert!(reader.read_bit().unwrap());
//! assert!(!reader.read_bit().unwrap());
//! // Byte reads continue after the last byte the bit cursor touched.
//! assert_eq!(reader.read_u8().unwrap(), 0x2A);
//! ```

mod error;
mod reader;

pub use error::{BitError, BitResult};
pub use reader::BitReader;
