//! Decoder for the level maps packed into the `pusher.exe` data segment.
//!
//! Each map is stored as a two-byte prolog (grid size), a run-length and
//! prefix-coded bitstream of cells, and a two-byte epilog (player position).
//! An offset table in the same segment locates every map.
//!
//! # Features
//!
//! - Bit-exact decoding of the cell stream ([`SymbolDecoder`])
//! - Offset table lookup ([`OffsetResolver`])
//! - Validated, immutable [`Map`] records with canonical text rendering
//! - Batch decoding with per-map error reporting ([`decode_all`])
//!
//! # Design Principles
//!
//! - **Per-map state** - Decoder state is created for each map and never shared.
//! - **Reject, don't repair** - A malformed map is an error, never a partial grid.
//! - **Read-only input** - The blob is borrowed immutably and may be shared across threads.
//!
//! # Example
//!
//! ```
//! use maps::{decode_map, BlobLayout};
//!
//! let layout = BlobLayout::for_testing();
//! let mut blob = vec![0u8; layout.blob_len];
//! // Table entry 0 points at the start of the data area (already zero).
//! // 1x1 map: counter `0`, cell `00` (empty), player at (0, 0).
//! let base = layout.data_base();
//! blob[base..base + 5].copy_from_slice(&[1, 1, 0b0000_0000, 0, 0]);
//!
//! let map = decode_map(&blob, &layout, 0).unwrap();
//! assert_eq!(map.to_string(), "@");
//! ```

mod assembler;
mod cell;
mod error;
mod layout;
mod map;
mod offset;
mod symbol;

// Lets the shared test helpers name this crate as `maps` in unit tests too.
#[cfg(test)]
extern crate self as maps;

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
mod testutil;

pub use assembler::{decode_all, decode_map, decode_maps, DecodeAll};
pub use cell::{Cell, PLAYER_CHAR};
pub use error::{MapError, MapErrorKind, MapResult};
pub use layout::{BlobLayout, PUSHER_EXE_LEN};
pub use map::{grid_fits, BarrelBalance, Map, Position, StreamSpan, MAX_SIZE_X, MAX_SIZE_Y};
pub use offset::OffsetResolver;
pub use symbol::{read_cell_code, read_run_length, RunToken, SymbolDecoder};
