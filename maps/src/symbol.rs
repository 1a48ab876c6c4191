//! Run-length and prefix-code decoding of the cell stream.
//!
//! Each token in the stream is a run counter followed by a cell code:
//!
//! ```text
//! counter  0            run of 1
//!          1 D3 D2 D1   run of 2 + 4*D3 + 2*D2 + D1 (2..=9)
//! cell     0 0          empty
//!          0 1          wall
//!          1 0          barrel
//!          1 1 0        barrel slot
//!          1 1 1        placed barrel
//! ```

use bitstream::{BitReader, BitResult};

use crate::cell::Cell;

/// One decoded `(count, cell)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken {
    count: u8,
    cell: Cell,
}

impl RunToken {
    /// Shortest run a token can encode.
    pub const MIN_RUN: u8 = 1;

    /// Longest run a token can encode.
    pub const MAX_RUN: u8 = 9;

    /// Returns the number of consecutive cells this token covers (1..=9).
    #[must_use]
    pub const fn count(self) -> u8 {
        self.count
    }

    /// Returns the repeated cell.
    #[must_use]
    pub const fn cell(self) -> Cell {
        self.cell
    }

    /// Reads one complete token from `reader`.
    pub fn read(reader: &mut BitReader<'_>) -> BitResult<Self> {
        let count = read_run_length(reader)?;
        let cell = read_cell_code(reader)?;
        Ok(Self { count, cell })
    }
}

/// Reads a run counter: `0` or `1 D3 D2 D1`.
pub fn read_run_length(reader: &mut BitReader<'_>) -> BitResult<u8> {
    if !reader.read_bit()? {
        return Ok(RunToken::MIN_RUN);
    }
    let mut extra = 0u8;
    for _ in 0..3 {
        extra = (extra << 1) | u8::from(reader.read_bit()?);
    }
    Ok(2 + extra)
}

/// Reads a cell prefix code.
///
/// The code is complete and prefix-free, so every bit sequence resolves to a
/// cell after two or three bits.
pub fn read_cell_code(reader: &mut BitReader<'_>) -> BitResult<Cell> {
    let cell = match (reader.read_bit()?, reader.read_bit()?) {
        (false, false) => Cell::Empty,
        (false, true) => Cell::Wall,
        (true, false) => Cell::Barrel,
        (true, true) => {
            if reader.read_bit()? {
                Cell::BarrelPlaced
            } else {
                Cell::BarrelSlot
            }
        }
    };
    Ok(cell)
}

/// Expands the token stream of one map into individual cells.
///
/// All state (bit cursor, pending repeats, cached cell) lives in the decoder,
/// so a new decoder must be created for every map.
#[derive(Debug, Clone)]
pub struct SymbolDecoder<'a> {
    reader: BitReader<'a>,
    /// Cells of the current run still to be returned.
    pending: u8,
    /// Cell of the current run.
    current: Option<Cell>,
    /// Number of `next_cell` calls that succeeded.
    decoded: usize,
}

impl<'a> SymbolDecoder<'a> {
    /// Creates a decoder that reads tokens from `reader`.
    #[must_use]
    pub const fn new(reader: BitReader<'a>) -> Self {
        Self {
            reader,
            pending: 0,
            current: None,
            decoded: 0,
        }
    }

    /// Returns the next cell, reading a fresh token only when the current run is spent.
    pub fn next_cell(&mut self) -> BitResult<Cell> {
        let cell = match self.current.filter(|_| self.pending > 0) {
            Some(cell) => {
                self.pending -= 1;
                cell
            }
            None => {
                let token = RunToken::read(&mut self.reader)?;
                self.pending = token.count() - 1;
                self.current = Some(token.cell());
                token.cell()
            }
        };
        self.decoded += 1;
        Ok(cell)
    }

    /// Returns the number of cells produced so far.
    #[must_use]
    pub const fn cells_decoded(&self) -> usize {
        self.decoded
    }

    /// Returns the number of repeats left in the current run.
    #[must_use]
    pub const fn pending_repeats(&self) -> u8 {
        self.pending
    }

    /// Returns the offset of the next byte the underlying reader will load.
    #[must_use]
    pub const fn byte_position(&self) -> usize {
        self.reader.byte_position()
    }

    /// Consumes the decoder, returning the underlying reader.
    #[must_use]
    pub fn into_reader(self) -> BitReader<'a> {
        self.reader
    }
}
