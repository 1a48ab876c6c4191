//! Bit-level reader with bounded operations.

use crate::error::{BitError, BitResult};

/// A bit-level reader over packed legacy data.
///
/// Bits are extracted most-significant first. A byte is loaded from the
/// buffer the first time one of its bits is needed, so the byte cursor always
/// points just past the last byte the bit cursor touched. Byte reads happen
/// at that cursor and drop any bits still pending in the loaded byte.
///
/// All reads are bounds-checked; the reader never panics on short input.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Offset of the next byte to load.
    offset: usize,
    /// The most recently loaded byte.
    current: u8,
    /// Bits of `current` not yet consumed (0-8).
    pending: u8,
}

impl<'a> BitReader<'a> {
    /// Creates a new `BitReader` positioned at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self::at(data, 0)
    }

    /// Creates a new `BitReader` positioned at byte `offset`.
    ///
    /// The offset is not validated here; the first read past the end fails.
    #[must_use]
    pub const fn at(data: &'a [u8], offset: usize) -> Self {
        Self {
            data,
            offset,
            current: 0,
            pending: 0,
        }
    }

    /// Returns the offset of the next byte the reader will load.
    #[must_use]
    pub const fn byte_position(&self) -> usize {
        self.offset
    }

    /// Returns the number of unread bits left in the current byte.
    #[must_use]
    pub const fn pending_bits(&self) -> u8 {
        self.pending
    }

    /// Returns the number of bits remaining to read.
    #[must_use]
    pub const fn bits_remaining(&self) -> usize {
        self.data
            .len()
            .saturating_sub(self.offset)
            .saturating_mul(8)
            .saturating_add(self.pending as usize)
    }

    /// Returns `true` if there are no more bits to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits_remaining() == 0
    }

    /// Reads the next bit.
    pub fn read_bit(&mut self) -> BitResult<bool> {
        if self.pending == 0 {
            self.current = self.load()?;
            self.pending = 8;
        }
        self.pending -= 1;
        Ok((self.current >> self.pending) & 1 == 1)
    }

    /// Reads the byte at the byte cursor, discarding pending bits.
    pub fn read_u8(&mut self) -> BitResult<u8> {
        self.pending = 0;
        self.load()
    }

    /// Reads a little-endian `u16` at the byte cursor, discarding pending bits.
    pub fn read_u16_le(&mut self) -> BitResult<u16> {
        let lo = self.read_u8()?;
        let hi = self.read_u8()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    fn load(&mut self) -> BitResult<u8> {
        let byte = self
            .data
            .get(self.offset)
            .copied()
            .ok_or(BitError::BufferExhausted {
                offset: self.offset,
                len: self.data.len(),
            })?;
        self.offset += 1;
        Ok(byte)
    }
}
