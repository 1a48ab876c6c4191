//! Map offset table lookup.

use bitstream::BitReader;

use crate::error::{MapError, MapErrorKind, MapResult};
use crate::layout::BlobLayout;

/// Resolves map indices to the absolute offset of their packed data.
#[derive(Debug, Clone, Copy)]
pub struct OffsetResolver<'a> {
    data: &'a [u8],
    layout: &'a BlobLayout,
}

impl<'a> OffsetResolver<'a> {
    /// Creates a resolver over `data` using `layout`.
    #[must_use]
    pub const fn new(data: &'a [u8], layout: &'a BlobLayout) -> Self {
        Self { data, layout }
    }

    /// Returns the absolute offset of the offset table entry for `map_index`.
    #[must_use]
    pub const fn entry_offset(&self, map_index: usize) -> usize {
        self.layout
            .table_base()
            .saturating_add(map_index.saturating_mul(2))
    }

    /// Reads the raw table entry for `map_index`, relative to the data base.
    pub fn table_entry(&self, map_index: usize) -> MapResult<u16> {
        let entry = self.entry_offset(map_index);
        if map_index >= self.layout.map_count {
            return Err(MapError::new(
                map_index,
                entry,
                MapErrorKind::IndexOutOfRange {
                    map_count: self.layout.map_count,
                },
            ));
        }
        BitReader::at(self.data, entry)
            .read_u16_le()
            .map_err(|err| MapError::bitstream(map_index, err))
    }

    /// Returns the absolute offset of the prolog of map `map_index`.
    pub fn resolve(&self, map_index: usize) -> MapResult<usize> {
        let entry = self.table_entry(map_index)?;
        Ok(usize::from(entry) + self.layout.data_base())
    }
}
