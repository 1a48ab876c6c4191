//! Container layout of the map resource.

/// Size of the `pusher.exe` image holding the maps.
pub const PUSHER_EXE_LEN: usize = 10632;

/// Layout of the map resource inside a blob.
///
/// The maps live in the data segment of the executable. The segment holds an
/// offset table with one little-endian `u16` per map and, separately, the
/// packed map data those offsets point into.
///
/// ```text
/// segment_base ─┬─ + data_offset  ─► packed maps (prolog, bitstream, epilog)...
///               └─ + table_offset ─► [u16 LE; map_count]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobLayout {
    /// Expected blob size in bytes.
    pub blob_len: usize,

    /// Offset of the data segment within the blob.
    pub segment_base: usize,

    /// Offset of the map offset table within the segment.
    pub table_offset: usize,

    /// Offset of the packed map data within the segment.
    pub data_offset: usize,

    /// Number of maps in the table.
    pub map_count: usize,
}

impl Default for BlobLayout {
    fn default() -> Self {
        Self {
            blob_len: PUSHER_EXE_LEN,
            segment_base: 0x1390,
            table_offset: 0x1480,
            data_offset: 0x00FC,
            map_count: 60,
        }
    }
}

impl BlobLayout {
    /// Creates a compact layout for synthetic test blobs.
    ///
    /// Four maps; the table sits at `0x10` and the packed data starts right
    /// after it at `0x18`.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            blob_len: 256,
            segment_base: 0x10,
            table_offset: 0,
            data_offset: 8,
            map_count: 4,
        }
    }

    /// Returns the absolute offset of the map offset table.
    #[must_use]
    pub const fn table_base(&self) -> usize {
        self.segment_base + self.table_offset
    }

    /// Returns the absolute offset that table entries are relative to.
    #[must_use]
    pub const fn data_base(&self) -> usize {
        self.segment_base + self.data_offset
    }
}
