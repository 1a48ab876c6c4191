//! Map assembly: prolog, cell stream and epilog.

use bitstream::BitReader;
use tracing::{debug, warn};

use crate::cell::Cell;
use crate::error::{MapError, MapErrorKind, MapResult};
use crate::layout::BlobLayout;
use crate::map::{grid_fits, Map, Position, StreamSpan, MAX_SIZE_X, MAX_SIZE_Y};
use crate::offset::OffsetResolver;
use crate::symbol::SymbolDecoder;

/// Decodes map `map_index` from `data`.
///
/// The packed map is laid out as:
///
/// ```text
/// size_x: u8, size_y: u8        prolog
/// (counter, cell code)*         bitstream, size_x * size_y cells
/// man_x: u8, man_y: u8          epilog, at the byte after the last byte read
/// ```
///
/// Any failure rejects the whole map.
pub fn decode_map(data: &[u8], layout: &BlobLayout, map_index: usize) -> MapResult<Map> {
    let start = OffsetResolver::new(data, layout).resolve(map_index)?;
    debug!(
        map_index,
        file_offset = start,
        ds_offset = start.saturating_sub(layout.segment_base),
        table_offset = start.saturating_sub(layout.data_base()),
        "resolved map"
    );

    let lift = |err| MapError::bitstream(map_index, err);

    let mut reader = BitReader::at(data, start);
    let size_x = reader.read_u8().map_err(lift)?;
    let size_y = reader.read_u8().map_err(lift)?;
    if !grid_fits(size_x, size_y) {
        return Err(MapError::new(
            map_index,
            start,
            MapErrorKind::InvalidDimensions { size_x, size_y },
        ));
    }

    let area = usize::from(size_x) * usize::from(size_y);
    let mut cells = Vec::with_capacity(area);
    let mut decoder = SymbolDecoder::new(reader);
    // Row-major; the cell count is the only end-of-stream signal.
    for _ in 0..area {
        cells.push(decoder.next_cell().map_err(lift)?);
    }
    debug_assert_eq!(decoder.cells_decoded(), area);

    let mut reader = decoder.into_reader();
    let epilog = reader.byte_position();
    let x = reader.read_u8().map_err(lift)?;
    let y = reader.read_u8().map_err(lift)?;
    let player = place_player(&cells, size_x, size_y, x, y)
        .map_err(|kind| MapError::new(map_index, epilog, kind))?;

    let span = StreamSpan {
        start,
        end: reader.byte_position(),
    };
    debug!(
        map_index,
        size_x,
        size_y,
        end = span.last(),
        length = span.len(),
        "decoded map"
    );
    Ok(Map::new(map_index, size_x, size_y, cells, player, span))
}

fn place_player(
    cells: &[Cell],
    size_x: u8,
    size_y: u8,
    x: u8,
    y: u8,
) -> Result<Position, MapErrorKind> {
    if x > MAX_SIZE_X || y > MAX_SIZE_Y || x >= size_x || y >= size_y {
        return Err(MapErrorKind::InvalidPlayerPosition {
            x,
            y,
            size_x,
            size_y,
        });
    }
    match cells.get(usize::from(y) * usize::from(size_x) + usize::from(x)) {
        Some(Cell::Empty) => Ok(Position::new(x, y)),
        Some(&found) => Err(MapErrorKind::InvalidPlayerPlacement { x, y, found }),
        None => Err(MapErrorKind::InvalidPlayerPosition {
            x,
            y,
            size_x,
            size_y,
        }),
    }
}

/// Iterator over every map in the table, in index order.
///
/// Each item is decoded independently; a rejected map does not stop the
/// iteration, so the caller decides whether to skip or abort.
#[derive(Debug, Clone)]
pub struct DecodeAll<'a> {
    data: &'a [u8],
    layout: &'a BlobLayout,
    next: usize,
}

impl Iterator for DecodeAll<'_> {
    type Item = MapResult<Map>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.layout.map_count {
            return None;
        }
        let result = decode_map(self.data, self.layout, self.next);
        if let Err(err) = &result {
            warn!(%err, "map rejected");
        }
        self.next += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.layout.map_count.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DecodeAll<'_> {}

/// Decodes every map in the table lazily.
#[must_use]
pub const fn decode_all<'a>(data: &'a [u8], layout: &'a BlobLayout) -> DecodeAll<'a> {
    DecodeAll {
        data,
        layout,
        next: 0,
    }
}

/// Decodes every map in the table, stopping at the first rejected map.
pub fn decode_maps(data: &[u8], layout: &BlobLayout) -> MapResult<Vec<Map>> {
    decode_all(data, layout).collect()
}
