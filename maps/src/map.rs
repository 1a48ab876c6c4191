//! Decoded map records.

use std::fmt;
use std::ops::Range;

use crate::cell::{Cell, PLAYER_CHAR};

/// Widest accepted grid. The game screen is 40 columns.
pub const MAX_SIZE_X: u8 = 39;

/// Tallest accepted grid. The game screen is 25 rows.
pub const MAX_SIZE_Y: u8 = 24;

/// Returns `true` if a `size_x` by `size_y` grid is non-empty and fits the screen.
#[must_use]
pub const fn grid_fits(size_x: u8, size_y: u8) -> bool {
    size_x > 0 && size_y > 0 && size_x <= MAX_SIZE_X && size_y <= MAX_SIZE_Y
}

/// A grid coordinate, zero-based from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Column, 0 at the left edge.
    pub x: u8,
    /// Row, 0 at the top edge.
    pub y: u8,
}

impl Position {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Where a map's packed bytes sit in the blob.
///
/// `start` is the first prolog byte; `end` is one past the last epilog byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamSpan {
    /// Offset of the first prolog byte.
    pub start: usize,
    /// Offset one past the last epilog byte.
    pub end: usize,
}

impl StreamSpan {
    /// Number of bytes occupied by prolog, bitstream and epilog.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Offset of the last epilog byte.
    #[must_use]
    pub const fn last(&self) -> usize {
        self.end.saturating_sub(1)
    }

    /// Returns the span as a byte range.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Counts of barrels and slots on a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarrelBalance {
    /// Barrels not yet on a slot.
    pub loose: usize,
    /// Slots without a barrel.
    pub free_slots: usize,
    /// Barrels already on a slot.
    pub placed: usize,
}

impl BarrelBalance {
    /// Returns `true` if every loose barrel has a free slot to go to.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.loose == self.free_slots
    }
}

/// One fully decoded map.
///
/// Maps are only produced by [`decode_map`](crate::decode_map) and are
/// immutable once returned: the grid has exactly `size_x * size_y` cells in
/// row-major order and the player stands on an empty cell inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Map {
    index: usize,
    size_x: u8,
    size_y: u8,
    cells: Vec<Cell>,
    player: Position,
    span: StreamSpan,
}

impl Map {
    pub(crate) fn new(
        index: usize,
        size_x: u8,
        size_y: u8,
        cells: Vec<Cell>,
        player: Position,
        span: StreamSpan,
    ) -> Self {
        debug_assert_eq!(cells.len(), usize::from(size_x) * usize::from(size_y));
        Self {
            index,
            size_x,
            size_y,
            cells,
            player,
            span,
        }
    }

    /// Index of the map in the offset table.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Grid width.
    #[must_use]
    pub const fn size_x(&self) -> u8 {
        self.size_x
    }

    /// Grid height.
    #[must_use]
    pub const fn size_y(&self) -> u8 {
        self.size_y
    }

    /// Player start position.
    #[must_use]
    pub const fn player(&self) -> Position {
        self.player
    }

    /// Location of the packed map in the blob.
    #[must_use]
    pub const fn span(&self) -> StreamSpan {
        self.span
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the cell at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: u8, y: u8) -> Option<Cell> {
        if x >= self.size_x || y >= self.size_y {
            return None;
        }
        self.cells
            .get(usize::from(y) * usize::from(self.size_x) + usize::from(x))
            .copied()
    }

    /// Iterates over the grid rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(usize::from(self.size_x))
    }

    /// Renders row `y` with the canonical characters, including the player marker.
    #[must_use]
    pub fn render_row(&self, y: u8) -> Option<String> {
        let row = self.rows().nth(usize::from(y))?;
        Some(
            row.iter()
                .enumerate()
                .map(|(x, cell)| {
                    if y == self.player.y && x == usize::from(self.player.x) {
                        PLAYER_CHAR
                    } else {
                        cell.as_char()
                    }
                })
                .collect(),
        )
    }

    /// Number of cells equal to `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Counts loose barrels, free slots and placed barrels.
    #[must_use]
    pub fn barrel_balance(&self) -> BarrelBalance {
        BarrelBalance {
            loose: self.count(Cell::Barrel),
            free_slots: self.count(Cell::BarrelSlot),
            placed: self.count(Cell::BarrelPlaced),
        }
    }
}

impl fmt::Display for Map {
    /// One line per row; the last row has no trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size_y {
            if y > 0 {
                writeln!(f)?;
            }
            if let Some(row) = self.render_row(y) {
                f.write_str(&row)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Map {
        // XXXX
        // X@*X
        // X .X
        // XXXX
        let rows = ["XXXX", "X *X", "X .X", "XXXX"];
        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|ch| Cell::from_char(ch).unwrap())
            .collect();
        Map::new(
            2,
            4,
            4,
            cells,
            Position::new(1, 1),
            StreamSpan { start: 10, end: 16 },
        )
    }

    #[test]
    fn grid_limits() {
        assert!(grid_fits(1, 1));
        assert!(grid_fits(MAX_SIZE_X, MAX_SIZE_Y));
        assert!(!grid_fits(40, 10));
        assert!(!grid_fits(10, 25));
        assert!(!grid_fits(0, 10));
        assert!(!grid_fits(10, 0));
    }

    #[test]
    fn renders_with_player() {
        assert_eq!(sample().to_string(), "XXXX\nX@*X\nX .X\nXXXX");
    }

    #[test]
    fn render_row_bounds() {
        let map = sample();
        assert_eq!(map.render_row(1).as_deref(), Some("X@*X"));
        assert_eq!(map.render_row(4), None);
    }

    #[test]
    fn cell_lookup() {
        let map = sample();
        assert_eq!(map.cell(0, 0), Some(Cell::Wall));
        assert_eq!(map.cell(2, 1), Some(Cell::Barrel));
        assert_eq!(map.cell(1, 1), Some(Cell::Empty));
        assert_eq!(map.cell(4, 0), None);
        assert_eq!(map.cell(0, 4), None);
    }

    #[test]
    fn rows_are_size_x_wide() {
        let map = sample();
        assert_eq!(map.rows().count(), 4);
        assert!(map.rows().all(|row| row.len() == 4));
    }

    #[test]
    fn census() {
        let map = sample();
        assert_eq!(map.count(Cell::Wall), 12);
        let balance = map.barrel_balance();
        assert_eq!(
            balance,
            BarrelBalance {
                loose: 1,
                free_slots: 1,
                placed: 0
            }
        );
        assert!(balance.is_balanced());
    }

    #[test]
    fn span_accessors() {
        let span = sample().span();
        assert_eq!(span.len(), 6);
        assert_eq!(span.last(), 15);
        assert_eq!(span.range(), 10..16);
        assert!(!span.is_empty());
    }
}
