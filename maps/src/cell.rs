//! Map cell values and their canonical text encoding.

use std::fmt;

/// Character used to render the player marker.
pub const PLAYER_CHAR: char = '@';

/// A single grid cell.
///
/// The set is closed: every complete prefix code in the bitstream maps to
/// exactly one of these variants. The player is not a cell; it is recorded on
/// the [`Map`](crate::Map) and always overlays an [`Cell::Empty`] cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Cell {
    /// Free floor (`00`).
    #[default]
    Empty,
    /// Wall (`01`).
    Wall,
    /// Barrel away from any slot (`10`).
    Barrel,
    /// Slot waiting for a barrel (`110`).
    BarrelSlot,
    /// Barrel already sitting on its slot (`111`).
    BarrelPlaced,
}

impl Cell {
    /// All cell variants, in prefix code order.
    pub const ALL: [Self; 5] = [
        Self::Empty,
        Self::Wall,
        Self::Barrel,
        Self::BarrelSlot,
        Self::BarrelPlaced,
    ];

    /// Returns the canonical rendering character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Wall => 'X',
            Self::Barrel => '*',
            Self::BarrelSlot => '.',
            Self::BarrelPlaced => '&',
        }
    }

    /// Parses a canonical rendering character.
    ///
    /// Returns `None` for the player marker and any other character.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            ' ' => Some(Self::Empty),
            'X' => Some(Self::Wall),
            '*' => Some(Self::Barrel),
            '.' => Some(Self::BarrelSlot),
            '&' => Some(Self::BarrelPlaced),
            _ => None,
        }
    }

    /// Returns `true` if the player may stand on this cell at load time.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Wall => "wall",
            Self::Barrel => "barrel",
            Self::BarrelSlot => "barrel slot",
            Self::BarrelPlaced => "placed barrel",
        };
        write!(f, "{name}")
    }
}
