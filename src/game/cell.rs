//! Cells and tile identities.

use serde::{Deserialize, Serialize};

/// Largest tile value a `u32` cell can hold. Tiles of this value never merge.
pub const MAX_TILE: u32 = 1 << 31;

/// Opaque identity of a spawned tile.
///
/// Assigned by the session from a monotonically increasing counter. It lets a
/// renderer follow a tile across moves and never influences game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u64);

/// A single position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Tile value: 0 for empty, otherwise a power of two >= 2.
    pub value: u32,
    /// Identity of the tile occupying this cell (None when empty).
    pub id: Option<TileId>,
    /// Set on the product of a merge during the current move.
    pub merged: bool,
    /// Set on the tile spawned after the current move.
    pub spawned: bool,
}

impl Cell {
    /// An empty cell.
    pub const EMPTY: Cell = Cell {
        value: 0,
        id: None,
        merged: false,
        spawned: false,
    };

    /// Create an occupied cell with no transient flags.
    #[must_use]
    pub const fn tile(value: u32, id: TileId) -> Self {
        Self {
            value,
            id: Some(id),
            merged: false,
            spawned: false,
        }
    }

    /// Check if this cell holds no tile.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// Check whether this tile and `other` would combine into one.
    #[must_use]
    pub const fn can_merge_with(&self, other: &Cell) -> bool {
        !self.is_empty() && self.value == other.value && self.value < MAX_TILE
    }

    /// Return the cell with both transient flags cleared.
    #[must_use]
    #[inline]
    pub const fn without_flags(self) -> Self {
        Self {
            merged: false,
            spawned: false,
            ..self
        }
    }
}

/// Check whether `value` is a legal tile value (0 or a power of two >= 2).
#[must_use]
#[inline]
pub const fn is_valid_value(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}
