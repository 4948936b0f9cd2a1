//! Random tile spawning.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::{Cell, Grid, TileId};

/// Probability that a spawned tile is a 4 rather than a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// A tile placed by the spawn policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    /// Row of the new tile.
    pub row: usize,
    /// Column of the new tile.
    pub col: usize,
    /// Value of the new tile (2 or 4).
    pub value: u32,
    /// Identity assigned to the new tile.
    pub id: TileId,
}

/// Draw a spawn value: 2 with probability 0.9, 4 with probability 0.1.
pub fn random_tile_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen_bool(FOUR_PROBABILITY) { 4 } else { 2 }
}

/// Place a random tile in a uniformly chosen empty cell.
///
/// The new cell is flagged `spawned`. Returns `None` and leaves the grid
/// untouched if there is no empty cell.
pub fn spawn_random_tile<R: Rng + ?Sized>(
    grid: &mut Grid,
    id: TileId,
    rng: &mut R,
) -> Option<Spawn> {
    let empty = grid.empty_positions();
    if empty.is_empty() {
        return None;
    }

    let (row, col) = empty[rng.gen_range(0..empty.len())];
    let value = random_tile_value(rng);

    let cell = grid.get_mut(row, col)?;
    *cell = Cell {
        spawned: true,
        ..Cell::tile(value, id)
    };

    Some(Spawn { row, col, value, id })
}
