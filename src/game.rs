//! Grid engine for grid2048.
//!
//! Implements the game rules:
//! - 4x4 grid of cells holding 0 or a power of two
//! - Sliding and merging in four directions
//! - Random tile spawns after every move that changes the grid
//! - Win (first 2048) and game-over detection

mod cell;
mod direction;
mod grid;
mod invariants;
mod session;
mod spawn;

pub use cell::{Cell, MAX_TILE, TileId, is_valid_value};
pub use direction::Direction;
pub use grid::{
    Grid, RowOutcome, SIZE, SlideOutcome, Values, WIN_TILE, compact_and_merge_row,
};
pub use invariants::{InvariantViolation, assert_invariants, check_grid, check_invariants};
pub use session::{MoveResult, STARTING_TILES, Session, Status};
pub use spawn::{FOUR_PROBABILITY, Spawn, random_tile_value, spawn_random_tile};
