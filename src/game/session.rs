//! Game sessions: the state machine driven by the caller.

use log::{debug, error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

use crate::game::invariants::assert_invariants;
use crate::game::{Direction, Grid, Spawn, TileId, WIN_TILE, spawn_random_tile};

/// Number of tiles placed on a fresh grid.
pub const STARTING_TILES: usize = 2;

/// Coarse state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Moves are accepted.
    Playing,
    /// A 2048 tile was reached; moves are still accepted.
    Won,
    /// No move can change the grid. Only a restart leaves this state.
    GameOver,
}

/// Outcome of a single [`Session::apply_move`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// The grid after the move (including any spawned tile).
    pub grid: Grid,
    /// Score gained by merges in this move.
    pub score_delta: u64,
    /// Whether any tile moved or merged.
    pub moved: bool,
    /// Set only on the move that first produced a 2048 tile.
    pub reached_2048: bool,
    /// Whether the session is over after this move.
    pub game_over: bool,
    /// The tile spawned after the move, if any.
    pub spawned: Option<Spawn>,
}

/// A single game of 2048.
///
/// The random source is injected so games can be replayed from a seed.
/// Every mutation goes through [`Session::apply_move`], which computes the
/// next grid off to the side and commits it in one step.
#[derive(Debug, Clone)]
pub struct Session<R = StdRng> {
    grid: Grid,
    score: u64,
    won: bool,
    keep_playing: bool,
    game_over: bool,
    moves: u32,
    next_tile_id: u64,
    rng: R,
}

impl Session<StdRng> {
    /// Start a new game driven by a seeded [`StdRng`].
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new_game(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Start a new game: empty grid plus two random tiles, score 0.
    pub fn new_game(rng: R) -> Self {
        let mut session = Self {
            grid: Grid::empty(),
            score: 0,
            won: false,
            keep_playing: false,
            game_over: false,
            moves: 0,
            next_tile_id: 1,
            rng,
        };
        session.seed_tiles();
        session
    }

    /// Resume play from an existing grid with score 0.
    ///
    /// The won flag starts cleared, so a 2048 already on the grid is
    /// reported by the first move that changes the grid.
    pub fn with_grid(grid: Grid, rng: R) -> Self {
        let next_tile_id = grid
            .iter()
            .filter_map(|(_, cell)| cell.id)
            .map(|id| id.0)
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            game_over: grid.is_terminal(),
            grid: grid.cleared_flags(),
            score: 0,
            won: false,
            keep_playing: false,
            moves: 0,
            next_tile_id,
            rng,
        }
    }

    /// Throw the current game away and start a fresh one on the same
    /// random source.
    pub fn restart(&mut self) {
        self.grid = Grid::empty();
        self.score = 0;
        self.won = false;
        self.keep_playing = false;
        self.game_over = false;
        self.moves = 0;
        self.next_tile_id = 1;
        self.seed_tiles();
    }

    fn seed_tiles(&mut self) {
        for _ in 0..STARTING_TILES {
            let id = self.allocate_tile_id();
            if let Some(spawn) = spawn_random_tile(&mut self.grid, id, &mut self.rng) {
                debug!(
                    "seeded {} at ({}, {}) as {:?}",
                    spawn.value, spawn.row, spawn.col, spawn.id
                );
            }
        }
    }

    fn allocate_tile_id(&mut self) -> TileId {
        let id = TileId(self.next_tile_id);
        self.next_tile_id += 1;
        id
    }

    /// Slide and merge toward `direction`, then spawn a tile if anything
    /// moved.
    ///
    /// A move that changes nothing leaves the session untouched and spawns
    /// nothing. Moves on a finished game are ignored the same way.
    pub fn apply_move(&mut self, direction: Direction) -> MoveResult {
        if self.game_over {
            debug!("ignoring {direction}: game is over");
            return self.unchanged();
        }

        let slide = self.grid.slide(direction);
        if !slide.moved {
            return self.unchanged();
        }

        let mut grid = slide.grid;
        let id = self.allocate_tile_id();
        let spawned = spawn_random_tile(&mut grid, id, &mut self.rng);
        if spawned.is_none() {
            error!("invariant violation: no empty cell to spawn into after moving {direction}");
        }
        debug_assert!(spawned.is_some(), "moved grid has no empty cell");

        self.grid = grid;
        self.score += slide.score_delta;
        self.moves += 1;

        let reached_2048 = !self.won && !self.keep_playing && self.grid.contains(WIN_TILE);
        if reached_2048 {
            self.won = true;
            info!("reached {WIN_TILE} after {} moves", self.moves);
        }

        if self.grid.is_terminal() {
            self.game_over = true;
            info!(
                "game over after {} moves with score {}",
                self.moves, self.score
            );
        }

        assert_invariants(self);

        MoveResult {
            grid: self.grid,
            score_delta: slide.score_delta,
            moved: true,
            reached_2048,
            game_over: self.game_over,
            spawned,
        }
    }

    fn unchanged(&self) -> MoveResult {
        MoveResult {
            grid: self.grid,
            score_delta: 0,
            moved: false,
            reached_2048: false,
            game_over: self.game_over,
            spawned: None,
        }
    }

    /// Keep accepting moves after 2048 without further win notifications.
    pub fn keep_playing(&mut self) {
        self.keep_playing = true;
    }
}

impl<R> Session<R> {
    /// Check whether the grid is full with no adjacent equal pair.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.grid.is_terminal()
    }

    /// The current grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cumulative score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Whether 2048 has been reached in this game.
    #[must_use]
    pub const fn is_won(&self) -> bool {
        self.won
    }

    /// Whether the caller chose to continue after winning.
    #[must_use]
    pub const fn is_keep_playing(&self) -> bool {
        self.keep_playing
    }

    /// Whether the game has ended.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Number of moves that changed the grid.
    #[must_use]
    pub const fn moves(&self) -> u32 {
        self.moves
    }

    /// Identity the next spawned tile will receive.
    #[must_use]
    pub(crate) const fn next_tile_id(&self) -> u64 {
        self.next_tile_id
    }

    /// Current coarse state.
    #[must_use]
    pub const fn status(&self) -> Status {
        if self.game_over {
            Status::GameOver
        } else if self.won {
            Status::Won
        } else {
            Status::Playing
        }
    }
}
