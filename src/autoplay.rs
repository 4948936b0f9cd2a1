//! Automated play on top of the grid engine.
//!
//! Provides a pure function interface: `(seed, config) -> GameResult`
//!
//! The spawn stream is seeded from `seed` alone, so the returned move log
//! together with the seed replays the game exactly (see [`crate::replay`]).

mod config;
mod stats;
mod strategy;

pub use config::{AutoplayConfig, ConfigError};
pub use stats::BatchStats;
pub use strategy::{Greedy, Priority, RandomMoves, Strategy, StrategyKind};

use log::debug;
use serde::Serialize;

use crate::game::{Direction, Session, Values};

/// Final result of an automated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// The seed used for this game.
    pub seed: u64,
    /// Final score.
    pub score: u64,
    /// Moves applied.
    pub moves: u32,
    /// Highest tile on the final grid.
    pub max_tile: u32,
    /// Whether 2048 was reached.
    pub won: bool,
    /// Move number (1-based) on which 2048 first appeared.
    pub won_at_move: Option<u32>,
    /// Whether the game ended on a terminal grid.
    pub game_over: bool,
    /// Tile values of the final grid.
    pub final_grid: Values,
    /// Every move applied, in order.
    pub moves_log: Vec<Direction>,
}

/// Play a complete game with the given seed and configuration.
///
/// Stops on game over, when the strategy has no move, at
/// `config.max_moves`, or at the first 2048 unless `config.keep_playing`
/// is set.
#[must_use]
pub fn run_game(seed: u64, config: &AutoplayConfig) -> GameResult {
    let mut strategy = config.strategy.build(seed);
    run_game_with(seed, strategy.as_mut(), config)
}

/// Like [`run_game`] but with a caller-supplied strategy.
pub fn run_game_with(
    seed: u64,
    strategy: &mut dyn Strategy,
    config: &AutoplayConfig,
) -> GameResult {
    let mut session = Session::from_seed(seed);
    let mut moves_log = Vec::new();
    let mut won_at_move = None;

    while !session.is_game_over() && session.moves() < config.max_moves {
        let Some(direction) = strategy.choose(session.grid()) else {
            break;
        };

        let result = session.apply_move(direction);
        if !result.moved {
            debug!("strategy chose no-op move {direction}; stopping");
            break;
        }
        moves_log.push(direction);

        if result.reached_2048 {
            won_at_move = Some(session.moves());
            if !config.keep_playing {
                break;
            }
            session.keep_playing();
        }
    }

    debug!(
        "seed {seed}: score {} in {} moves",
        session.score(),
        session.moves()
    );

    GameResult {
        seed,
        score: session.score(),
        moves: session.moves(),
        max_tile: session.grid().max_tile(),
        won: session.is_won(),
        won_at_move,
        game_over: session.is_game_over(),
        final_grid: session.grid().values(),
        moves_log,
    }
}
