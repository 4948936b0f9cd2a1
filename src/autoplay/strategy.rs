//! Move-selection strategies for automated play.

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::{Direction, Grid};

/// Salt mixed into the game seed so strategy randomness never shares a
/// stream with tile spawns.
const STRATEGY_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Something that picks the next move.
pub trait Strategy {
    /// Pick a direction that changes `grid`, or `None` if no move does.
    fn choose(&mut self, grid: &Grid) -> Option<Direction>;
}

/// Which built-in strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// First legal move in the order up, left, right, down.
    Cycle,
    /// Uniformly random legal move.
    Random,
    /// Highest immediate score, then most empty cells.
    #[default]
    Greedy,
    /// Keep tiles in the bottom-left corner: down, left, right, up.
    Corner,
}

impl StrategyKind {
    /// Build the strategy, seeding any randomness from the game seed.
    #[must_use]
    pub fn build(self, seed: u64) -> Box<dyn Strategy + Send> {
        match self {
            StrategyKind::Cycle => Box::new(Priority::cycle()),
            StrategyKind::Random => Box::new(RandomMoves::new(seed ^ STRATEGY_SEED_SALT)),
            StrategyKind::Greedy => Box::new(Greedy),
            StrategyKind::Corner => Box::new(Priority::corner()),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Cycle => "cycle",
            StrategyKind::Random => "random",
            StrategyKind::Greedy => "greedy",
            StrategyKind::Corner => "corner",
        };
        f.write_str(name)
    }
}

/// Take the first direction in a fixed order that changes the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Priority {
    order: [Direction; 4],
}

impl Priority {
    /// Use a custom preference order.
    #[must_use]
    pub const fn new(order: [Direction; 4]) -> Self {
        Self { order }
    }

    /// Up, left, right, down.
    #[must_use]
    pub const fn cycle() -> Self {
        Self::new([
            Direction::Up,
            Direction::Left,
            Direction::Right,
            Direction::Down,
        ])
    }

    /// Down, left, right, up.
    #[must_use]
    pub const fn corner() -> Self {
        Self::new([
            Direction::Down,
            Direction::Left,
            Direction::Right,
            Direction::Up,
        ])
    }
}

impl Strategy for Priority {
    fn choose(&mut self, grid: &Grid) -> Option<Direction> {
        self.order
            .iter()
            .copied()
            .find(|&dir| grid.slide(dir).moved)
    }
}

/// Pick uniformly among the moves that change the grid.
#[derive(Debug, Clone)]
pub struct RandomMoves {
    rng: StdRng,
}

impl RandomMoves {
    /// Create a seeded random strategy.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomMoves {
    fn choose(&mut self, grid: &Grid) -> Option<Direction> {
        let legal = grid.legal_moves();
        if legal.is_empty() {
            return None;
        }
        Some(legal[self.rng.gen_range(0..legal.len())])
    }
}

/// One-ply lookahead: maximise merge score, then empty cells, then take the
/// earliest of up, left, right, down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Greedy;

impl Strategy for Greedy {
    fn choose(&mut self, grid: &Grid) -> Option<Direction> {
        let mut best: Option<(Direction, (u64, usize))> = None;

        for dir in Priority::cycle().order {
            let slide = grid.slide(dir);
            if !slide.moved {
                continue;
            }
            let key = (slide.score_delta, slide.grid.count_empty());
            if best.is_none_or(|(_, best_key)| key > best_key) {
                best = Some((dir, key));
            }
        }

        best.map(|(dir, _)| dir)
    }
}
