// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! grid2048: a deterministic sliding-tile merge engine for 2048-style puzzles.
//!
//! This crate provides the game rules and nothing else a UI would own:
//! - Directional compaction and merging on a 4x4 grid
//! - Scoring, seeded tile spawns, win and game-over detection
//! - Automated play and bit-exact replay from a seed and a move list
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (run / batch / replay)        │
//! ├─────────────────────────────────────┤
//! │   Autoplay runner    │   Replay     │
//! ├─────────────────────────────────────┤
//! │   Grid engine (Session, Grid)       │
//! └─────────────────────────────────────┘
//! ```
//!
//! ```
//! use grid2048::{Direction, Session};
//!
//! let mut session = Session::from_seed(42);
//! let result = session.apply_move(Direction::Left);
//! assert_eq!(session.score(), result.score_delta);
//! ```

pub mod autoplay;
pub mod error;
pub mod game;
pub mod replay;

pub use error::{GridError, GridResult};

// Re-export key game types at crate root for convenience
pub use game::{Cell, Direction, Grid, MoveResult, Session, Spawn, Status, TileId};
