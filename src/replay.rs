//! Game replay and viewing system.
//!
//! Because the engine is 100% deterministic given its random source, replay
//! requires only:
//! - `seed: u64` - The seed of the spawn RNG
//! - `moves: Vec<Direction>` - The moves applied, in order
//!
//! No grid snapshots needed. To view turn N, re-run the game from turn 0 to N.
//!
//! # Time Travel
//!
//! - **Forward**: Apply the next recorded move
//! - **Backward**: Re-run from turn 0 to (current_turn - 1)
//! - **Jump to turn N**: Re-run from turn 0 to N

mod render;

pub use render::{Frame, render_text};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::autoplay::GameResult;
use crate::game::{Direction, MoveResult, Session};

/// Version written into every recording file.
pub const FORMAT_VERSION: u32 = 1;

/// Minimal recording - just the seed and the moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    /// Recording format version.
    pub version: u32,
    /// Seed of the spawn RNG.
    pub seed: u64,
    /// Moves applied, in order.
    pub moves: Vec<Direction>,
}

impl Recording {
    /// Create a new recording.
    #[must_use]
    pub fn new(seed: u64, moves: Vec<Direction>) -> Self {
        Self {
            version: FORMAT_VERSION,
            seed,
            moves,
        }
    }

    /// Create a recording of an autoplay game.
    #[must_use]
    pub fn from_result(result: &GameResult) -> Self {
        Self::new(result.seed, result.moves_log.clone())
    }

    /// Save the recording as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a recording from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// was written by an unknown format version.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let text = fs::read_to_string(path)?;
        let recording: Self = serde_json::from_str(&text)?;
        if recording.version != FORMAT_VERSION {
            return Err(ReplayError::UnsupportedVersion(recording.version));
        }
        Ok(recording)
    }
}

/// Error type for replay operations.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Reading or writing a recording failed.
    #[error("recording I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The recording is not valid JSON.
    #[error("recording is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The recording was written by an unknown format version.
    #[error("unsupported recording version {0} (expected {FORMAT_VERSION})")]
    UnsupportedVersion(u32),
    /// A recorded move did not change the grid.
    #[error("recorded move {turn} ({direction}) does not change the grid")]
    IllegalMove {
        /// 0-based index of the move in the recording.
        turn: usize,
        /// The recorded direction.
        direction: Direction,
    },
    /// Requested turn is beyond the recording.
    #[error("turn {turn} is out of range (recording has {total} moves)")]
    TurnOutOfRange {
        /// Requested turn.
        turn: usize,
        /// Number of recorded moves.
        total: usize,
    },
    /// No more recorded moves.
    #[error("end of recording")]
    EndOfRecording,
    /// Already at the first turn.
    #[error("already at the first turn")]
    AtStart,
}

/// Re-simulates a recording turn by turn.
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    recording: Recording,
    session: Session,
    turn: usize,
    last_move: Option<MoveResult>,
}

impl ReplayEngine {
    /// Create a replay engine positioned at turn 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording has an unsupported version.
    pub fn new(recording: Recording) -> Result<Self, ReplayError> {
        if recording.version != FORMAT_VERSION {
            return Err(ReplayError::UnsupportedVersion(recording.version));
        }
        let session = Session::from_seed(recording.seed);
        Ok(Self {
            recording,
            session,
            turn: 0,
            last_move: None,
        })
    }

    /// Create a replay engine positioned at `turn`.
    ///
    /// # Errors
    ///
    /// Returns an error if `turn` is past the end or a recorded move is
    /// illegal.
    pub fn new_at_turn(recording: Recording, turn: usize) -> Result<Self, ReplayError> {
        let mut engine = Self::new(recording)?;
        engine.jump_to(turn)?;
        Ok(engine)
    }

    /// Apply the next recorded move.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::EndOfRecording`] when there are no moves left
    /// and [`ReplayError::IllegalMove`] if the move does not change the grid.
    pub fn step_forward(&mut self) -> Result<MoveResult, ReplayError> {
        let Some(&direction) = self.recording.moves.get(self.turn) else {
            return Err(ReplayError::EndOfRecording);
        };

        let result = self.session.apply_move(direction);
        if !result.moved {
            return Err(ReplayError::IllegalMove {
                turn: self.turn,
                direction,
            });
        }

        self.turn += 1;
        self.last_move = Some(result);
        Ok(result)
    }

    /// Go back one turn by re-running the recording from the start.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::AtStart`] at turn 0.
    pub fn step_backward(&mut self) -> Result<(), ReplayError> {
        if self.turn == 0 {
            return Err(ReplayError::AtStart);
        }
        self.jump_to(self.turn - 1)
    }

    /// Re-run the recording from the start up to `turn`.
    ///
    /// # Errors
    ///
    /// Returns an error if `turn` is past the end or a recorded move is
    /// illegal.
    pub fn jump_to(&mut self, turn: usize) -> Result<(), ReplayError> {
        let total = self.recording.moves.len();
        if turn > total {
            return Err(ReplayError::TurnOutOfRange { turn, total });
        }

        self.session = Session::from_seed(self.recording.seed);
        self.turn = 0;
        self.last_move = None;
        while self.turn < turn {
            self.step_forward()?;
        }
        Ok(())
    }

    /// Current turn (number of moves applied).
    #[must_use]
    pub const fn turn(&self) -> usize {
        self.turn
    }

    /// Number of moves in the recording.
    #[must_use]
    pub fn total_turns(&self) -> usize {
        self.recording.moves.len()
    }

    /// Whether every recorded move has been applied.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.turn >= self.recording.moves.len()
    }

    /// The session at the current turn.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The recording being replayed.
    #[must_use]
    pub const fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Result of the most recent move, if any.
    #[must_use]
    pub const fn last_move(&self) -> Option<&MoveResult> {
        self.last_move.as_ref()
    }

    /// The direction applied to reach the current turn.
    #[must_use]
    pub fn last_direction(&self) -> Option<Direction> {
        self.turn
            .checked_sub(1)
            .and_then(|i| self.recording.moves.get(i).copied())
    }
}
