//! Game invariants - sanity checks that detect bugs.
//!
//! Every mutation goes through `Session::apply_move`, so these should NEVER
//! trigger. If they do, the engine itself is broken; they are not gameplay
//! rules and never reject player input.

use std::collections::HashSet;

use crate::game::{Grid, Session, is_valid_value};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check the invariants that hold for any grid the engine produces.
///
/// - every value is 0 or a power of two >= 2
/// - empty cells carry no identity and no flags
/// - no two tiles share an identity
#[must_use]
pub fn check_grid(grid: &Grid) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut seen = HashSet::new();

    for ((row, col), cell) in grid.iter() {
        if !is_valid_value(cell.value) {
            violations.push(InvariantViolation {
                message: format!(
                    "Cell ({row}, {col}) holds {} which is not a power of two",
                    cell.value
                ),
            });
        }

        if cell.is_empty() {
            if cell.id.is_some() || cell.merged || cell.spawned {
                violations.push(InvariantViolation {
                    message: format!("Empty cell ({row}, {col}) carries tile state"),
                });
            }
            continue;
        }

        match cell.id {
            Some(id) if !seen.insert(id) => violations.push(InvariantViolation {
                message: format!("Tile id {} appears more than once", id.0),
            }),
            Some(_) => {}
            None => violations.push(InvariantViolation {
                message: format!("Tile at ({row}, {col}) has no id"),
            }),
        }
    }

    violations
}

/// Check all session invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants<R>(session: &Session<R>) -> Vec<InvariantViolation> {
    let mut violations = check_grid(session.grid());

    // Every merge adds an even value.
    if session.score() % 2 != 0 {
        violations.push(InvariantViolation {
            message: format!("Score {} is odd", session.score()),
        });
    }

    if session.is_game_over() && !session.is_terminal() {
        violations.push(InvariantViolation {
            message: "Session is over but the grid still has a legal move".to_string(),
        });
    }

    let next = session.next_tile_id();
    for (_, cell) in session.grid().iter() {
        if let Some(id) = cell.id {
            if id.0 >= next {
                violations.push(InvariantViolation {
                    message: format!("Tile id {} was never allocated (next is {next})", id.0),
                });
            }
        }
    }

    let spawned = session.grid().iter().filter(|(_, c)| c.spawned).count();
    if session.moves() > 0 && spawned > 1 {
        violations.push(InvariantViolation {
            message: format!("{spawned} tiles flagged as spawned in one move"),
        });
    }

    violations
}

/// Assert all session invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants<R>(session: &Session<R>) {
    let violations = check_invariants(session);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants<R>(_session: &Session<R>) {}
