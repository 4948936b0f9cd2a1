//! Error types for the grid engine.

use thiserror::Error;

/// Errors raised when building a grid from caller-supplied values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// A cell holds a value that is neither 0 nor a power of two >= 2.
    #[error("invalid tile value {value} at row {row}, column {col}")]
    InvalidValue {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The rejected value.
        value: u32,
    },
}

/// Result type for grid construction.
pub type GridResult<T> = Result<T, GridError>;
