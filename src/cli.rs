//! CLI command implementations for grid2048.

pub(crate) mod batch;
pub(crate) mod replay;
pub(crate) mod run;

mod output;

use clap::ValueEnum;
use grid2048::GridError;
use grid2048::autoplay::{AutoplayConfig, ConfigError, StrategyKind};
use grid2048::replay::ReplayError;
use std::path::PathBuf;
use thiserror::Error;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `replay` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReplayFormat {
    /// One text frame per turn.
    Text,
    /// JSON array of frames.
    Json,
}

/// Output format for the `batch` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BatchFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Move-selection strategy accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StrategyArg {
    /// First legal move in the order up, left, right, down.
    Cycle,
    /// Uniformly random legal move.
    Random,
    /// Highest immediate score, then most empty cells.
    Greedy,
    /// Keep tiles in the bottom-left corner.
    Corner,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Cycle => StrategyKind::Cycle,
            StrategyArg::Random => StrategyKind::Random,
            StrategyArg::Greedy => StrategyKind::Greedy,
            StrategyArg::Corner => StrategyKind::Corner,
        }
    }
}

/// CLI error type.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Free-form failure.
    #[error("{0}")]
    Message(String),
    /// Config file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Recording could not be saved, loaded or replayed.
    #[error(transparent)]
    Replay(#[from] ReplayError),
    /// A grid could not be rebuilt for display.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// JSON output failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Build the autoplay config: file (if any), then command-line overrides.
pub(crate) fn resolve_config(
    path: Option<PathBuf>,
    strategy: Option<StrategyArg>,
    max_moves: Option<u32>,
    stop_at_win: bool,
) -> Result<AutoplayConfig, CliError> {
    let mut config = match path {
        Some(path) => AutoplayConfig::from_toml_file(&path)?,
        None => AutoplayConfig::default(),
    };

    if let Some(strategy) = strategy {
        config.strategy = strategy.into();
    }
    if let Some(max_moves) = max_moves {
        config.max_moves = max_moves;
    }
    if stop_at_win {
        config.keep_playing = false;
    }

    Ok(config)
}

/// Use the given seed or derive one from the clock.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}
