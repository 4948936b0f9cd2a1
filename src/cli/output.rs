//! Output formatting utilities for CLI.

#![allow(clippy::cast_precision_loss)]

use grid2048::Grid;
use grid2048::autoplay::{BatchStats, GameResult, StrategyKind};
use serde::Serialize;

use super::CliError;

/// JSON-serializable batch summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult {
    /// Strategy used for every game.
    pub(super) strategy: StrategyKind,
    /// Games played.
    pub(super) games_played: u64,
    /// Games that reached 2048.
    pub(super) wins: u64,
    /// Fraction of games that reached 2048.
    pub(super) win_rate: f64,
    /// Mean final score.
    pub(super) mean_score: f64,
    /// Standard deviation of the final score.
    pub(super) score_std_dev: f64,
    /// Best final score.
    pub(super) best_score: u64,
    /// Mean moves per game.
    pub(super) mean_moves: f64,
    /// Games per largest tile reached.
    pub(super) max_tiles: Vec<JsonTileCount>,
}

/// One row of the max-tile histogram.
#[derive(Debug, Serialize)]
pub(super) struct JsonTileCount {
    /// Tile value.
    pub(super) tile: u32,
    /// Games whose largest tile was `tile`.
    pub(super) games: u64,
}

impl JsonBatchResult {
    /// Create from aggregated stats.
    pub(super) fn from_stats(stats: &BatchStats, strategy: StrategyKind) -> Self {
        Self {
            strategy,
            games_played: stats.games_played,
            wins: stats.wins,
            win_rate: stats.win_rate(),
            mean_score: stats.mean_score(),
            score_std_dev: stats.score_std_dev(),
            best_score: stats.best_score,
            mean_moves: stats.mean_moves(),
            max_tiles: stats
                .max_tiles
                .iter()
                .map(|(&tile, &games)| JsonTileCount { tile, games })
                .collect(),
        }
    }
}

/// Format a game result as human-readable text.
pub(super) fn format_game_text(result: &GameResult, show_grid: bool) -> Result<String, CliError> {
    let mut output = String::new();

    output.push_str(&format!("Game Result (seed: {})\n", result.seed));
    output.push_str(&format!("  Score: {}\n", result.score));
    output.push_str(&format!("  Moves: {}\n", result.moves));
    output.push_str(&format!("  Max tile: {}\n", result.max_tile));
    match result.won_at_move {
        Some(m) => output.push_str(&format!("  Reached 2048: yes (move {m})\n")),
        None => output.push_str("  Reached 2048: no\n"),
    }
    let outcome = if result.game_over {
        "game over"
    } else {
        "stopped"
    };
    output.push_str(&format!("  Outcome: {outcome}\n"));

    if show_grid {
        let grid = Grid::from_values(result.final_grid)?;
        output.push_str(&format!("\n{grid}"));
    }

    Ok(output)
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats, strategy: StrategyKind) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Batch Results ({} games, strategy: {strategy})\n",
        stats.games_played
    ));
    output.push_str(&"=".repeat(50));
    output.push('\n');
    output.push_str(&format!(
        "  Reached 2048: {} ({:.1}%)\n",
        stats.wins,
        stats.win_rate() * 100.0
    ));
    output.push_str(&format!("  Game overs: {}\n", stats.game_overs));
    output.push_str(&format!(
        "  Score: mean {:.0} (std {:.0}), best {}\n",
        stats.mean_score(),
        stats.score_std_dev(),
        stats.best_score
    ));
    output.push_str(&format!("  Moves: mean {:.1}\n", stats.mean_moves()));
    output.push_str("\n  Max tile distribution:\n");

    for (tile, games) in stats.max_tiles.iter().rev() {
        let pct = if stats.games_played == 0 {
            0.0
        } else {
            *games as f64 / stats.games_played as f64 * 100.0
        };
        output.push_str(&format!("    {tile:>6}: {games:>8} ({pct:5.1}%)\n"));
    }

    output
}

/// Format batch stats as CSV: a summary row, then the histogram.
pub(super) fn format_batch_csv(stats: &BatchStats, strategy: StrategyKind) -> String {
    let mut output = String::new();

    output.push_str("strategy,games,wins,win_rate,mean_score,score_std_dev,best_score,mean_moves\n");
    output.push_str(&format!(
        "{strategy},{},{},{:.4},{:.2},{:.2},{},{:.2}\n",
        stats.games_played,
        stats.wins,
        stats.win_rate(),
        stats.mean_score(),
        stats.score_std_dev(),
        stats.best_score,
        stats.mean_moves()
    ));

    output.push_str("\nmax_tile,games\n");
    for (tile, games) in &stats.max_tiles {
        output.push_str(&format!("{tile},{games}\n"));
    }

    output
}
