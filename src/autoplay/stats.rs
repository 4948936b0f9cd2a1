//! Aggregated statistics over many autoplay games.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::autoplay::GameResult;

/// Running totals for a batch of games.
///
/// Built with a fold/reduce: each worker accumulates its own stats and the
/// partial results are combined with [`BatchStats::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchStats {
    /// Total games played.
    pub games_played: u64,
    /// Games that reached 2048.
    pub wins: u64,
    /// Games that ended on a terminal grid (rather than the move cap).
    pub game_overs: u64,
    /// Highest single-game score.
    pub best_score: u64,
    /// Number of games finishing with each max tile.
    pub max_tiles: BTreeMap<u32, u64>,
    total_score: u64,
    score_sq_sum: f64,
    total_moves: u64,
}

impl BatchStats {
    /// Create empty stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a game result to the stats.
    pub fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        if result.won {
            self.wins += 1;
        }
        if result.game_over {
            self.game_overs += 1;
        }
        self.best_score = self.best_score.max(result.score);
        *self.max_tiles.entry(result.max_tile).or_insert(0) += 1;

        self.total_score += result.score;
        #[allow(clippy::cast_precision_loss)]
        let score = result.score as f64;
        self.score_sq_sum += score * score;
        self.total_moves += u64::from(result.moves);
    }

    /// Merge another set of stats into this one.
    pub fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.wins += other.wins;
        self.game_overs += other.game_overs;
        self.best_score = self.best_score.max(other.best_score);
        for (tile, count) in &other.max_tiles {
            *self.max_tiles.entry(*tile).or_insert(0) += count;
        }
        self.total_score += other.total_score;
        self.score_sq_sum += other.score_sq_sum;
        self.total_moves += other.total_moves;
    }

    /// Fraction of games that reached 2048 (0.0-1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games_played as f64
    }

    /// Mean final score.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_score(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.games_played as f64
    }

    /// Population standard deviation of the final score.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score_std_dev(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let n = self.games_played as f64;
        let mean = self.mean_score();
        let variance = (self.score_sq_sum / n) - (mean * mean);
        if variance < 0.0 { 0.0 } else { variance.sqrt() }
    }

    /// Mean number of moves per game.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_moves(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.games_played as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: u64, max_tile: u32, won: bool) -> GameResult {
        GameResult {
            seed: 0,
            score,
            moves: 10,
            max_tile,
            won,
            won_at_move: won.then_some(5),
            game_over: true,
            final_grid: [[0; 4]; 4],
            moves_log: Vec::new(),
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = BatchStats::new();
        assert!(stats.win_rate().abs() < f64::EPSILON);
        assert!(stats.mean_score().abs() < f64::EPSILON);
        assert!(stats.score_std_dev().abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_and_aggregate() {
        let mut stats = BatchStats::new();
        stats.add_result(&result(100, 128, false));
        stats.add_result(&result(300, 2048, true));

        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.best_score, 300);
        assert!((stats.mean_score() - 200.0).abs() < 1e-9);
        assert!((stats.score_std_dev() - 100.0).abs() < 1e-9);
        assert!((stats.win_rate() - 0.5).abs() < 1e-9);
        assert!((stats.mean_moves() - 10.0).abs() < 1e-9);
        assert_eq!(stats.max_tiles.get(&2048), Some(&1));
    }

    #[test]
    fn test_merge_matches_sequential() {
        let results = [
            result(10, 16, false),
            result(500, 256, false),
            result(20_000, 2048, true),
        ];

        let mut sequential = BatchStats::new();
        for r in &results {
            sequential.add_result(r);
        }

        let mut left = BatchStats::new();
        left.add_result(&results[0]);
        let mut right = BatchStats::new();
        right.add_result(&results[1]);
        right.add_result(&results[2]);
        left.merge(&right);

        assert_eq!(left, sequential);
    }
}
