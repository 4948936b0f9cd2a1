//! Batch command implementation.

#![allow(clippy::cast_precision_loss)]

use super::output::{JsonBatchResult, format_batch_csv, format_batch_text};
use super::{BatchFormat, CliError, resolve_seed};
use grid2048::autoplay::{AutoplayConfig, BatchStats, run_game};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use rayon::prelude::*;
use std::time::Instant;

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})";

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if output serialization fails.
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    config: &AutoplayConfig,
    threads: Option<usize>,
    format: BatchFormat,
    progress: bool,
) -> Result<(), CliError> {
    if games == 0 {
        return Err(CliError::new("--games must be at least 1"));
    }

    if let Some(num_threads) = threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            warn!("could not configure thread pool: {e}");
        }
    }

    let base_seed = resolve_seed(seed);

    let pb = progress.then(|| {
        let pb = ProgressBar::new(games);
        if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb
    });

    let start = Instant::now();

    // Each thread folds into its own stats; merged at the end.
    let stats = (0..games)
        .into_par_iter()
        .fold(BatchStats::new, |mut local, i| {
            let result = run_game(base_seed.wrapping_add(i), config);
            local.add_result(&result);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(BatchStats::new, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        BatchFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats, config.strategy));
            println!();
            println!(
                "Seeds: {base_seed}..{}",
                base_seed.wrapping_add(games - 1)
            );
            println!(
                "Duration: {:.2}s ({games_per_sec:.0} games/sec)",
                duration.as_secs_f64()
            );
        }
        BatchFormat::Json => {
            let json_result = JsonBatchResult::from_stats(&stats, config.strategy);
            let json = serde_json::to_string_pretty(&json_result)?;
            println!("{json}");
        }
        BatchFormat::Csv => {
            print!("{}", format_batch_csv(&stats, config.strategy));
        }
    }

    Ok(())
}
