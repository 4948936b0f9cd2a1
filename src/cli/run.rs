//! Run command implementation.

use super::output::format_game_text;
use super::{CliError, OutputFormat, resolve_seed};
use grid2048::autoplay::{AutoplayConfig, run_game};
use grid2048::replay::Recording;
use std::path::PathBuf;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the recording cannot be saved or output fails.
pub(crate) fn execute(
    seed: Option<u64>,
    config: &AutoplayConfig,
    format: OutputFormat,
    save: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let seed = resolve_seed(seed);

    if !quiet && format == OutputFormat::Text {
        println!("Running game with seed {seed} ({} strategy)...", config.strategy);
        println!();
    }

    let result = run_game(seed, config);

    if let Some(save_path) = save {
        Recording::from_result(&result).save(&save_path)?;
        if !quiet && format == OutputFormat::Text {
            println!("Recording saved to: {}", save_path.display());
            println!();
        }
    }

    match format {
        OutputFormat::Text => {
            print!("{}", format_game_text(&result, !quiet)?);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{json}");
        }
    }

    Ok(())
}
