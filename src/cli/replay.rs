//! Replay command implementation.

use super::{CliError, ReplayFormat};
use grid2048::replay::{Frame, Recording, ReplayEngine, render_text};
use std::path::Path;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the recording cannot be loaded or does not replay.
pub(crate) fn execute(
    recording_path: &Path,
    format: ReplayFormat,
    turn: Option<usize>,
) -> Result<(), CliError> {
    let recording = Recording::load(recording_path).map_err(|e| {
        CliError::new(format!(
            "Failed to load recording {}: {e}",
            recording_path.display()
        ))
    })?;

    let engine = match turn {
        Some(target_turn) => ReplayEngine::new_at_turn(recording, target_turn)?,
        None => ReplayEngine::new(recording)?,
    };

    match format {
        ReplayFormat::Text => print_text_replay(engine),
        ReplayFormat::Json => print_json_replay(engine),
    }
}

fn print_text_replay(mut engine: ReplayEngine) -> Result<(), CliError> {
    loop {
        if let Some(direction) = engine.last_direction() {
            println!("Move: {direction}");
        }
        print!("{}", render_text(engine.session(), engine.turn()));
        println!();

        if engine.is_finished() {
            break;
        }
        engine.step_forward()?;
    }
    Ok(())
}

fn print_json_replay(mut engine: ReplayEngine) -> Result<(), CliError> {
    let mut frames = vec![Frame::capture(&engine)];
    while !engine.is_finished() {
        engine.step_forward()?;
        frames.push(Frame::capture(&engine));
    }

    let json = serde_json::to_string_pretty(&frames)?;
    println!("{json}");
    Ok(())
}
