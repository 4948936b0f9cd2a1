//! grid2048 CLI - play, batch-simulate and replay 2048 games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use env_logger::Env;
use std::process::ExitCode;

/// grid2048 - A deterministic 2048 merge engine
#[derive(Parser, Debug)]
#[command(name = "grid2048")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log engine events (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a single automated game
    Run {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Move-selection strategy (default: greedy)
        #[arg(long)]
        strategy: Option<cli::StrategyArg>,

        /// Maximum moves (default: 100000)
        #[arg(short, long)]
        max_moves: Option<u32>,

        /// TOML config file with autoplay settings
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Stop at the first 2048 instead of playing on
        #[arg(long)]
        stop_at_win: bool,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save recording to file
        #[arg(long)]
        save: Option<std::path::PathBuf>,

        /// Suppress the final grid in text output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Play many games in parallel and aggregate statistics
    Batch {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Move-selection strategy (default: greedy)
        #[arg(long)]
        strategy: Option<cli::StrategyArg>,

        /// Maximum moves per game (default: 100000)
        #[arg(short, long)]
        max_moves: Option<u32>,

        /// TOML config file with autoplay settings
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Stop each game at its first 2048
        #[arg(long)]
        stop_at_win: bool,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::BatchFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Replay a recorded game
    Replay {
        /// Recording file (.json)
        #[arg(required = true)]
        recording: std::path::PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::ReplayFormat,

        /// Start at specific turn
        #[arg(short, long)]
        turn: Option<usize>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let result = match args.command {
        Commands::Run {
            seed,
            strategy,
            max_moves,
            config,
            stop_at_win,
            format,
            save,
            quiet,
        } => cli::resolve_config(config, strategy, max_moves, stop_at_win)
            .and_then(|config| cli::run::execute(seed, &config, format, save, quiet)),

        Commands::Batch {
            games,
            seed,
            strategy,
            max_moves,
            config,
            stop_at_win,
            threads,
            format,
            progress,
        } => cli::resolve_config(config, strategy, max_moves, stop_at_win).and_then(|config| {
            cli::batch::execute(games, seed, &config, threads, format, progress)
        }),

        Commands::Replay {
            recording,
            format,
            turn,
        } => cli::replay::execute(&recording, format, turn),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
