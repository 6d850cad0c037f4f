//! mazechase CLI - play, simulate, and batch-simulate maze-chase runs.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// mazechase - a deterministic toroidal maze-chase simulation
#[derive(Parser, Debug)]
#[command(name = "mazechase")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        /// Map file (default: the bundled 15x15 map)
        #[arg(short, long)]
        map: Option<PathBuf>,

        /// Random seed (default: derived from the wall clock)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Run a single headless simulation
    Run {
        /// Map file (default: the bundled 15x15 map)
        #[arg(short, long)]
        map: Option<PathBuf>,

        /// Random seed (default: derived from the wall clock)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Simulated time limit in seconds (default: 300)
        #[arg(short, long, default_value = "300")]
        duration: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run mass parallel simulations and aggregate statistics
    Batch {
        /// Map file (default: the bundled 15x15 map)
        #[arg(short, long)]
        map: Option<PathBuf>,

        /// Number of runs (default: 1000)
        #[arg(short, long, default_value = "1000")]
        runs: u64,

        /// Starting seed (increments for each run)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Simulated time limit per run in seconds (default: 300)
        #[arg(short, long, default_value = "300")]
        duration: u64,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::BatchFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("mazechase starting up");

    let args = Args::parse();

    let result = match args.command {
        Commands::Play { map, seed } => cli::play::execute(map, seed),

        Commands::Run {
            map,
            seed,
            duration,
            format,
            quiet,
        } => cli::run::execute(map, seed, duration, format, quiet),

        Commands::Batch {
            map,
            runs,
            seed,
            threads,
            duration,
            format,
            progress,
        } => cli::batch::execute(map, runs, seed, threads, duration, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
