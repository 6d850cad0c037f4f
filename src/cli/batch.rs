//! Batch command implementation - mass parallel headless runs.

// Throughput math uses intentional lossy casts
#![allow(clippy::cast_precision_loss)]

use super::output::{format_batch_csv, format_batch_text, BatchStats, JsonBatchResult};
use super::{BatchFormat, CliError};
use indicatif::{ProgressBar, ProgressStyle};
use mazechase::runner::run_sim;
use mazechase::sim::{MapLayout, SimConfig};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if the map fails to load.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    map: Option<PathBuf>,
    runs: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    duration: u64,
    format: BatchFormat,
    progress: bool,
) -> Result<(), CliError> {
    let text = super::load_map_text(map)?;
    let layout = MapLayout::parse(&text)?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(super::default_seed);
    let config = SimConfig::default();
    let limit = Duration::from_secs(duration);

    log::info!("batch: {runs} runs from seed {base_seed}, limit {duration}s each");

    // Progress bar
    let pb = if progress {
        let pb = ProgressBar::new(runs);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} runs ({per_sec})")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Run simulations in parallel using the lock-free fold/reduce pattern:
    // each thread accumulates into its own BatchStats, merged at the end.
    let stats = (0..runs)
        .into_par_iter()
        .fold(BatchStats::default, |mut local_stats, i| {
            let run_seed = base_seed.wrapping_add(i);
            if let Ok(outcome) = run_sim(run_seed, layout.clone(), config, limit) {
                local_stats.add_outcome(&outcome);
            }
            local_stats
        })
        .reduce(BatchStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    // Update progress bar after completion (no atomic overhead in hot path)
    if let Some(pb) = pb {
        pb.set_position(stats.runs);
        pb.finish_with_message("done");
    }

    let elapsed = start.elapsed();
    let runs_per_sec = if elapsed.as_secs_f64() > 0.0 {
        stats.runs as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    match format {
        BatchFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({runs_per_sec:.0} runs/sec)",
                elapsed.as_secs_f64()
            );
        }
        BatchFormat::Json => {
            let json_result = JsonBatchResult::from_stats(&stats);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        BatchFormat::Csv => {
            print!("{}", format_batch_csv(&stats));
        }
    }

    Ok(())
}
