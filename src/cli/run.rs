//! Run command implementation.

use super::output::format_run_text;
use super::{CliError, OutputFormat};
use mazechase::runner::run_sim;
use mazechase::sim::{MapLayout, SimConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the map fails to load or the simulation cannot be
/// built.
pub(crate) fn execute(
    map: Option<PathBuf>,
    seed: Option<u64>,
    duration: u64,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let text = super::load_map_text(map)?;
    let layout = MapLayout::parse(&text)?;
    let seed = seed.unwrap_or_else(super::default_seed);

    if !quiet {
        println!("Running simulation with seed {seed}...");
        println!();
    }
    log::info!("headless run: seed {seed}, limit {duration}s");

    let outcome = run_sim(
        seed,
        layout,
        SimConfig::default(),
        Duration::from_secs(duration),
    )?;

    match format {
        OutputFormat::Text => {
            print!("{}", format_run_text(&outcome));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
