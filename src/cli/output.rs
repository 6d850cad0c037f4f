//! Output formatting utilities for CLI.

// Display math uses intentional lossy casts
#![allow(clippy::cast_precision_loss)]

use mazechase::runner::RunOutcome;
use mazechase::sim::Status;
use serde::Serialize;

/// Format a single run outcome as human-readable text.
pub(super) fn format_run_text(outcome: &RunOutcome) -> String {
    let verdict = match outcome.status {
        Status::Won => "won",
        Status::Lost => "lost",
        Status::Running => "time limit reached",
    };

    let mut output = String::new();
    output.push_str(&format!("Run result (seed: {})\n", outcome.seed));
    output.push_str(&format!("  Outcome: {verdict}\n"));
    output.push_str(&format!("  Score: {}\n", outcome.score));
    output.push_str(&format!("  Chasers: {}\n", outcome.chasers));
    output.push_str(&format!("  Pellets left: {}\n", outcome.pellets_left));
    output.push_str(&format!(
        "  Simulated: {:.1}s\n",
        outcome.sim_millis as f64 / 1000.0
    ));
    output
}

/// Aggregated statistics over a batch of runs.
#[derive(Debug, Default)]
pub(super) struct BatchStats {
    /// Total runs completed.
    pub(super) runs: u64,
    /// Runs that ended in a win.
    pub(super) won: u64,
    /// Runs that ended in a loss.
    pub(super) lost: u64,
    /// Runs that hit the time limit.
    pub(super) timed_out: u64,
    /// Score sum across all runs.
    total_score: u64,
    /// Simulated milliseconds across all runs.
    total_sim_millis: u64,
}

impl BatchStats {
    /// Add one run's outcome to the stats.
    pub(super) fn add_outcome(&mut self, outcome: &RunOutcome) {
        self.runs += 1;
        match outcome.status {
            Status::Won => self.won += 1,
            Status::Lost => self.lost += 1,
            Status::Running => self.timed_out += 1,
        }
        self.total_score += u64::from(outcome.score);
        self.total_sim_millis += outcome.sim_millis;
    }

    /// Merge another thread's local stats into this one.
    pub(super) fn merge(&mut self, other: &BatchStats) {
        self.runs += other.runs;
        self.won += other.won;
        self.lost += other.lost;
        self.timed_out += other.timed_out;
        self.total_score += other.total_score;
        self.total_sim_millis += other.total_sim_millis;
    }

    /// Mean score per run.
    pub(super) fn mean_score(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.total_score as f64 / self.runs as f64
        }
    }

    /// Mean simulated seconds per run.
    pub(super) fn mean_sim_secs(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.total_sim_millis as f64 / self.runs as f64 / 1000.0
        }
    }
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult {
    /// Total runs completed.
    pub(super) runs: u64,
    /// Runs that ended in a win.
    pub(super) won: u64,
    /// Runs that ended in a loss.
    pub(super) lost: u64,
    /// Runs that hit the time limit.
    pub(super) timed_out: u64,
    /// Mean score per run.
    pub(super) mean_score: f64,
    /// Mean simulated seconds per run.
    pub(super) mean_sim_seconds: f64,
}

impl JsonBatchResult {
    /// Create from aggregated stats.
    pub(super) fn from_stats(stats: &BatchStats) -> Self {
        Self {
            runs: stats.runs,
            won: stats.won,
            lost: stats.lost,
            timed_out: stats.timed_out,
            mean_score: stats.mean_score(),
            mean_sim_seconds: stats.mean_sim_secs(),
        }
    }
}

/// Format batch statistics as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats) -> String {
    let pct = |n: u64| {
        if stats.runs == 0 {
            0.0
        } else {
            n as f64 * 100.0 / stats.runs as f64
        }
    };

    let mut output = String::new();
    output.push_str(&format!("Batch results ({} runs)\n", stats.runs));
    output.push_str(&format!("  Won:       {} ({:.1}%)\n", stats.won, pct(stats.won)));
    output.push_str(&format!("  Lost:      {} ({:.1}%)\n", stats.lost, pct(stats.lost)));
    output.push_str(&format!(
        "  Timed out: {} ({:.1}%)\n",
        stats.timed_out,
        pct(stats.timed_out)
    ));
    output.push_str(&format!("  Mean score: {:.1}\n", stats.mean_score()));
    output.push_str(&format!(
        "  Mean simulated time: {:.1}s\n",
        stats.mean_sim_secs()
    ));
    output
}

/// Format batch statistics as CSV.
pub(super) fn format_batch_csv(stats: &BatchStats) -> String {
    let mut output = String::new();
    output.push_str("runs,won,lost,timed_out,mean_score,mean_sim_seconds\n");
    output.push_str(&format!(
        "{},{},{},{},{:.2},{:.2}\n",
        stats.runs,
        stats.won,
        stats.lost,
        stats.timed_out,
        stats.mean_score(),
        stats.mean_sim_secs()
    ));
    output
}
