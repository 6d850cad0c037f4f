//! Headless runner for mazechase simulations.
//!
//! Provides a pure function interface: `(seed, layout, config) -> RunOutcome`.
//! The batch command fans this out across seeds in parallel.

use std::time::Duration;

use serde::Serialize;

use crate::error::MapResult;
use crate::sim::{MapLayout, SimConfig, Simulation, Status};

/// Fixed timestep for headless runs, roughly one 60 Hz frame.
pub const HEADLESS_TIMESTEP: Duration = Duration::from_millis(16);

/// Final result of one headless run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunOutcome {
    /// The seed the run was built with.
    pub seed: u64,
    /// Final run state; `running` means the time limit was reached first.
    pub status: Status,
    /// Final score.
    pub score: u32,
    /// Final chaser population.
    pub chasers: usize,
    /// Pellets never collected.
    pub pellets_left: usize,
    /// Simulation time consumed, in milliseconds.
    pub sim_millis: u64,
}

/// Run a simulation to a terminal state or until `limit` of simulated time.
///
/// The player keeps its randomly drawn initial heading for the whole run;
/// steering is an interactive concern and headless runs have no input
/// collaborator.
///
/// # Errors
///
/// Returns a [`crate::error::MapError`] if the simulation cannot be built
/// from the layout.
pub fn run_sim(
    seed: u64,
    layout: MapLayout,
    config: SimConfig,
    limit: Duration,
) -> MapResult<RunOutcome> {
    let mut sim = Simulation::new(layout, config, seed)?;

    while sim.status() == Status::Running && sim.elapsed() < limit {
        sim.step(HEADLESS_TIMESTEP);
    }

    Ok(RunOutcome {
        seed,
        status: sim.status(),
        score: sim.player().score,
        chasers: sim.registry().chaser_count(),
        pellets_left: sim.registry().pellet_count(),
        sim_millis: u64::try_from(sim.elapsed().as_millis()).unwrap_or(u64::MAX),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::STANDARD_MAP;

    #[test]
    fn test_unsteered_run_on_standard_map_is_lost() {
        let layout = MapLayout::parse(STANDARD_MAP).unwrap();
        let outcome = run_sim(
            7,
            layout,
            SimConfig::default(),
            Duration::from_secs(300),
        )
        .unwrap();

        // With nobody steering, the duplication schedule wins long before
        // the pellets run out.
        assert_eq!(outcome.status, Status::Lost);
        assert!(outcome.chasers >= 50);
        assert!(outcome.pellets_left > 0);
    }

    #[test]
    fn test_run_is_deterministic_per_seed() {
        let layout = MapLayout::parse(STANDARD_MAP).unwrap();
        let a = run_sim(99, layout.clone(), SimConfig::default(), Duration::from_secs(120)).unwrap();
        let b = run_sim(99, layout, SimConfig::default(), Duration::from_secs(120)).unwrap();

        assert_eq!(a.status, b.status);
        assert_eq!(a.score, b.score);
        assert_eq!(a.chasers, b.chasers);
        assert_eq!(a.sim_millis, b.sim_millis);
    }

    #[test]
    fn test_time_limit_reports_running() {
        // Ten chasers cannot double even once in half a second.
        let layout = MapLayout::parse(STANDARD_MAP).unwrap();
        let outcome = run_sim(
            3,
            layout,
            SimConfig::default(),
            Duration::from_millis(500),
        )
        .unwrap();

        assert_eq!(outcome.status, Status::Running);
        assert!(outcome.sim_millis >= 500);
    }
}
