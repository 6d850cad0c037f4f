#![no_main]

//! Full simulation fuzzer.
//!
//! Drives whole runs with arbitrary seeds, frame sizes, and steering input,
//! checking the simulation invariants after every step. This catches
//! integration bugs the per-component tests miss: stale chaser headings,
//! missed terminal checks, entities escaping the grid.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mazechase::sim::{
    check_invariants, CaptureRule, Direction, MapLayout, SimConfig, Simulation, STANDARD_MAP,
};
use std::time::Duration;

/// One frame of fuzzer-driven input.
#[derive(Arbitrary, Debug, Clone, Copy)]
struct FuzzFrame {
    /// Frame delta in milliseconds.
    millis: u16,
    /// Steering input for this frame, if any.
    steer: Option<u8>,
}

/// Structured input for a fuzzed run.
#[derive(Arbitrary, Debug)]
struct RunInput {
    /// RNG seed for the run.
    seed: u64,
    /// Remove one or all co-located chasers on capture.
    capture_all: bool,
    /// Frame schedule.
    frames: Vec<FuzzFrame>,
}

fuzz_target!(|input: RunInput| {
    // Cap the schedule to bound runtime.
    let frames: Vec<_> = input.frames.into_iter().take(200).collect();

    let layout = match MapLayout::parse(STANDARD_MAP) {
        Ok(layout) => layout,
        Err(_) => return,
    };

    let config = SimConfig {
        capture_rule: if input.capture_all {
            CaptureRule::All
        } else {
            CaptureRule::First
        },
        ..SimConfig::default()
    };

    let mut sim = match Simulation::new(layout, config, input.seed) {
        Ok(sim) => sim,
        Err(_) => return,
    };

    let violations = check_invariants(&sim);
    assert!(
        violations.is_empty(),
        "Invariants violated at start: {:?}",
        violations
    );

    for frame in frames {
        if let Some(steer) = frame.steer {
            let dir = Direction::ALL[usize::from(steer) % Direction::ALL.len()];
            sim.steer(dir);
        }

        // Cap the frame at one second so timer catch-up stays bounded.
        let dt = Duration::from_millis(u64::from(frame.millis % 1000));
        sim.step(dt);

        let violations = check_invariants(&sim);
        assert!(
            violations.is_empty(),
            "Invariants violated mid-run: {:?}",
            violations
        );

        if sim.status().is_terminal() {
            break;
        }
    }

    // A terminal state must absorb: one more step changes nothing.
    if sim.status().is_terminal() {
        let status = sim.status();
        let score = sim.player().score;
        sim.step(Duration::from_secs(5));
        assert_eq!(sim.status(), status);
        assert_eq!(sim.player().score, score);
    }
});
