//! Simulation invariants - sanity checks that detect bugs.
//!
//! None of these should ever trigger in a correctly implemented engine fed a
//! well-formed map. They are bug detectors with generous bounds, not
//! gameplay limits, and are exercised by the fuzz targets and integration
//! tests between steps.

use crate::sim::{Simulation, Status};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all simulation invariants.
///
/// Returns the list of violations found, empty if all invariants hold.
#[must_use]
pub fn check_invariants(sim: &Simulation) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let grid = sim.grid();

    let player = sim.player();
    if !grid.in_bounds(player.pos) {
        violations.push(InvariantViolation {
            message: format!("player at ({}, {}) is out of bounds", player.pos.x, player.pos.y),
        });
    }
    if grid.is_wall(player.pos) {
        violations.push(InvariantViolation {
            message: format!("player at ({}, {}) stands on a wall", player.pos.x, player.pos.y),
        });
    }

    for (idx, chaser) in sim.registry().chasers().iter().enumerate() {
        if !grid.in_bounds(chaser.pos) {
            violations.push(InvariantViolation {
                message: format!(
                    "chaser {idx} at ({}, {}) is out of bounds",
                    chaser.pos.x, chaser.pos.y
                ),
            });
        }
        if grid.is_wall(chaser.pos) {
            violations.push(InvariantViolation {
                message: format!(
                    "chaser {idx} at ({}, {}) stands on a wall",
                    chaser.pos.x, chaser.pos.y
                ),
            });
        }
    }

    for pellet in sim.registry().pellets() {
        if !grid.in_bounds(*pellet) || grid.is_wall(*pellet) {
            violations.push(InvariantViolation {
                message: format!("pellet at ({}, {}) overlaps a wall or is out of bounds", pellet.x, pellet.y),
            });
        }
    }

    // The population can at most double past the threshold on the tick that
    // crosses it; anything beyond that means a missed terminal check.
    let cap = sim.config().lose_threshold.saturating_mul(2);
    if sim.registry().chaser_count() > cap {
        violations.push(InvariantViolation {
            message: format!(
                "chaser population {} exceeds sanity cap {cap}",
                sim.registry().chaser_count()
            ),
        });
    }

    match sim.status() {
        Status::Won => {
            if sim.registry().pellet_count() != 0 {
                violations.push(InvariantViolation {
                    message: format!(
                        "run marked won with {} pellets remaining",
                        sim.registry().pellet_count()
                    ),
                });
            }
        }
        Status::Lost => {
            if sim.registry().chaser_count() < sim.config().lose_threshold {
                violations.push(InvariantViolation {
                    message: format!(
                        "run marked lost with only {} chasers (threshold {})",
                        sim.registry().chaser_count(),
                        sim.config().lose_threshold
                    ),
                });
            }
        }
        Status::Running => {}
    }

    violations
}
