//! Simulation core for mazechase.
//!
//! Implements the navigation and chaser-AI rules:
//! - Grid topology parsed from a textual map (walls, pellets, spawns,
//!   derived junctions)
//! - Wrapping collision oracle
//! - Chaser wander policy with anti-reversal bias
//! - Entity registry with capture/collection resolution and duplication
//! - The tick-driven simulation clock with win/lose evaluation

mod clock;
mod entities;
mod grid;
pub mod invariants;
pub mod policy;
mod registry;
mod state;

pub use clock::PeriodicTimer;
pub use entities::{Chaser, Player};
pub use grid::{Cell, Direction, Grid, MapLayout, STANDARD_MAP};
pub use invariants::{check_invariants, InvariantViolation};
pub use registry::{CaptureRule, EntityRegistry, CAPTURE_REWARD, PELLET_REWARD};
pub use state::{SimConfig, Simulation, Status};
