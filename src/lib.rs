// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! mazechase: a deterministic simulation engine for a toroidal maze-chase game.
//!
//! One steerable player collects pellets on a wrapping walled grid while a
//! population of wandering chasers multiplies on a fixed schedule. This crate
//! provides:
//! - Bit-exact deterministic runs per seed
//! - A pure headless runner for batch statistics
//! - A terminal frontend for interactive play
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Frontends (TUI / batch)         │
//! ├─────────────────────────────────────┤
//! │     Simulation clock & state        │
//! ├─────────────────────────────────────┤
//! │  Grid topology & collision oracle   │
//! └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod runner;
pub mod sim;

pub use error::{MapError, MapResult};

// Re-export key simulation types at crate root for convenience
pub use runner::{run_sim, RunOutcome, HEADLESS_TIMESTEP};
pub use sim::{
    CaptureRule, Cell, Chaser, Direction, EntityRegistry, Grid, MapLayout, Player, SimConfig,
    Simulation, Status,
};
