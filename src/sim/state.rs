//! The owning simulation aggregate and its tick loop.

use std::time::Duration;

use serde::Serialize;

use crate::error::{MapError, MapResult};
use crate::sim::{
    CAPTURE_REWARD, CaptureRule, Cell, Chaser, Direction, EntityRegistry, Grid, MapLayout,
    PELLET_REWARD, PeriodicTimer, Player, policy,
};

/// Tunable parameters for one run.
///
/// By default the player advances five cells per second, chasers three, the
/// population doubles every fifteen seconds, and the run is lost at fifty
/// chasers.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Simulation time between player moves.
    pub player_period: Duration,
    /// Simulation time between chaser moves.
    pub chaser_period: Duration,
    /// Simulation time between population duplications.
    pub duplicate_period: Duration,
    /// Chaser population at which the run is lost.
    pub lose_threshold: usize,
    /// Shared-cell capture behavior.
    pub capture_rule: CaptureRule,
    /// The player's spawn cell.
    pub player_spawn: Cell,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            player_period: Duration::from_millis(200),
            chaser_period: Duration::from_millis(333),
            duplicate_period: Duration::from_secs(15),
            lose_threshold: 50,
            capture_rule: CaptureRule::First,
            player_spawn: Cell::new(0, 0),
        }
    }
}

/// Run state. Terminal states absorb: once entered, no further ticks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The run is in progress.
    Running,
    /// Every pellet has been collected.
    Won,
    /// The chaser population reached the lose threshold.
    Lost,
}

impl Status {
    /// Whether this state ends the run.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Status::Running)
    }
}

/// Complete state of one run: grid, entities, timers, RNG, and status.
///
/// There is no ambient global state; every operation goes through this
/// aggregate. A given seed yields a fully deterministic run for a fixed
/// sequence of `step`/`steer` calls.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    registry: EntityRegistry,
    player: Player,
    config: SimConfig,
    status: Status,
    rng: fastrand::Rng,
    player_timer: PeriodicTimer,
    chaser_timer: PeriodicTimer,
    duplicate_timer: PeriodicTimer,
    elapsed: Duration,
}

impl Simulation {
    /// Build a simulation from a parsed map layout.
    ///
    /// The player and every chaser start with a uniformly drawn heading from
    /// the seeded RNG, so runs are reproducible per seed.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::BlockedSpawn`] if the configured player spawn is
    /// out of bounds or lands on a wall.
    pub fn new(layout: MapLayout, config: SimConfig, seed: u64) -> MapResult<Self> {
        let MapLayout {
            grid,
            pellets,
            chaser_spawns,
        } = layout;

        let spawn = config.player_spawn;
        if !grid.in_bounds(spawn) || grid.is_wall(spawn) {
            return Err(MapError::BlockedSpawn { cell: spawn });
        }

        let mut rng = fastrand::Rng::with_seed(seed);
        let player = Player::new(spawn, random_direction(&mut rng));
        let chasers = chaser_spawns
            .into_iter()
            .map(|pos| Chaser::new(pos, random_direction(&mut rng)))
            .collect();

        Ok(Self {
            grid,
            registry: EntityRegistry::new(chasers, pellets),
            player,
            config,
            status: Status::Running,
            rng,
            player_timer: PeriodicTimer::new(config.player_period),
            chaser_timer: PeriodicTimer::new(config.chaser_period),
            duplicate_timer: PeriodicTimer::new(config.duplicate_period),
            elapsed: Duration::ZERO,
        })
    }

    /// The immutable grid topology.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The entity collections.
    #[must_use]
    pub const fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// The configuration this run was built with.
    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Current run state.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Elapsed simulation time.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Steer the player toward `dir`.
    ///
    /// The turn is accepted only if it would not immediately collide from
    /// the player's current cell, using the same oracle as movement.
    /// Returns whether the heading changed.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if self.status.is_terminal() || self.grid.will_collide(self.player.pos, dir) {
            return false;
        }
        self.player.dir = dir;
        true
    }

    /// Advance simulation time by `dt`, processing every due tick.
    ///
    /// Player-move ticks run first, then chaser-move ticks, then duplication
    /// ticks. Every tick is followed by capture resolution, collection
    /// resolution, and the terminal check, in that order; a terminal state
    /// stops tick processing immediately. Resolution also runs once per
    /// frame so an overlap that exists between ticks (notably the player
    /// spawning on a pellet) resolves without waiting for a move tick.
    pub fn step(&mut self, dt: Duration) -> Status {
        if self.status.is_terminal() {
            return self.status;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        let player_ticks = self.player_timer.advance(dt);
        let chaser_ticks = self.chaser_timer.advance(dt);
        let duplicate_ticks = self.duplicate_timer.advance(dt);

        for _ in 0..player_ticks {
            self.move_player();
            if self.resolve().is_terminal() {
                return self.status;
            }
        }

        for _ in 0..chaser_ticks {
            self.move_chasers();
            if self.resolve().is_terminal() {
                return self.status;
            }
        }

        for _ in 0..duplicate_ticks {
            self.registry.duplicate_all();
            if self.resolve().is_terminal() {
                return self.status;
            }
        }

        self.resolve()
    }

    /// Move the player one cell along its heading, if legal.
    fn move_player(&mut self) {
        if !self.grid.will_collide(self.player.pos, self.player.dir) {
            self.player.pos = self.grid.step(self.player.pos, self.player.dir);
        }
    }

    /// Refresh every chaser's heading and advance it one cell.
    ///
    /// Direction and move are coupled per chaser, per tick: each chaser
    /// advances along the direction chosen in this same tick.
    fn move_chasers(&mut self) {
        for i in 0..self.registry.chaser_count() {
            let chaser = self.registry.chasers()[i];
            let dir = policy::next_direction(&self.grid, &mut self.rng, chaser);
            let pos = if self.grid.will_collide(chaser.pos, dir) {
                chaser.pos
            } else {
                self.grid.step(chaser.pos, dir)
            };
            let slot = &mut self.registry.chasers_mut()[i];
            slot.dir = dir;
            slot.pos = pos;
        }
    }

    /// Resolve captures, then collections, then the terminal condition.
    fn resolve(&mut self) -> Status {
        let captured = self.registry.capture_at(self.player.pos, self.config.capture_rule);
        let captured = u32::try_from(captured).unwrap_or(u32::MAX);
        self.player.score = self
            .player
            .score
            .saturating_add(captured.saturating_mul(CAPTURE_REWARD));

        if self.registry.collect_at(self.player.pos) {
            self.player.score += PELLET_REWARD;
        }

        self.status = if self.registry.pellet_count() == 0 {
            Status::Won
        } else if self.registry.chaser_count() >= self.config.lose_threshold {
            Status::Lost
        } else {
            Status::Running
        };
        self.status
    }
}

/// Draw one of the four directions uniformly.
fn random_direction(rng: &mut fastrand::Rng) -> Direction {
    Direction::ALL[rng.usize(..Direction::ALL.len())]
}
