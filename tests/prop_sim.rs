//! Property-based tests for the simulation core.
//!
//! These verify the collision oracle, junction derivation, the wander
//! policy's safety postcondition, and the registry laws.
//!
//! Run with: cargo test --release prop_sim

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::time::Duration;

use proptest::prelude::*;

use mazechase::sim::{
    CaptureRule, Cell, Chaser, Direction, EntityRegistry, Grid, MapLayout, STANDARD_MAP,
    SimConfig, Simulation, check_invariants, policy,
};

/// Build a grid from a wall bitmap laid out row-major over `width x height`.
fn grid_from_bitmap(width: u16, height: u16, bitmap: &[bool]) -> Grid {
    let mut walls = HashSet::new();
    for y in 0..height {
        for x in 0..width {
            let idx = usize::from(y) * usize::from(width) + usize::from(x);
            if bitmap.get(idx).copied().unwrap_or(false) {
                walls.insert(Cell::new(x, y));
            }
        }
    }
    Grid::from_walls(width, height, walls)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// The oracle agrees with "wrapped destination is a wall" everywhere.
    #[test]
    fn prop_oracle_matches_wall_set(
        width in 2u16..9,
        height in 2u16..9,
        bitmap in prop::collection::vec(any::<bool>(), 4..81)
    ) {
        let grid = grid_from_bitmap(width, height, &bitmap);

        for y in 0..height {
            for x in 0..width {
                let cell = Cell::new(x, y);
                for dir in Direction::ALL {
                    prop_assert_eq!(
                        grid.will_collide(cell, dir),
                        grid.is_wall(grid.step(cell, dir))
                    );
                }
            }
        }
    }

    /// Stepping never leaves the grid, in any direction, from any cell.
    #[test]
    fn prop_step_stays_in_bounds(
        width in 1u16..20,
        height in 1u16..20,
        x in 0u16..20,
        y in 0u16..20
    ) {
        let grid = Grid::from_walls(width, height, HashSet::new());
        let cell = Cell::new(x % width, y % height);

        for dir in Direction::ALL {
            prop_assert!(grid.in_bounds(grid.step(cell, dir)));
        }
    }

    /// A step and its opposite cancel out on the torus.
    #[test]
    fn prop_opposite_step_returns_home(
        width in 1u16..20,
        height in 1u16..20,
        x in 0u16..20,
        y in 0u16..20
    ) {
        let grid = Grid::from_walls(width, height, HashSet::new());
        let cell = Cell::new(x % width, y % height);

        for dir in Direction::ALL {
            prop_assert_eq!(grid.step(grid.step(cell, dir), dir.opposite()), cell);
        }
    }

    /// Junction derivation is a pure function of the wall set, and matches
    /// the more-than-two-open-exits rule cell by cell.
    #[test]
    fn prop_junctions_deterministic_and_correct(
        width in 2u16..9,
        height in 2u16..9,
        bitmap in prop::collection::vec(any::<bool>(), 4..81)
    ) {
        let grid = grid_from_bitmap(width, height, &bitmap);
        let again = grid_from_bitmap(width, height, &bitmap);
        prop_assert_eq!(&grid, &again);

        for y in 0..height {
            for x in 0..width {
                let cell = Cell::new(x, y);
                prop_assert_eq!(grid.is_junction(cell), grid.open_exits(cell) > 2);
            }
        }
    }

    /// The policy never picks a colliding direction from a cell with at
    /// least one open exit.
    #[test]
    fn prop_policy_is_safe(
        width in 2u16..9,
        height in 2u16..9,
        bitmap in prop::collection::vec(any::<bool>(), 4..81),
        x in 0u16..9,
        y in 0u16..9,
        dir_idx in 0usize..4,
        seed in any::<u64>()
    ) {
        let grid = grid_from_bitmap(width, height, &bitmap);
        let pos = Cell::new(x % width, y % height);
        prop_assume!(!grid.is_wall(pos));
        prop_assume!(grid.open_exits(pos) > 0);

        let chaser = Chaser::new(pos, Direction::ALL[dir_idx]);
        let mut rng = fastrand::Rng::with_seed(seed);
        let chosen = policy::next_direction(&grid, &mut rng, chaser);

        prop_assert!(
            !grid.will_collide(pos, chosen),
            "policy chose {chosen:?} into a wall from ({}, {})",
            pos.x, pos.y
        );
    }

    /// Doubling law: duplication takes any population of size k to 2k.
    #[test]
    fn prop_duplicate_all_doubles(k in 0usize..300) {
        let chasers = (0..k)
            .map(|i| Chaser::new(Cell::new(u16::try_from(i % 7).unwrap(), 0), Direction::Down))
            .collect();
        let mut registry = EntityRegistry::new(chasers, Vec::new());

        registry.duplicate_all();
        prop_assert_eq!(registry.chaser_count(), 2 * k);
    }

    /// First-capture removes at most one chaser; all-capture removes every
    /// chaser on the cell and nothing else.
    #[test]
    fn prop_capture_rules(
        positions in prop::collection::vec((0u16..4, 0u16..4), 0..30),
        target in (0u16..4, 0u16..4)
    ) {
        let target = Cell::new(target.0, target.1);
        let chasers: Vec<Chaser> = positions
            .iter()
            .map(|&(x, y)| Chaser::new(Cell::new(x, y), Direction::Up))
            .collect();
        let overlapping = chasers.iter().filter(|c| c.pos == target).count();

        let mut first = EntityRegistry::new(chasers.clone(), Vec::new());
        let removed = first.capture_at(target, CaptureRule::First);
        prop_assert!(removed <= 1);
        prop_assert_eq!(removed, usize::from(overlapping > 0));
        prop_assert_eq!(first.chaser_count(), chasers.len() - removed);

        let mut all = EntityRegistry::new(chasers.clone(), Vec::new());
        let removed = all.capture_at(target, CaptureRule::All);
        prop_assert_eq!(removed, overlapping);
        prop_assert_eq!(all.chaser_count(), chasers.len() - overlapping);
        prop_assert!(all.chasers().iter().all(|c| c.pos != target));
    }

    /// Collection removes at most one pellet per call.
    #[test]
    fn prop_collect_at_most_one(
        pellets in prop::collection::vec((0u16..4, 0u16..4), 0..20),
        target in (0u16..4, 0u16..4)
    ) {
        let target = Cell::new(target.0, target.1);
        let pellets: Vec<Cell> = pellets.iter().map(|&(x, y)| Cell::new(x, y)).collect();
        let had_pellet = pellets.contains(&target);

        let mut registry = EntityRegistry::new(Vec::new(), pellets.clone());
        let collected = registry.collect_at(target);

        prop_assert_eq!(collected, had_pellet);
        prop_assert_eq!(
            registry.pellet_count(),
            pellets.len() - usize::from(collected)
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Whole runs on the bundled map keep every invariant, for arbitrary
    /// seeds and steering schedules.
    #[test]
    fn prop_run_holds_invariants(
        seed in any::<u64>(),
        steers in prop::collection::vec(0usize..4, 1..40)
    ) {
        let layout = MapLayout::parse(STANDARD_MAP).unwrap();
        let mut sim = Simulation::new(layout, SimConfig::default(), seed).unwrap();

        for &steer in &steers {
            sim.steer(Direction::ALL[steer]);
            sim.step(Duration::from_millis(100));

            let violations = check_invariants(&sim);
            prop_assert!(violations.is_empty(), "{violations:?}");

            if sim.status().is_terminal() {
                break;
            }
        }
    }

    /// Score only grows, pellets only shrink, across arbitrary schedules.
    #[test]
    fn prop_monotonic_score_and_pellets(
        seed in any::<u64>(),
        frames in prop::collection::vec(1u64..200, 1..40)
    ) {
        let layout = MapLayout::parse(STANDARD_MAP).unwrap();
        let mut sim = Simulation::new(layout, SimConfig::default(), seed).unwrap();

        let mut last_score = sim.player().score;
        let mut last_pellets = sim.registry().pellet_count();

        for &millis in &frames {
            sim.step(Duration::from_millis(millis));

            prop_assert!(sim.player().score >= last_score);
            prop_assert!(sim.registry().pellet_count() <= last_pellets);
            last_score = sim.player().score;
            last_pellets = sim.registry().pellet_count();
        }
    }
}
