#![no_main]

//! Map parser fuzzer.
//!
//! Feeds arbitrary text through the map parser. Parsing must never panic,
//! and every successfully parsed layout must be internally consistent:
//! uniform extent, pellets and spawns off the walls, and junctions matching
//! the more-than-two-open-exits rule.

use libfuzzer_sys::fuzz_target;
use mazechase::sim::{Cell, MapLayout};

fuzz_target!(|text: &str| {
    // Cap input size to keep junction derivation cheap.
    if text.len() > 4096 {
        return;
    }

    let Ok(layout) = MapLayout::parse(text) else {
        return;
    };

    let grid = &layout.grid;
    assert!(grid.width() > 0 && grid.height() > 0);

    for pellet in &layout.pellets {
        assert!(grid.in_bounds(*pellet), "pellet out of bounds");
        assert!(!grid.is_wall(*pellet), "pellet on a wall");
    }

    for spawn in &layout.chaser_spawns {
        assert!(grid.in_bounds(*spawn), "spawn out of bounds");
        assert!(!grid.is_wall(*spawn), "spawn on a wall");
    }

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = Cell::new(x, y);
            assert_eq!(grid.is_junction(cell), grid.open_exits(cell) > 2);
        }
    }
});
