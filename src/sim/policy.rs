//! Chaser wander policy.
//!
//! Memoryless, per-tick, local: no path planning, no pursuit of the player,
//! no coordination between chasers.

use crate::sim::{Chaser, Direction, Grid};

/// Maximum random redraws before falling back to a deterministic sweep.
const REDRAW_LIMIT: u32 = 16;

/// Choose a chaser's direction for the upcoming tick.
///
/// The current heading is kept unless it is blocked by a wall, or the chaser
/// sits on a junction and a fair coin says to reconsider. A re-decision draws
/// uniformly from the four directions — excluding the exact reverse with
/// probability 2/3 — and rejects draws that would collide.
///
/// The returned direction never collides when the chaser's cell has at least
/// one open exit. On a fully sealed cell the current heading is returned
/// unchanged and the movement gate turns the tick into a no-op.
pub fn next_direction(grid: &Grid, rng: &mut fastrand::Rng, chaser: Chaser) -> Direction {
    if !grid.will_collide(chaser.pos, chaser.dir)
        && !(grid.is_junction(chaser.pos) && rng.bool())
    {
        return chaser.dir;
    }

    // Backtracking is deprioritized, not forbidden: the reverse stays
    // eligible one time in three.
    let reverse = chaser.dir.opposite();
    let exclude_reverse = rng.u8(..3) != 0;

    // Fixed-size candidate set, no heap allocation.
    let mut candidates = [chaser.dir; 4];
    let mut count = 0;
    for dir in Direction::ALL {
        if !(exclude_reverse && dir == reverse) {
            candidates[count] = dir;
            count += 1;
        }
    }

    for _ in 0..REDRAW_LIMIT {
        let dir = candidates[rng.usize(..count)];
        if !grid.will_collide(chaser.pos, dir) {
            return dir;
        }
    }

    // Redraws exhausted: the candidate set may hold no open exit (e.g. the
    // only opening is the excluded reverse). Sweep all four directions in
    // fixed order before giving up and staying on the current heading.
    Direction::ALL
        .into_iter()
        .find(|&dir| !grid.will_collide(chaser.pos, dir))
        .unwrap_or(chaser.dir)
}
