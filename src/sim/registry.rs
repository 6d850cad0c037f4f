//! Mutable entity collections and capture/collection resolution.

use crate::sim::{Cell, Chaser};

/// Score awarded for each captured chaser.
pub const CAPTURE_REWARD: u32 = 10;

/// Score awarded for each collected pellet.
pub const PELLET_REWARD: u32 = 1;

/// How capture resolution treats multiple chasers sharing the player's cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureRule {
    /// Remove only the first chaser in collection order; co-located chasers
    /// are captured on subsequent ticks.
    #[default]
    First,
    /// Remove every chaser on the cell in a single resolution.
    All,
}

/// Owns the mutable chaser and pellet collections.
///
/// The chaser collection is ordered and duplicate-tolerant: two chasers may
/// share a cell. It grows only through duplication and shrinks only through
/// capture. The pellet collection only shrinks.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    chasers: Vec<Chaser>,
    pellets: Vec<Cell>,
}

impl EntityRegistry {
    /// Create a registry from initial chaser and pellet placements.
    #[must_use]
    pub const fn new(chasers: Vec<Chaser>, pellets: Vec<Cell>) -> Self {
        Self { chasers, pellets }
    }

    /// The chasers, in collection order.
    #[must_use]
    pub fn chasers(&self) -> &[Chaser] {
        &self.chasers
    }

    /// Mutable access for the per-tick movement pass.
    pub(crate) fn chasers_mut(&mut self) -> &mut [Chaser] {
        &mut self.chasers
    }

    /// The pellets still on the grid.
    #[must_use]
    pub fn pellets(&self) -> &[Cell] {
        &self.pellets
    }

    /// Current chaser population.
    #[must_use]
    pub fn chaser_count(&self) -> usize {
        self.chasers.len()
    }

    /// Pellets remaining.
    #[must_use]
    pub fn pellet_count(&self) -> usize {
        self.pellets.len()
    }

    /// Remove chasers whose position equals `cell`, per `rule`.
    ///
    /// Returns how many chasers were removed (each one is worth
    /// [`CAPTURE_REWARD`] to the caller).
    pub fn capture_at(&mut self, cell: Cell, rule: CaptureRule) -> usize {
        match rule {
            CaptureRule::First => {
                if let Some(idx) = self.chasers.iter().position(|c| c.pos == cell) {
                    self.chasers.remove(idx);
                    1
                } else {
                    0
                }
            }
            CaptureRule::All => {
                let before = self.chasers.len();
                self.chasers.retain(|c| c.pos != cell);
                before - self.chasers.len()
            }
        }
    }

    /// Remove the pellet at `cell`, if one exists.
    ///
    /// At most one pellet occupies a cell, so at most one removal occurs.
    /// Returns whether a pellet was collected (worth [`PELLET_REWARD`]).
    pub fn collect_at(&mut self, cell: Cell) -> bool {
        if let Some(idx) = self.pellets.iter().position(|&p| p == cell) {
            self.pellets.remove(idx);
            true
        } else {
            false
        }
    }

    /// Append one copy of every chaser, preserving position and heading.
    ///
    /// Doubling is unconditional: the population exactly doubles on every
    /// invocation regardless of its size.
    pub fn duplicate_all(&mut self) {
        self.chasers.extend_from_within(..);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Direction;

    fn chaser(x: u16, y: u16) -> Chaser {
        Chaser::new(Cell::new(x, y), Direction::Right)
    }

    #[test]
    fn test_duplicate_all_doubles() {
        for k in [0usize, 1, 3, 8] {
            let chasers = (0..k).map(|i| chaser(u16::try_from(i).unwrap(), 0)).collect();
            let mut registry = EntityRegistry::new(chasers, Vec::new());
            registry.duplicate_all();
            assert_eq!(registry.chaser_count(), 2 * k);
        }
    }

    #[test]
    fn test_duplicates_preserve_position_and_heading() {
        let mut registry = EntityRegistry::new(vec![chaser(2, 3)], Vec::new());
        registry.duplicate_all();

        assert_eq!(registry.chasers()[1].pos, Cell::new(2, 3));
        assert_eq!(registry.chasers()[1].dir, Direction::Right);
    }

    #[test]
    fn test_capture_first_removes_one() {
        let mut registry =
            EntityRegistry::new(vec![chaser(1, 1), chaser(1, 1), chaser(2, 2)], Vec::new());

        assert_eq!(registry.capture_at(Cell::new(1, 1), CaptureRule::First), 1);
        assert_eq!(registry.chaser_count(), 2);
        // The second co-located chaser survives until the next resolution.
        assert_eq!(registry.capture_at(Cell::new(1, 1), CaptureRule::First), 1);
        assert_eq!(registry.capture_at(Cell::new(1, 1), CaptureRule::First), 0);
        assert_eq!(registry.chaser_count(), 1);
    }

    #[test]
    fn test_capture_all_removes_every_overlap() {
        let mut registry =
            EntityRegistry::new(vec![chaser(1, 1), chaser(1, 1), chaser(2, 2)], Vec::new());

        assert_eq!(registry.capture_at(Cell::new(1, 1), CaptureRule::All), 2);
        assert_eq!(registry.chaser_count(), 1);
    }

    #[test]
    fn test_capture_preserves_collection_order() {
        let mut registry =
            EntityRegistry::new(vec![chaser(0, 0), chaser(1, 1), chaser(2, 2)], Vec::new());

        registry.capture_at(Cell::new(1, 1), CaptureRule::First);
        assert_eq!(registry.chasers()[0].pos, Cell::new(0, 0));
        assert_eq!(registry.chasers()[1].pos, Cell::new(2, 2));
    }

    #[test]
    fn test_collect_removes_exactly_one() {
        let mut registry = EntityRegistry::new(Vec::new(), vec![Cell::new(1, 1), Cell::new(2, 2)]);

        assert!(registry.collect_at(Cell::new(1, 1)));
        assert!(!registry.collect_at(Cell::new(1, 1)));
        assert_eq!(registry.pellet_count(), 1);
    }

    #[test]
    fn test_empty_population_stays_empty() {
        let mut registry = EntityRegistry::new(Vec::new(), Vec::new());
        registry.duplicate_all();
        assert_eq!(registry.chaser_count(), 0);
    }
}
