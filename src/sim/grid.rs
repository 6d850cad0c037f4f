//! Grid topology: cells, directions, walls, and junctions.

use std::collections::HashSet;

use crate::error::{MapError, MapResult};

/// The bundled 15x15 map shipped with the binary.
pub const STANDARD_MAP: &str = include_str!("../../maps/standard.txt");

/// Map symbol for a wall cell.
const WALL: char = '0';
/// Map symbol for a pellet cell.
const PELLET: char = '1';
/// Map symbol for a chaser spawn cell.
const CHASER: char = '2';
/// Map symbol for plain traversable floor.
const FLOOR: char = ' ';

/// A coordinate on the wrapping grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Cell {
    /// Create a new cell coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// One of the four movement directions.
///
/// `Down` points toward increasing `y`, matching map-text row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward increasing x.
    Right,
    /// Toward decreasing x.
    Left,
    /// Toward increasing y.
    Down,
    /// Toward decreasing y.
    Up,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// The exact reverse of this direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }
}

/// Immutable grid topology: extent, wall set, and derived junction set.
///
/// Built once at load time. Junctions are cells from which more than two of
/// the four directions lead to non-wall cells, using the same wrap-and-collide
/// test as runtime movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    walls: HashSet<Cell>,
    junctions: HashSet<Cell>,
}

impl Grid {
    /// Build a grid from an explicit wall set.
    ///
    /// `width` and `height` must be nonzero; `MapLayout::parse` guarantees
    /// this for maps loaded from text.
    #[must_use]
    pub fn from_walls(width: u16, height: u16, walls: impl IntoIterator<Item = Cell>) -> Self {
        debug_assert!(width > 0 && height > 0);
        let mut grid = Self {
            width,
            height,
            walls: walls.into_iter().collect(),
            junctions: HashSet::new(),
        };

        // Scan every cell, walls included; chasers never stand on a wall, so
        // wall junctions are inert and the set stays a pure function of the
        // wall set.
        for y in 0..height {
            for x in 0..width {
                let cell = Cell::new(x, y);
                if grid.open_exits(cell) > 2 {
                    grid.junctions.insert(cell);
                }
            }
        }

        grid
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Check whether a coordinate lies within the grid extent.
    #[must_use]
    pub const fn in_bounds(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// The wrapped neighbor of `cell` one step in `dir`.
    ///
    /// Movement has no true boundary: stepping off an edge lands on the
    /// opposite edge.
    #[must_use]
    pub const fn step(&self, cell: Cell, dir: Direction) -> Cell {
        let Cell { x, y } = cell;
        match dir {
            Direction::Right => Cell::new(if x + 1 == self.width { 0 } else { x + 1 }, y),
            Direction::Left => Cell::new(if x == 0 { self.width - 1 } else { x - 1 }, y),
            Direction::Down => Cell::new(x, if y + 1 == self.height { 0 } else { y + 1 }),
            Direction::Up => Cell::new(x, if y == 0 { self.height - 1 } else { y - 1 }),
        }
    }

    /// Check whether a cell is a wall.
    #[must_use]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    /// Collision oracle: would a move from `cell` in `dir` land on a wall?
    ///
    /// This predicate is the sole legality authority for every entity's
    /// movement. Side-effect-free, safe to call speculatively.
    #[must_use]
    pub fn will_collide(&self, cell: Cell, dir: Direction) -> bool {
        self.is_wall(self.step(cell, dir))
    }

    /// Number of directions from `cell` that lead to a non-wall cell.
    #[must_use]
    pub fn open_exits(&self, cell: Cell) -> u8 {
        let mut count = 0;
        for dir in Direction::ALL {
            if !self.will_collide(cell, dir) {
                count += 1;
            }
        }
        count
    }

    /// Check whether a cell is a junction (more than two open exits).
    #[must_use]
    pub fn is_junction(&self, cell: Cell) -> bool {
        self.junctions.contains(&cell)
    }
}

/// A parsed map: the grid topology plus the initial entity placements.
#[derive(Debug, Clone)]
pub struct MapLayout {
    /// The immutable grid topology.
    pub grid: Grid,
    /// Cells holding a pellet at the start of a run.
    pub pellets: Vec<Cell>,
    /// Cells where a chaser spawns at the start of a run.
    pub chaser_spawns: Vec<Cell>,
}

impl MapLayout {
    /// Parse a textual map: one character per cell, rows newline-separated.
    ///
    /// Recognized symbols: `0` wall, `1` pellet, `2` chaser spawn, space for
    /// plain floor. Rows are scanned in row-major order; pellets and spawns
    /// keep that order in their collections.
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] if the map is empty, a row's length differs
    /// from the first row's, a symbol is outside the alphabet, or the map
    /// exceeds the supported extent.
    pub fn parse(text: &str) -> MapResult<Self> {
        let rows: Vec<&str> = text.lines().map(|line| line.trim_end_matches('\r')).collect();
        if rows.is_empty() {
            return Err(MapError::Empty);
        }

        let expected = rows[0].chars().count();
        if expected == 0 {
            return Err(MapError::Empty);
        }

        let (Ok(width), Ok(height)) = (u16::try_from(expected), u16::try_from(rows.len())) else {
            return Err(MapError::TooLarge {
                rows: rows.len(),
                cols: expected,
            });
        };

        let mut walls = HashSet::new();
        let mut pellets = Vec::new();
        let mut chaser_spawns = Vec::new();

        let mut y: u16 = 0;
        for (row_idx, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != expected {
                return Err(MapError::JaggedRow {
                    row: row_idx,
                    len,
                    expected,
                });
            }

            let mut x: u16 = 0;
            for (col, symbol) in line.chars().enumerate() {
                let cell = Cell::new(x, y);
                match symbol {
                    WALL => {
                        walls.insert(cell);
                    }
                    PELLET => pellets.push(cell),
                    CHASER => chaser_spawns.push(cell),
                    FLOOR => {}
                    _ => {
                        return Err(MapError::UnknownSymbol {
                            row: row_idx,
                            col,
                            symbol,
                        });
                    }
                }
                x += 1;
            }
            y += 1;
        }

        Ok(Self {
            grid: Grid::from_walls(width, height, walls),
            pellets,
            chaser_spawns,
        })
    }
}
