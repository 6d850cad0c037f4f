//! Error types for map loading.

use std::fmt;

use crate::sim::Cell;

/// Errors raised while parsing a map into a grid topology.
///
/// These are the only fatal errors in the engine: everything after a
/// successful load is an ordinary state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The map text contained no rows.
    Empty,
    /// A row's length differs from the first row's length.
    JaggedRow {
        /// Zero-based row index of the offending row.
        row: usize,
        /// Length of the offending row.
        len: usize,
        /// Length of the first row.
        expected: usize,
    },
    /// A character outside the recognized alphabet.
    UnknownSymbol {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
        /// The unrecognized character.
        symbol: char,
    },
    /// The map exceeds the maximum supported extent.
    TooLarge {
        /// Number of rows in the map text.
        rows: usize,
        /// Length of the first row.
        cols: usize,
    },
    /// The player spawn cell is a wall.
    BlockedSpawn {
        /// The spawn cell that landed on a wall.
        cell: Cell,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Empty => write!(f, "map is empty"),
            MapError::JaggedRow { row, len, expected } => {
                write!(f, "row {row} has length {len}, expected {expected}")
            }
            MapError::UnknownSymbol { row, col, symbol } => {
                write!(f, "unknown map symbol {symbol:?} at row {row}, column {col}")
            }
            MapError::TooLarge { rows, cols } => {
                write!(f, "map of {cols}x{rows} exceeds the maximum supported extent")
            }
            MapError::BlockedSpawn { cell } => {
                write!(f, "player spawn ({}, {}) is a wall", cell.x, cell.y)
            }
        }
    }
}

impl std::error::Error for MapError {}

/// Result type for map loading.
pub type MapResult<T> = Result<T, MapError>;
