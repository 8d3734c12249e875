#![forbid(unsafe_code)]

//! Cell indices on the 3x3 unlock grid.
//!
//! Cells are numbered 1..=9 in row-major order:
//!
//! ```text
//! 1 2 3
//! 4 5 6
//! 7 8 9
//! ```
//!
//! [`Cell`] can only be built through checked constructors, so every value in
//! circulation is a valid index.

use std::fmt;
use std::str::FromStr;

/// Number of rows and columns in the grid.
pub const GRID_DIM: u8 = 3;

/// Total number of cells in the grid.
pub const CELL_COUNT: u8 = GRID_DIM * GRID_DIM;

/// A validated cell index in `1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct Cell(u8);

/// Error produced when a raw index does not name a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CellError {
    #[error("cell index {0} is outside 1..=9")]
    OutOfRange(i64),
    #[error("invalid cell index {0:?}")]
    Parse(String),
}

impl Cell {
    /// Every cell in row-major order.
    pub const ALL: [Cell; CELL_COUNT as usize] = [
        Cell(1),
        Cell(2),
        Cell(3),
        Cell(4),
        Cell(5),
        Cell(6),
        Cell(7),
        Cell(8),
        Cell(9),
    ];

    /// Create a cell from its 1-based index.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index >= 1 && index <= CELL_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Create a cell from a zero-based row and column, each in `0..3`.
    #[must_use]
    pub const fn from_row_col(row: u8, col: u8) -> Option<Self> {
        if row < GRID_DIM && col < GRID_DIM {
            Some(Self(row * GRID_DIM + col + 1))
        } else {
            None
        }
    }

    /// The 1-based index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Zero-based row.
    #[inline]
    #[must_use]
    pub const fn row(self) -> u8 {
        (self.0 - 1) / GRID_DIM
    }

    /// Zero-based column.
    #[inline]
    #[must_use]
    pub const fn col(self) -> u8 {
        (self.0 - 1) % GRID_DIM
    }
}

impl TryFrom<u8> for Cell {
    type Error = CellError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index).ok_or(CellError::OutOfRange(i64::from(index)))
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.0
    }
}

impl FromStr for Cell {
    type Err = CellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let raw: i64 = trimmed
            .parse()
            .map_err(|_| CellError::Parse(trimmed.to_string()))?;
        u8::try_from(raw)
            .ok()
            .and_then(Self::new)
            .ok_or(CellError::OutOfRange(raw))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
