#![forbid(unsafe_code)]

//! Ordered cell sequences.
//!
//! A [`Pattern`] is both what the user traces and what the lock expects.
//! Two patterns match only under strict ordered equality: same length, same
//! cell at every position. Revisiting a cell later in the sequence is
//! allowed; only *consecutive* repeats are collapsed while tracing.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::cell::{Cell, CellError};

/// An ordered sequence of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Pattern(Vec<Cell>);

impl Pattern {
    /// Create an empty pattern.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a pattern from raw indices, failing on the first invalid one.
    pub fn from_indices(indices: &[u8]) -> Result<Self, CellError> {
        indices
            .iter()
            .map(|&i| Cell::try_from(i))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Append `cell` unless it equals the last entry.
    ///
    /// Returns `true` if the pattern grew.
    pub fn push_distinct(&mut self, cell: Cell) -> bool {
        if self.0.last() == Some(&cell) {
            return false;
        }
        self.0.push(cell);
        true
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Strict ordered equality against an expected pattern.
    #[inline]
    #[must_use]
    pub fn matches(&self, expected: &Pattern) -> bool {
        self.0.len() == expected.0.len() && self.0.iter().zip(&expected.0).all(|(a, b)| a == b)
    }

    /// Whether `cell` appears anywhere in the pattern.
    #[must_use]
    pub fn contains_cell(&self, cell: Cell) -> bool {
        self.0.contains(&cell)
    }

    /// Consecutive `(from, to)` pairs, one per drawn line.
    pub fn edges(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Positions `i` where entry `i` repeats entry `i - 1`.
    ///
    /// A traced pattern never has any; an expected pattern with one can never
    /// be traced.
    pub fn consecutive_repeats(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[0] == w[1])
            .map(|(i, _)| i + 1)
    }

    /// Raw 1-based indices.
    #[must_use]
    pub fn to_indices(&self) -> Vec<u8> {
        self.0.iter().map(|c| c.index()).collect()
    }
}

impl Deref for Pattern {
    type Target = [Cell];

    fn deref(&self) -> &[Cell] {
        &self.0
    }
}

impl From<Vec<Cell>> for Pattern {
    fn from(cells: Vec<Cell>) -> Self {
        Self(cells)
    }
}

impl FromIterator<Cell> for Pattern {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parses `"2,6,8,4,2"`, `"2-6-8-4-2"` or `"2 6 8 4 2"`.
///
/// A `-` must sit between two cells, so `"2,-3"` and `"2--3"` are rejected.
impl FromStr for Pattern {
    type Err = CellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::new();
        for token in s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
        {
            for part in token.split('-') {
                if part.is_empty() {
                    return Err(CellError::Parse(token.to_string()));
                }
                cells.push(part.parse::<Cell>()?);
            }
        }
        Ok(Self(cells))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}
