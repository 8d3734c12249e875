#![forbid(unsafe_code)]

//! Render-ready snapshot of the lock grid.
//!
//! [`PatternView`] is derived entirely from the layout and the current
//! selection; it holds no state of its own. A renderer draws the nine dots,
//! highlights the active ones, lays a bar along each segment using its
//! length and angle, and shows the error text or the unlocked view.

use crate::cell::Cell;
use crate::geometry::{GridLayout, LineSegment, Point};
use crate::pattern::Pattern;

/// One of the nine grid dots.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DotView {
    pub cell: Cell,
    pub center: Point,
    /// The cell appears somewhere in the selection.
    pub active: bool,
}

/// Everything needed to draw the pattern area.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternView {
    /// All nine dots in row-major order.
    pub dots: Vec<DotView>,
    /// One segment per consecutive pair in the selection.
    pub segments: Vec<LineSegment>,
    pub error: Option<String>,
    pub unlocked: bool,
}

impl PatternView {
    /// Derive the view from recognizer state.
    #[must_use]
    pub fn build(
        layout: GridLayout,
        selected: &Pattern,
        error: Option<&str>,
        unlocked: bool,
    ) -> Self {
        let dots = Cell::ALL
            .iter()
            .map(|&cell| DotView {
                cell,
                center: layout.cell_center(cell),
                active: selected.contains_cell(cell),
            })
            .collect();
        let segments = selected
            .edges()
            .map(|(from, to)| layout.segment(from, to))
            .collect();

        Self {
            dots,
            segments,
            error: error.map(str::to_owned),
            unlocked,
        }
    }

    /// Cells currently highlighted.
    pub fn active_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.dots.iter().filter(|d| d.active).map(|d| d.cell)
    }
}
