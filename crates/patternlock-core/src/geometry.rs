#![forbid(unsafe_code)]

//! Geometric primitives for the unlock grid.
//!
//! All coordinates are grid-local pixels with the origin at the top-left
//! corner of the grid's bounding box.

use crate::cell::{Cell, GRID_DIM};

/// A pointer position in grid-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The top-left corner of the grid.
    pub const ORIGIN: Point = Point::new(0.0, 0.0);
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Measured size of the grid's bounding box.
///
/// Supplied by whatever lays out the grid, possibly several times as the
/// screen resizes. A layout is *measured* only when both dimensions are
/// positive and finite; before that every mapping request is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl GridLayout {
    /// A layout that has not been measured yet.
    pub const UNMEASURED: GridLayout = GridLayout::new(0.0, 0.0);

    /// Create a new layout.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether the layout can be used to map coordinates.
    #[inline]
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Width of a single cell.
    #[inline]
    #[must_use]
    pub fn cell_width(&self) -> f32 {
        self.width / f32::from(GRID_DIM)
    }

    /// Height of a single cell.
    #[inline]
    #[must_use]
    pub fn cell_height(&self) -> f32 {
        self.height / f32::from(GRID_DIM)
    }

    /// Map a point to the cell under it.
    ///
    /// Rows and columns are clamped to the grid, so a pointer that strays
    /// past the edge during a fast drag still lands on the nearest edge
    /// cell. Returns `None` only when the layout is unmeasured.
    #[must_use]
    pub fn cell_at(&self, point: Point) -> Option<Cell> {
        if !self.is_measured() {
            return None;
        }
        let col = clamp_axis(point.x / self.cell_width());
        let row = clamp_axis(point.y / self.cell_height());
        Cell::from_row_col(row, col)
    }

    /// Pixel center of a cell.
    ///
    /// Inverse of [`cell_at`](Self::cell_at). An unmeasured layout yields
    /// the origin.
    #[must_use]
    pub fn cell_center(&self, cell: Cell) -> Point {
        if !self.is_measured() {
            return Point::ORIGIN;
        }
        let (w, h) = (self.cell_width(), self.cell_height());
        Point::new(
            f32::from(cell.col()) * w + w / 2.0,
            f32::from(cell.row()) * h + h / 2.0,
        )
    }

    /// Segment joining the centers of two cells.
    #[must_use]
    pub fn segment(&self, from: Cell, to: Cell) -> LineSegment {
        LineSegment {
            start: self.cell_center(from),
            end: self.cell_center(to),
        }
    }
}

/// Floor a fractional row/column and clamp it to `0..GRID_DIM`.
///
/// `as` saturates, so NaN lands on 0 and infinities on the nearest edge.
#[inline]
fn clamp_axis(fraction: f32) -> u8 {
    let raw = fraction.floor() as i32;
    raw.clamp(0, i32::from(GRID_DIM) - 1) as u8
}

/// A straight line between two cell centers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    /// Euclidean length in pixels.
    #[must_use]
    pub fn length(&self) -> f32 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        dx.hypot(dy)
    }

    /// Rotation in degrees, clockwise from the positive x axis (y grows down).
    #[must_use]
    pub fn angle_degrees(&self) -> f32 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        dy.atan2(dx).to_degrees()
    }
}
