//! One-shot queries: map a point to a cell, and show an effective config.

use patternlock_core::{Cell, GridLayout, PatternConfig, Point};
use serde::Serialize;

use crate::error::{CliError, Result};

/// Where a point lands on the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellLookup {
    pub cell: Cell,
    pub row: u8,
    pub col: u8,
    pub center: Point,
}

/// Map `point` on a `width` x `height` grid.
pub fn lookup_cell(width: f32, height: f32, point: Point) -> Result<CellLookup> {
    let layout = GridLayout::new(width, height);
    let cell = layout.cell_at(point).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "grid must have positive width and height, got {width}x{height}"
        ))
    })?;
    Ok(CellLookup {
        cell,
        row: cell.row(),
        col: cell.col(),
        center: layout.cell_center(cell),
    })
}

/// Flattened view of a config for printing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSummary {
    pub correct_pattern: Vec<u8>,
    pub reset_delay_ms: u64,
    pub error_message: String,
}

impl From<&PatternConfig> for ConfigSummary {
    fn from(config: &PatternConfig) -> Self {
        Self {
            correct_pattern: config.correct_pattern.to_indices(),
            reset_delay_ms: u64::try_from(config.reset_delay.as_millis()).unwrap_or(u64::MAX),
            error_message: config.error_message.clone(),
        }
    }
}

/// Parse a `WIDTHxHEIGHT` layout argument such as `320x320`.
pub fn parse_layout(s: &str) -> std::result::Result<GridLayout, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let width: f32 = w.trim().parse().map_err(|_| format!("bad width {w:?}"))?;
    let height: f32 = h.trim().parse().map_err(|_| format!("bad height {h:?}"))?;
    let layout = GridLayout::new(width, height);
    if layout.is_measured() {
        Ok(layout)
    } else {
        Err(format!("layout {s:?} must have positive width and height"))
    }
}
