//! Property-based invariant tests for grid coordinate mapping.
//!
//! These tests verify structural invariants of `GridLayout::cell_at`:
//!
//! 1. Every point on a measured layout maps to a cell in 1..=9
//! 2. Mapping is deterministic
//! 3. Out-of-bounds points map like the nearest in-bounds edge point
//! 4. Cell centers map back to their own cell
//! 5. Unmeasured layouts never map

use patternlock_core::cell::Cell;
use patternlock_core::geometry::{GridLayout, Point};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn layout_strategy() -> impl Strategy<Value = GridLayout> {
    (1.0f32..2000.0, 1.0f32..2000.0).prop_map(|(w, h)| GridLayout::new(w, h))
}

fn unmeasured_strategy() -> impl Strategy<Value = GridLayout> {
    prop_oneof![
        (-2000.0f32..=0.0).prop_map(|w| GridLayout::new(w, 300.0)),
        (-2000.0f32..=0.0).prop_map(|h| GridLayout::new(300.0, h)),
        Just(GridLayout::new(f32::NAN, 300.0)),
        Just(GridLayout::new(300.0, f32::INFINITY)),
    ]
}

/// Nudge an out-of-range coordinate onto the nearest in-bounds value.
fn clamp_into(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        0.0
    } else if value >= extent {
        // Largest representable value still inside the last cell.
        extent * (1.0 - f32::EPSILON * 4.0)
    } else {
        value
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 1–2. Range and determinism
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn in_bounds_point_maps_to_valid_cell(
        layout in layout_strategy(),
        fx in 0.0f32..1.0,
        fy in 0.0f32..1.0,
    ) {
        let point = Point::new(fx * layout.width, fy * layout.height);
        let cell = layout.cell_at(point);
        prop_assert!(cell.is_some());
        let index = cell.map(Cell::index).unwrap_or(0);
        prop_assert!((1..=9).contains(&index));
    }

    #[test]
    fn mapping_is_deterministic(
        layout in layout_strategy(),
        x in -5000.0f32..5000.0,
        y in -5000.0f32..5000.0,
    ) {
        let point = Point::new(x, y);
        prop_assert_eq!(layout.cell_at(point), layout.cell_at(point));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Clamping
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn out_of_bounds_matches_nearest_edge(
        layout in layout_strategy(),
        x in -5000.0f32..5000.0,
        y in -5000.0f32..5000.0,
    ) {
        let raw = layout.cell_at(Point::new(x, y));
        let clamped = layout.cell_at(Point::new(
            clamp_into(x, layout.width),
            clamp_into(y, layout.height),
        ));
        prop_assert_eq!(raw, clamped);
    }

    #[test]
    fn any_point_maps_on_measured_layout(
        layout in layout_strategy(),
        x in any::<f32>(),
        y in any::<f32>(),
    ) {
        prop_assert!(layout.cell_at(Point::new(x, y)).is_some());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4–5. Centers and unmeasured layouts
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn center_round_trips(layout in layout_strategy(), index in 1u8..=9) {
        let cell = Cell::new(index).unwrap();
        prop_assert_eq!(layout.cell_at(layout.cell_center(cell)), Some(cell));
    }

    #[test]
    fn unmeasured_never_maps(
        layout in unmeasured_strategy(),
        x in -500.0f32..500.0,
        y in -500.0f32..500.0,
    ) {
        prop_assert!(layout.cell_at(Point::new(x, y)).is_none());
    }
}
