#![forbid(unsafe_code)]

//! Gesture input and pattern output events.
//!
//! [`GestureEvent`] is what the host UI toolkit delivers: one `Start`, zero or
//! more `Move`s and one `End` per gesture, serially and in that order.
//! [`PatternEvent`] is what the recognizer reports back.
//!
//! # Invariants
//!
//! 1. Every `CellSelected` within a gesture names a different cell from the
//!    one before it.
//! 2. `Unlocked` is emitted at most once per recognizer.
//! 3. `Rejected` is always followed by exactly one `SelectionCleared`, unless
//!    a new gesture starts first.

use crate::cell::Cell;
use crate::geometry::Point;
use crate::pattern::Pattern;

/// Raw pointer input for one gesture, in grid-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum GestureEvent {
    /// Pointer went down over the grid.
    Start(Point),
    /// Pointer moved while held.
    Move(Point),
    /// Pointer was released.
    End,
}

impl GestureEvent {
    /// Pointer position carried by the event, if any.
    #[must_use]
    pub const fn point(&self) -> Option<Point> {
        match self {
            Self::Start(p) | Self::Move(p) => Some(*p),
            Self::End => None,
        }
    }
}

/// Answer to a host asking whether another responder may take over the
/// current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationResponse {
    /// Keep the gesture; it runs until release.
    Reject,
}

/// What the recognizer observed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "event", rename_all = "snake_case")
)]
pub enum PatternEvent {
    /// A cell was appended to the selection.
    CellSelected {
        cell: Cell,
        /// Zero-based position of the cell within the selection.
        position: usize,
    },
    /// The completed gesture matched the expected pattern.
    Unlocked,
    /// The completed gesture did not match.
    Rejected {
        /// What was traced, kept for display until the reset fires.
        traced: Pattern,
    },
    /// The selection was emptied after a rejection.
    SelectionCleared,
}

impl PatternEvent {
    /// Short stable name, used in logs and CLI output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CellSelected { .. } => "cell_selected",
            Self::Unlocked => "unlocked",
            Self::Rejected { .. } => "rejected",
            Self::SelectionCleared => "selection_cleared",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_accessor() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(GestureEvent::Start(p).point(), Some(p));
        assert_eq!(GestureEvent::Move(p).point(), Some(p));
        assert_eq!(GestureEvent::End.point(), None);
    }

    #[test]
    fn event_names_are_distinct() {
        let events = [
            PatternEvent::CellSelected {
                cell: Cell::new(1).unwrap(),
                position: 0,
            },
            PatternEvent::Unlocked,
            PatternEvent::Rejected {
                traced: Pattern::new(),
            },
            PatternEvent::SelectionCleared,
        ];
        let mut names: Vec<_> = events.iter().map(PatternEvent::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn gesture_event_json_shape() {
        let json = serde_json::to_string(&GestureEvent::Move(Point::new(1.0, 2.0))).unwrap();
        assert_eq!(json, r#"{"kind":"move","x":1.0,"y":2.0}"#);
        let end: GestureEvent = serde_json::from_str(r#"{"kind":"end"}"#).unwrap();
        assert_eq!(end, GestureEvent::End);
    }
}
