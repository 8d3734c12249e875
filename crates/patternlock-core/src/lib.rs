#![forbid(unsafe_code)]

//! Core: pattern-unlock gesture recognition over a 3x3 grid.
//!
//! # Role in patternlock
//! `patternlock-core` is the only part of the lock screen with real state. It
//! turns pointer input delivered by a host UI toolkit into a traced pattern,
//! evaluates that pattern on release, and exposes read-only state for
//! whatever renders the screen.
//!
//! # Primary responsibilities
//! - **GridLayout**: pixel ↔ cell mapping with edge clamping.
//! - **Pattern**: ordered cell sequences with run-length suppression.
//! - **PatternRecognizer**: the `Idle → Tracking → Evaluating` state machine,
//!   including the deferred selection reset after a mismatch.
//! - **PatternView**: a derived snapshot of dots and line segments.
//!
//! # How it fits in the system
//! The host feeds [`event::GestureEvent`] values into
//! [`recognizer::PatternRecognizer::process`] together with the current
//! instant, and polls [`recognizer::PatternRecognizer::check_reset`] from its
//! timer or tick. The recognizer never blocks and never spawns work.

pub mod cell;
pub mod config;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod pattern;
pub mod recognizer;
pub mod reset;
pub mod view;

pub use cell::{Cell, CellError};
pub use config::{PatternConfig, PatternConfigError};
pub use event::{GestureEvent, PatternEvent, TerminationResponse};
pub use geometry::{GridLayout, LineSegment, Point};
pub use pattern::Pattern;
pub use recognizer::{PatternRecognizer, RecognizerPhase};
pub use view::{DotView, PatternView};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, warn};
