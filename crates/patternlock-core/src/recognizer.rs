#![forbid(unsafe_code)]

//! Pattern recognition: turns a gesture's pointer samples into a traced
//! pattern and judges it on release.
//!
//! [`PatternRecognizer`] owns every piece of mutable lock-screen state: the
//! selection being traced, the unlocked flag, the mismatch text, and the
//! pending reset. Hosts mutate it only through [`process`], [`check_reset`]
//! and [`set_layout`], and read it through the observer methods.
//!
//! # State Machine
//!
//! ```text
//!            Start                 End (match)
//!   Idle ───────────▶ Tracking ──────────────▶ Evaluating ──▶ Unlocked
//!    ▲                 │    ▲                      │
//!    │                 └────┘ Move                 │ (mismatch)
//!    └─────────────────────────────────────────────┘
//! ```
//!
//! `Evaluating` only exists for the duration of the `End` handler; hosts
//! never observe it between calls.
//!
//! # Invariants
//!
//! 1. Every selected entry is a valid cell, and no entry equals the one
//!    before it.
//! 2. Evaluation happens on `End` only, never mid-gesture.
//! 3. Once `Unlocked`, every further event is ignored; there is no re-lock.
//! 4. A pending reset never clears the selection of a newer gesture: `Start`
//!    cancels it.
//!
//! # Failure Modes
//!
//! - With an unmeasured layout, `Start` and `Move` map nothing. The gesture
//!   still runs, and its `End` evaluates an empty selection (a mismatch).
//! - `Move` or `End` without a preceding `Start` is ignored.
//! - A `Start` while already tracking abandons the old gesture unevaluated
//!   and begins a new one.
//!
//! [`process`]: PatternRecognizer::process
//! [`check_reset`]: PatternRecognizer::check_reset
//! [`set_layout`]: PatternRecognizer::set_layout

use web_time::Instant;

use crate::config::PatternConfig;
use crate::event::{GestureEvent, PatternEvent, TerminationResponse};
use crate::geometry::{GridLayout, Point};
use crate::pattern::Pattern;
use crate::reset::ResetSchedule;
use crate::view::PatternView;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Where the recognizer is in its gesture lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognizerPhase {
    /// No gesture in progress.
    Idle,
    /// A gesture is being traced.
    Tracking,
    /// The released gesture is being compared. Transient.
    Evaluating,
    /// The correct pattern was traced. Terminal.
    Unlocked,
}

// ---------------------------------------------------------------------------
// PatternRecognizer
// ---------------------------------------------------------------------------

/// Stateful recognizer for the 3x3 unlock gesture.
///
/// Call [`process`](PatternRecognizer::process) for each incoming
/// [`GestureEvent`]. Call [`check_reset`](PatternRecognizer::check_reset)
/// periodically (e.g., on tick), or when
/// [`next_reset_deadline`](PatternRecognizer::next_reset_deadline) passes,
/// to clear a rejected path.
pub struct PatternRecognizer {
    config: PatternConfig,
    layout: GridLayout,
    phase: RecognizerPhase,
    selected: Pattern,
    error: Option<String>,
    reset: ResetSchedule,
}

impl std::fmt::Debug for PatternRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternRecognizer")
            .field("phase", &self.phase)
            .field("selected_len", &self.selected.len())
            .field("reset_pending", &self.reset.is_pending())
            .finish()
    }
}

impl Default for PatternRecognizer {
    fn default() -> Self {
        Self::new(PatternConfig::default())
    }
}

impl PatternRecognizer {
    /// Create a recognizer with the given configuration and no layout yet.
    #[must_use]
    pub fn new(config: PatternConfig) -> Self {
        Self {
            config,
            layout: GridLayout::UNMEASURED,
            phase: RecognizerPhase::Idle,
            selected: Pattern::new(),
            error: None,
            reset: ResetSchedule::new(),
        }
    }

    /// Create a recognizer that already knows its grid size.
    #[must_use]
    pub fn with_layout(config: PatternConfig, layout: GridLayout) -> Self {
        let mut recognizer = Self::new(config);
        recognizer.layout = layout;
        recognizer
    }

    /// Process one gesture event, returning any pattern events produced.
    ///
    /// An overdue reset is applied first, so its `SelectionCleared` (if any)
    /// precedes the events caused by `event`.
    pub fn process(&mut self, event: &GestureEvent, now: Instant) -> Vec<PatternEvent> {
        let mut out = Vec::with_capacity(2);

        if let Some(cleared) = self.check_reset(now) {
            out.push(cleared);
        }

        if self.phase == RecognizerPhase::Unlocked {
            #[cfg(feature = "tracing")]
            tracing::trace!(?event, "ignoring gesture event after unlock");
            return out;
        }

        match *event {
            GestureEvent::Start(point) => self.on_start(point, &mut out),
            GestureEvent::Move(point) => self.on_move(point, &mut out),
            GestureEvent::End => self.on_end(now, &mut out),
        }

        out
    }

    /// Apply the pending reset if it is due.
    ///
    /// Returns `Some(SelectionCleared)` exactly once per rejected gesture,
    /// unless a new gesture started before the deadline.
    pub fn check_reset(&mut self, now: Instant) -> Option<PatternEvent> {
        if self.reset.poll(now) {
            Some(self.clear_selection())
        } else {
            None
        }
    }

    /// Apply the pending reset if `generation` still names it.
    ///
    /// For hosts that arm a one-shot timer with
    /// [`reset_generation`](Self::reset_generation) instead of polling.
    pub fn fire_reset(&mut self, generation: u64) -> Option<PatternEvent> {
        if self.reset.fire(generation) {
            Some(self.clear_selection())
        } else {
            None
        }
    }

    /// When the pending reset is due, if one is pending.
    #[inline]
    #[must_use]
    pub fn next_reset_deadline(&self) -> Option<Instant> {
        self.reset.deadline()
    }

    /// Generation of the pending reset, if one is pending.
    #[must_use]
    pub fn reset_generation(&self) -> Option<u64> {
        self.reset.is_pending().then(|| self.reset.generation())
    }

    /// Another responder wants the gesture. Always refused.
    pub fn on_termination_request(&self) -> TerminationResponse {
        #[cfg(feature = "tracing")]
        tracing::trace!(phase = ?self.phase, "termination request rejected");
        TerminationResponse::Reject
    }

    /// Record the measured grid size. May be called again on resize.
    pub fn set_layout(&mut self, layout: GridLayout) {
        #[cfg(feature = "tracing")]
        tracing::trace!(width = layout.width, height = layout.height, "grid layout updated");
        self.layout = layout;
    }

    /// The grid size in use.
    #[inline]
    #[must_use]
    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// The path traced so far (or the rejected path until it is reset).
    #[inline]
    #[must_use]
    pub fn selected(&self) -> &Pattern {
        &self.selected
    }

    /// Whether the correct pattern has been traced.
    #[inline]
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.phase == RecognizerPhase::Unlocked
    }

    /// Mismatch feedback, cleared when the next gesture starts.
    #[inline]
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current lifecycle phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> RecognizerPhase {
        self.phase
    }

    /// Whether a gesture is being traced.
    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.phase == RecognizerPhase::Tracking
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Snapshot of everything a renderer needs.
    #[must_use]
    pub fn view(&self) -> PatternView {
        PatternView::build(
            self.layout,
            &self.selected,
            self.error.as_deref(),
            self.is_unlocked(),
        )
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl PatternRecognizer {
    fn on_start(&mut self, point: Point, out: &mut Vec<PatternEvent>) {
        if self.reset.cancel() {
            #[cfg(feature = "tracing")]
            tracing::debug!("pending reset superseded by new gesture");
        }
        #[cfg(feature = "tracing")]
        if self.phase == RecognizerPhase::Tracking {
            tracing::trace!(
                abandoned_len = self.selected.len(),
                "start while tracking; abandoning previous gesture"
            );
        }

        self.error = None;
        self.selected.clear();
        self.phase = RecognizerPhase::Tracking;
        self.sample(point, out);
    }

    fn on_move(&mut self, point: Point, out: &mut Vec<PatternEvent>) {
        if self.phase != RecognizerPhase::Tracking {
            #[cfg(feature = "tracing")]
            tracing::trace!(phase = ?self.phase, "move outside a gesture ignored");
            return;
        }
        self.sample(point, out);
    }

    fn on_end(&mut self, now: Instant, out: &mut Vec<PatternEvent>) {
        if self.phase != RecognizerPhase::Tracking {
            #[cfg(feature = "tracing")]
            tracing::trace!(phase = ?self.phase, "end outside a gesture ignored");
            return;
        }

        self.phase = RecognizerPhase::Evaluating;
        if self.selected.matches(&self.config.correct_pattern) {
            self.phase = RecognizerPhase::Unlocked;
            self.error = None;
            #[cfg(feature = "tracing")]
            tracing::info!(len = self.selected.len(), "pattern accepted; unlocked");
            out.push(PatternEvent::Unlocked);
        } else {
            self.phase = RecognizerPhase::Idle;
            self.error = Some(self.config.error_message.clone());
            self.reset.schedule(now, self.config.reset_delay);
            #[cfg(feature = "tracing")]
            tracing::info!(
                traced_len = self.selected.len(),
                reset_in_ms = self.config.reset_delay.as_millis() as u64,
                "pattern rejected"
            );
            out.push(PatternEvent::Rejected {
                traced: self.selected.clone(),
            });
        }
    }

    /// Map a pointer sample and append its cell unless it repeats the last one.
    fn sample(&mut self, point: Point, out: &mut Vec<PatternEvent>) {
        let Some(cell) = self.layout.cell_at(point) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(x = point.x, y = point.y, "layout unmeasured; sample dropped");
            return;
        };
        if self.selected.push_distinct(cell) {
            let position = self.selected.len() - 1;
            #[cfg(feature = "tracing")]
            tracing::debug!(cell = cell.index(), position, "cell selected");
            out.push(PatternEvent::CellSelected { cell, position });
        }
    }

    fn clear_selection(&mut self) -> PatternEvent {
        #[cfg(feature = "tracing")]
        tracing::debug!(cleared_len = self.selected.len(), "reset fired; selection cleared");
        self.selected.clear();
        PatternEvent::SelectionCleared
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
