//! Drive a recognizer from a recorded trace.
//!
//! Replay is deterministic: record offsets are applied to a fixed base
//! instant, so the same trace and config always produce the same report.

use patternlock_core::{GridLayout, PatternConfig, PatternEvent, PatternRecognizer};
use serde::Serialize;
use web_time::{Duration, Instant};

use crate::trace::TraceRecord;

/// One pattern event and when it happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayStep {
    pub t_ms: u64,
    #[serde(flatten)]
    pub event: PatternEvent,
}

/// Recognizer state after the last record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalState {
    pub unlocked: bool,
    pub selected: Vec<u8>,
    pub error: Option<String>,
    /// Milliseconds after the trace start at which a reset is still pending.
    pub reset_pending_at_ms: Option<u64>,
}

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<ReplayStep>,
    #[serde(rename = "final")]
    pub final_state: FinalState,
}

/// Replay options.
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Layout in effect before the first `layout` record.
    pub initial_layout: Option<GridLayout>,
    /// Fire a reset still pending after the last record.
    pub settle: bool,
}

/// Feed `records` through a fresh recognizer.
#[must_use]
pub fn replay(records: &[TraceRecord], config: PatternConfig, options: &ReplayOptions) -> ReplayReport {
    let base = Instant::now();
    let at = |t_ms: u64| base + Duration::from_millis(t_ms);

    let mut recognizer = PatternRecognizer::new(config);
    if let Some(layout) = options.initial_layout {
        recognizer.set_layout(layout);
    }

    let mut steps = Vec::new();
    let mut last_t = 0;

    for record in records {
        last_t = record.t_ms;
        let now = at(record.t_ms);

        // Offsets only resolve to milliseconds, so a reset that came due
        // between records is reported at the record that observed it.
        let events = if let Some(gesture) = record.input.gesture() {
            recognizer.process(&gesture, now)
        } else {
            let cleared = recognizer.check_reset(now);
            if let Some(layout) = record.input.layout() {
                recognizer.set_layout(layout);
            }
            cleared.into_iter().collect()
        };

        steps.extend(events.into_iter().map(|event| ReplayStep {
            t_ms: record.t_ms,
            event,
        }));
    }

    if options.settle
        && let Some(deadline) = recognizer.next_reset_deadline()
        && let Some(event) = recognizer.check_reset(deadline)
    {
        let elapsed = deadline.duration_since(base);
        steps.push(ReplayStep {
            t_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            event,
        });
    }

    let reset_pending_at_ms = recognizer
        .next_reset_deadline()
        .map(|deadline| u64::try_from(deadline.duration_since(base).as_millis()).unwrap_or(u64::MAX));

    tracing::debug!(records = records.len(), steps = steps.len(), last_t, "replay finished");

    ReplayReport {
        steps,
        final_state: FinalState {
            unlocked: recognizer.is_unlocked(),
            selected: recognizer.selected().to_indices(),
            error: recognizer.error_message().map(str::to_owned),
            reset_pending_at_ms,
        },
    }
}

/// One human-readable line per step.
#[must_use]
pub fn describe_step(step: &ReplayStep) -> String {
    let detail = match &step.event {
        PatternEvent::CellSelected { cell, position } => format!(" cell={cell} position={position}"),
        PatternEvent::Rejected { traced } => format!(" traced={traced}"),
        PatternEvent::Unlocked | PatternEvent::SelectionCleared => String::new(),
    };
    format!("{:>6}ms  {}{detail}", step.t_ms, step.event.name())
}

/// Summary line for the final state.
#[must_use]
pub fn describe_final(state: &FinalState) -> String {
    let selected = if state.selected.is_empty() {
        "-".to_string()
    } else {
        state
            .selected
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join("-")
    };
    format!(
        "unlocked={} selected={} error={}",
        state.unlocked,
        selected,
        state.error.as_deref().unwrap_or("-")
    )
}
