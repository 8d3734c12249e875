//! Recorded gesture traces.
//!
//! A trace is JSON lines, one record per line, with a millisecond offset
//! from the start of the recording:
//!
//! ```text
//! {"t_ms": 0,   "kind": "layout", "width": 320, "height": 320}
//! {"t_ms": 5,   "kind": "start",  "x": 160, "y": 40}
//! {"t_ms": 21,  "kind": "move",   "x": 280, "y": 160}
//! {"t_ms": 90,  "kind": "end"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Offsets must never
//! decrease.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use patternlock_core::{GestureEvent, GridLayout, Point};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// One line of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    #[serde(default)]
    pub t_ms: u64,
    #[serde(flatten)]
    pub input: TraceInput,
}

/// What happened at `t_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceInput {
    Layout { width: f32, height: f32 },
    Start { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    End,
}

impl TraceInput {
    /// The gesture event this record carries, or `None` for layout changes.
    #[must_use]
    pub fn gesture(self) -> Option<GestureEvent> {
        match self {
            Self::Start { x, y } => Some(GestureEvent::Start(Point::new(x, y))),
            Self::Move { x, y } => Some(GestureEvent::Move(Point::new(x, y))),
            Self::End => Some(GestureEvent::End),
            Self::Layout { .. } => None,
        }
    }

    /// The layout this record carries, if any.
    #[must_use]
    pub fn layout(self) -> Option<GridLayout> {
        match self {
            Self::Layout { width, height } => Some(GridLayout::new(width, height)),
            _ => None,
        }
    }
}

/// Parse a trace from any buffered reader.
pub fn parse_trace(reader: impl BufRead) -> Result<Vec<TraceRecord>> {
    let mut records = Vec::new();
    let mut last_t = 0u64;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| CliError::TraceParse {
            line: line_no,
            message: e.to_string(),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let record: TraceRecord =
            serde_json::from_str(trimmed).map_err(|e| CliError::TraceParse {
                line: line_no,
                message: e.to_string(),
            })?;
        if record.t_ms < last_t {
            return Err(CliError::TraceParse {
                line: line_no,
                message: format!("t_ms {} goes backwards from {last_t}", record.t_ms),
            });
        }
        last_t = record.t_ms;
        records.push(record);
    }

    Ok(records)
}

/// Read and parse a trace file.
pub fn read_trace(path: &Path) -> Result<Vec<TraceRecord>> {
    let file = File::open(path).map_err(|e| CliError::io(path, e))?;
    parse_trace(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_kinds() {
        let text = r#"
# recorded on a 320px grid
{"t_ms": 0, "kind": "layout", "width": 320, "height": 320}
{"t_ms": 5, "kind": "start", "x": 160, "y": 40}
{"t_ms": 21, "kind": "move", "x": 280.5, "y": 160}

{"t_ms": 90, "kind": "end"}
"#;
        let records = parse_trace(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(
            records[0].input.layout(),
            Some(GridLayout::new(320.0, 320.0))
        );
        assert_eq!(
            records[2].input.gesture(),
            Some(GestureEvent::Move(Point::new(280.5, 160.0)))
        );
        assert_eq!(records[3].t_ms, 90);
        assert_eq!(records[3].input.gesture(), Some(GestureEvent::End));
    }

    #[test]
    fn missing_timestamp_defaults_to_zero() {
        let records = parse_trace(r#"{"kind":"end"}"#.as_bytes()).unwrap();
        assert_eq!(records[0].t_ms, 0);
    }

    #[test]
    fn unknown_kind_reports_line() {
        let text = "{\"t_ms\":0,\"kind\":\"end\"}\n{\"t_ms\":1,\"kind\":\"hover\"}\n";
        let err = parse_trace(text.as_bytes()).unwrap_err();
        assert!(matches!(err, CliError::TraceParse { line: 2, .. }));
    }

    #[test]
    fn backwards_time_is_rejected() {
        let text = "{\"t_ms\":50,\"kind\":\"end\"}\n{\"t_ms\":10,\"kind\":\"end\"}\n";
        let err = parse_trace(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("goes backwards"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_trace(Path::new("/nonexistent/trace.jsonl")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
