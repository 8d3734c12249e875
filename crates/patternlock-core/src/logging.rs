#![forbid(unsafe_code)]

//! Structured logging support.
//!
//! With the `tracing` feature the recognizer emits events through the
//! [`tracing`] facade:
//!
//! | level | event |
//! |-------|-------|
//! | `debug` | cell appended, reset fired or cancelled |
//! | `info`  | pattern accepted or rejected |
//! | `trace` | ignored input, rejected termination request |
//!
//! Without the feature every call site compiles away.
//!
//! The `tracing-json` feature adds [`init_json_logging`] for hosts that want
//! line-delimited JSON on stderr without wiring a subscriber themselves.

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, trace, warn};

/// Environment variable consulted for the log filter.
pub const LOG_ENV: &str = "PATTERNLOCK_LOG";

/// Install a global JSON subscriber filtered by [`LOG_ENV`] (default `info`).
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
