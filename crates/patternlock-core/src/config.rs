#![forbid(unsafe_code)]

//! Recognizer configuration.
//!
//! [`PatternConfig`] captures the values the lock screen used to hardcode:
//! the expected pattern, the reset delay after a mismatch, and the error
//! text. `PatternConfig::default()` reproduces that hardcoded behavior
//! exactly.
//!
//! # Loading
//!
//! ```toml
//! # patternlock.toml
//! correct_pattern = [2, 6, 8, 4, 2]
//! reset_delay_ms = 500
//! error_message = "Incorrect pattern. Try again."
//! ```
//!
//! ```rust,ignore
//! let config = PatternConfig::from_toml_file("patternlock.toml")?;
//! let config = PatternConfig::from_json_str(json)?;
//! ```
//!
//! Missing keys fall back to their defaults. Loaded configs are validated
//! before they are returned.

#[cfg(feature = "config")]
use std::path::Path;

use web_time::Duration;

use crate::pattern::Pattern;

/// Expected pattern when none is configured.
pub const DEFAULT_PATTERN: [u8; 5] = [2, 6, 8, 4, 2];

/// Delay between a mismatch and clearing the traced path.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(500);

/// Feedback shown after a mismatch.
pub const DEFAULT_ERROR_MESSAGE: &str = "Incorrect pattern. Try again.";

/// Longest reset delay a config may ask for.
pub const MAX_RESET_DELAY: Duration = Duration::from_secs(60);

/// Tunables for a [`PatternRecognizer`](crate::recognizer::PatternRecognizer).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct PatternConfig {
    /// Sequence that unlocks the screen.
    pub correct_pattern: Pattern,

    /// How long a rejected path stays visible.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "reset_delay_ms", with = "duration_ms")
    )]
    pub reset_delay: Duration,

    /// Text exposed through `error_message()` after a mismatch.
    pub error_message: String,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            correct_pattern: DEFAULT_PATTERN
                .iter()
                .filter_map(|&i| crate::cell::Cell::new(i))
                .collect(),
            reset_delay: DEFAULT_RESET_DELAY,
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}

impl PatternConfig {
    /// Replace the expected pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.correct_pattern = pattern;
        self
    }

    /// Replace the reset delay.
    #[must_use]
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    /// Replace the mismatch text.
    #[must_use]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PatternConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PatternConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, PatternConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PatternConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format from its extension.
    ///
    /// `.json` is parsed as JSON; anything else as TOML.
    #[cfg(feature = "config")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PatternConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    /// Check every parameter.
    ///
    /// Returns a list of problems. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.correct_pattern.is_empty() {
            errors.push("correct_pattern must not be empty".to_string());
        }
        for pos in self.correct_pattern.consecutive_repeats() {
            errors.push(format!(
                "correct_pattern repeats cell {} at position {pos}; consecutive repeats can never be traced",
                self.correct_pattern[pos]
            ));
        }
        if self.reset_delay > MAX_RESET_DELAY {
            errors.push(format!(
                "reset_delay must be at most {}ms, got {}ms",
                MAX_RESET_DELAY.as_millis(),
                self.reset_delay.as_millis()
            ));
        }
        if self.error_message.trim().is_empty() {
            errors.push("error_message must not be blank".to_string());
        }

        errors
    }

    /// `self` if it validates, otherwise the collected problems.
    pub fn validated(self) -> Result<Self, PatternConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(PatternConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a pattern configuration.
#[derive(Debug, thiserror::Error)]
pub enum PatternConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ---------------------------------------------------------------------------
// Serde helpers for Duration
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use web_time::Duration;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
