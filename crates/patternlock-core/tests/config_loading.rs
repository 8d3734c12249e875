//! Loading `PatternConfig` from TOML and JSON files.

use std::io::Write;

use patternlock_core::config::{DEFAULT_ERROR_MESSAGE, PatternConfig, PatternConfigError};
use patternlock_core::{GestureEvent, GridLayout, PatternRecognizer, Point};
use web_time::{Duration, Instant};

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn toml_file_overrides_everything() {
    let file = write_temp(
        ".toml",
        r#"
correct_pattern = [1, 5, 9]
reset_delay_ms = 1200
error_message = "Wrong pattern"
"#,
    );
    let config = PatternConfig::from_toml_file(file.path()).unwrap();
    assert_eq!(config.correct_pattern.to_indices(), vec![1, 5, 9]);
    assert_eq!(config.reset_delay, Duration::from_millis(1200));
    assert_eq!(config.error_message, "Wrong pattern");
}

#[test]
fn json_file_with_partial_fields() {
    let file = write_temp(".json", r#"{ "correct_pattern": [3, 5, 7] }"#);
    let config = PatternConfig::from_file(file.path()).unwrap();
    assert_eq!(config.correct_pattern.to_indices(), vec![3, 5, 7]);
    assert_eq!(config.error_message, DEFAULT_ERROR_MESSAGE);
}

#[test]
fn from_file_defaults_to_toml() {
    let file = write_temp(".conf", "reset_delay_ms = 10\n");
    let config = PatternConfig::from_file(file.path()).unwrap();
    assert_eq!(config.reset_delay, Duration::from_millis(10));
}

#[test]
fn empty_toml_is_default() {
    assert_eq!(PatternConfig::from_toml_str("").unwrap(), PatternConfig::default());
}

#[test]
fn missing_file_is_io_error() {
    let err = PatternConfig::from_toml_file("/nonexistent/patternlock.toml").unwrap_err();
    assert!(matches!(err, PatternConfigError::Io(_)));
}

#[test]
fn unknown_key_is_parse_error() {
    let err = PatternConfig::from_toml_str("lockout_after = 3\n").unwrap_err();
    assert!(matches!(err, PatternConfigError::Toml(_)));
}

#[test]
fn untraceable_pattern_fails_validation() {
    let err = PatternConfig::from_json_str(r#"{ "correct_pattern": [4, 4, 2] }"#).unwrap_err();
    match err {
        PatternConfigError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("repeats cell 4"));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn serialized_config_round_trips_through_toml() {
    let original = PatternConfig::default().with_reset_delay(Duration::from_millis(750));
    let text = toml::to_string(&original).unwrap();
    assert!(text.contains("reset_delay_ms = 750"));
    assert_eq!(PatternConfig::from_toml_str(&text).unwrap(), original);
}

#[test]
fn loaded_config_drives_recognizer() {
    let config = PatternConfig::from_toml_str(
        "correct_pattern = [7, 8, 9]\nreset_delay_ms = 100\n",
    )
    .unwrap();
    let mut r = PatternRecognizer::with_layout(config, GridLayout::new(90.0, 90.0));
    let t = Instant::now();

    r.process(&GestureEvent::Start(Point::new(15.0, 15.0)), t);
    r.process(&GestureEvent::End, t);
    assert_eq!(r.next_reset_deadline(), Some(t + Duration::from_millis(100)));

    for event in [
        GestureEvent::Start(Point::new(15.0, 75.0)),
        GestureEvent::Move(Point::new(45.0, 75.0)),
        GestureEvent::Move(Point::new(75.0, 75.0)),
        GestureEvent::End,
    ] {
        r.process(&event, t);
    }
    assert!(r.is_unlocked());
}
