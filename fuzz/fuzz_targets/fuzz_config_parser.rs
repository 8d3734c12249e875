#![no_main]

use libfuzzer_sys::fuzz_target;
use patternlock_core::PatternConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Anything a loader accepts must also pass validation.
    for config in [PatternConfig::from_toml_str(text), PatternConfig::from_json_str(text)]
        .into_iter()
        .flatten()
    {
        assert!(config.validate().is_empty());
        assert!(!config.correct_pattern.is_empty());
    }
});
