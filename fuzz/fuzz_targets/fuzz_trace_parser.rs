#![no_main]

use libfuzzer_sys::fuzz_target;
use patternlock_cli::replay::{ReplayOptions, replay};
use patternlock_cli::trace::parse_trace;
use patternlock_core::PatternConfig;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic the parser; accepted traces must replay.
    if let Ok(records) = parse_trace(data) {
        assert!(records.windows(2).all(|w| w[0].t_ms <= w[1].t_ms));
        let options = ReplayOptions {
            settle: true,
            ..ReplayOptions::default()
        };
        let report = replay(&records, PatternConfig::default(), &options);
        assert!(report.final_state.selected.iter().all(|&c| (1..=9).contains(&c)));
        assert!(report.final_state.unlocked || report.final_state.reset_pending_at_ms.is_none());
    }
});
