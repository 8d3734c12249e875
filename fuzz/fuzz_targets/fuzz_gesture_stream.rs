#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use patternlock_core::{
    GestureEvent, GridLayout, PatternConfig, PatternEvent, PatternRecognizer, Point,
};
use web_time::{Duration, Instant};

#[derive(Debug, Arbitrary)]
enum Op {
    Start(f32, f32),
    Move(f32, f32),
    End,
    Layout(f32, f32),
    Wait(u16),
    Fire(u8),
}

fuzz_target!(|ops: Vec<Op>| {
    let mut r =
        PatternRecognizer::with_layout(PatternConfig::default(), GridLayout::new(320.0, 320.0));
    let mut t = Instant::now();
    let mut unlocked = false;

    for op in ops {
        let events = match op {
            Op::Start(x, y) => r.process(&GestureEvent::Start(Point::new(x, y)), t),
            Op::Move(x, y) => r.process(&GestureEvent::Move(Point::new(x, y)), t),
            Op::End => r.process(&GestureEvent::End, t),
            Op::Layout(w, h) => {
                r.set_layout(GridLayout::new(w, h));
                Vec::new()
            }
            Op::Wait(ms) => {
                t += Duration::from_millis(u64::from(ms));
                r.check_reset(t).into_iter().collect()
            }
            Op::Fire(g) => r.fire_reset(u64::from(g)).into_iter().collect(),
        };

        // Post-conditions that must always hold:
        assert!(
            r.selected().consecutive_repeats().next().is_none(),
            "consecutive duplicate in selection"
        );
        if unlocked {
            assert!(r.is_unlocked(), "unlock reverted");
            assert!(events.is_empty(), "events after unlock");
        }
        assert_eq!(
            events.contains(&PatternEvent::Unlocked),
            !unlocked && r.is_unlocked(),
            "unlock event mismatch"
        );
        unlocked = r.is_unlocked();
    }
});
