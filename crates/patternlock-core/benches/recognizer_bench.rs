//! Benchmark: pointer sample throughput through `PatternRecognizer`.
//!
//! Run with: `cargo bench -p patternlock-core --bench recognizer_bench`
//!
//! Touch hosts deliver move events at display rate or faster, and most of
//! them land in the cell already selected. Measures the suppressed path, the
//! appending path, and a full gesture including evaluation.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use patternlock_core::{GestureEvent, GridLayout, PatternConfig, PatternRecognizer, Point};
use web_time::Instant;

const LAYOUT: GridLayout = GridLayout::new(320.0, 320.0);

fn bench_mapping(c: &mut Criterion) {
    c.bench_function("cell_at", |b| {
        let mut x = 0.0f32;
        b.iter(|| {
            x = (x + 7.3) % 400.0 - 40.0;
            black_box(LAYOUT.cell_at(Point::new(black_box(x), black_box(x * 0.5))))
        });
    });
}

fn bench_moves(c: &mut Criterion) {
    let now = Instant::now();

    c.bench_function("move_suppressed", |b| {
        let mut r = PatternRecognizer::with_layout(PatternConfig::default(), LAYOUT);
        r.process(&GestureEvent::Start(Point::new(160.0, 160.0)), now);
        let mut dx = 0.0f32;
        b.iter(|| {
            dx = (dx + 1.0) % 40.0;
            black_box(r.process(&GestureEvent::Move(Point::new(140.0 + dx, 160.0)), now))
        });
    });

    c.bench_function("move_alternating", |b| {
        let mut r = PatternRecognizer::with_layout(PatternConfig::default(), LAYOUT);
        r.process(&GestureEvent::Start(Point::new(160.0, 160.0)), now);
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let x = if flip { 40.0 } else { 280.0 };
            black_box(r.process(&GestureEvent::Move(Point::new(x, 160.0)), now))
        });
    });
}

fn bench_full_gesture(c: &mut Criterion) {
    let now = Instant::now();
    let script = [
        GestureEvent::Start(Point::new(160.0, 40.0)),
        GestureEvent::Move(Point::new(280.0, 160.0)),
        GestureEvent::Move(Point::new(160.0, 290.0)),
        GestureEvent::Move(Point::new(30.0, 170.0)),
        GestureEvent::Move(Point::new(150.0, 50.0)),
        GestureEvent::End,
    ];

    c.bench_function("full_gesture_unlock", |b| {
        b.iter(|| {
            let mut r = PatternRecognizer::with_layout(PatternConfig::default(), LAYOUT);
            for event in &script {
                black_box(r.process(event, now));
            }
            black_box(r.is_unlocked())
        });
    });
}

criterion_group!(benches, bench_mapping, bench_moves, bench_full_gesture);
criterion_main!(benches);
