//! Criterion benchmarks for the per-tap key path.
//!
//! Every tap runs [`apply_key`] and every redraw runs [`keyboard_rows`], so
//! both sit on the interactive path of the keyboard.
//!
//! Run with:
//! ```bash
//! cargo bench --package cboard-core --bench keys_bench
//! ```

use cboard_core::{apply_key, keyboard_rows, Key, KeyboardSettings, KeyboardState};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// ── Benchmarks: key state machine ────────────────────────────────────────────

fn bench_apply_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_key");

    let letter = Key::char("q");
    group.bench_function("letter_shifted", |b| {
        let state = KeyboardState {
            shifted: true,
            ..KeyboardState::default()
        };
        b.iter(|| apply_key(black_box(state), black_box(&letter)))
    });

    // A burst of typing: shift, a word, space
    let burst: Vec<Key> = std::iter::once(Key::Shift)
        .chain("keyboard".chars().map(|ch| Key::char(ch.to_string())))
        .chain(std::iter::once(Key::Space))
        .collect();
    group.bench_function("typing_burst_10", |b| {
        b.iter(|| {
            burst.iter().fold(KeyboardState::default(), |state, key| {
                apply_key(state, black_box(key)).0
            })
        })
    });

    group.finish();
}

// ── Benchmarks: row view ──────────────────────────────────────────────────────

fn bench_keyboard_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyboard_rows");
    let settings = KeyboardSettings::default();

    group.bench_function("default_layout", |b| {
        b.iter(|| keyboard_rows(black_box(&settings), black_box(&KeyboardState::default())))
    });

    group.bench_function("default_layout_caps", |b| {
        let state = KeyboardState {
            caps_lock: true,
            ..KeyboardState::default()
        };
        b.iter(|| keyboard_rows(black_box(&settings), black_box(&state)))
    });

    group.finish();
}

criterion_group!(benches, bench_apply_key, bench_keyboard_rows);
criterion_main!(benches);
