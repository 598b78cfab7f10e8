//! Criterion benchmarks for key-name resolution and X11 translation.
//!
//! Every `POST /keyboard` request resolves a key name to a command and, on
//! Linux, turns the command's HID code into a KeySym.  Both are table lookups and should
//! stay far below a microsecond.
//!
//! Run with:
//! ```bash
//! cargo bench --package deskcast-core --bench keymap_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use deskcast_core::keymap::{HidKeyCode, KeyMapper, KEY_NAMES};

/// Names the web client actually sends most often.
const BENCH_KEY_NAMES: &[&str] = &[
    "a", "Z", "5", "!", "enter", "space", "backspace", "tab", "esc", "f5", "left", "shift",
    "ctrl", "/", "unknown-key",
];

const BENCH_HID_CODES: &[HidKeyCode] = &[
    HidKeyCode::KeyA,
    HidKeyCode::KeyZ,
    HidKeyCode::Enter,
    HidKeyCode::Escape,
    HidKeyCode::Backspace,
    HidKeyCode::Tab,
    HidKeyCode::Space,
    HidKeyCode::F1,
    HidKeyCode::F12,
    HidKeyCode::ControlLeft,
    HidKeyCode::ShiftLeft,
    HidKeyCode::MetaLeft,
    HidKeyCode::ArrowLeft,
    HidKeyCode::Digit1,
];

// ── Benchmarks: key name → command ───────────────────────────────────────────

fn bench_key_name_to_command(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_names");

    for name in ["a", "A", "backspace", "pagedown"] {
        group.bench_with_input(BenchmarkId::new("key_name_to_command", name), name, |b, name| {
            b.iter(|| KeyMapper::key_name_to_command(black_box(name)))
        });
    }

    group.bench_function("key_name_to_command_batch", |b| {
        b.iter(|| {
            BENCH_KEY_NAMES
                .iter()
                .map(|name| KeyMapper::key_name_to_command(black_box(name)))
                .collect::<Vec<_>>()
        })
    });

    group.bench_function("key_name_to_command_full_vocabulary", |b| {
        b.iter(|| {
            KEY_NAMES
                .iter()
                .filter_map(|name| KeyMapper::key_name_to_command(black_box(name)))
                .count()
        })
    });

    group.finish();
}

// ── Benchmarks: HID → X11 KeySym ─────────────────────────────────────────────

fn bench_hid_to_x11_keysym(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_x11");

    group.bench_function("hid_to_keysym_single", |b| {
        b.iter(|| KeyMapper::hid_to_x11_keysym(black_box(HidKeyCode::KeyA)))
    });

    group.bench_function("hid_to_keysym_batch", |b| {
        b.iter(|| {
            BENCH_HID_CODES
                .iter()
                .map(|&hid| KeyMapper::hid_to_x11_keysym(black_box(hid)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_key_name_to_command, bench_hid_to_x11_keysym);
criterion_main!(benches);
