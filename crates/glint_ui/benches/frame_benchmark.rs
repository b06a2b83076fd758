//! # Frame Benchmark
//!
//! Full declare → resolve → paint → clear cycle with a recording surface.
//!
//! Run with: `cargo bench --package glint_ui`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glint_ui::{cell, Button, Checkbox, CommandRecorder, Rect, Textbox, Ui};

/// Benchmark: one frame of a grid of mixed widgets.
fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    for count in [10_usize, 100, 1_000] {
        let checks: Vec<_> = (0..count).map(|_| cell(false)).collect();
        let texts: Vec<_> = (0..count).map(|_| cell(String::from("hello"))).collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut ui = Ui::default();
            let mut surface = CommandRecorder::new();
            ui.pointer_move(55.0, 15.0);

            b.iter(|| {
                let mut frame = ui.start_tick(&mut surface);
                for i in 0..count {
                    let y = i as f32 * 40.0;
                    black_box(frame.button(Button::new("Go").id(format!("b{i}")).at(0.0, y)));
                    frame.checkbox(Checkbox::new(
                        format!("c{i}"),
                        Rect::new(110.0, y, 20.0, 20.0),
                        &checks[i],
                    ));
                    black_box(frame.textbox(Textbox::new(
                        format!("t{i}"),
                        Rect::new(140.0, y, 200.0, 30.0),
                        &texts[i],
                    )));
                }
                let report = frame.end_tick(16.0);
                surface.take_commands();
                black_box(report)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
