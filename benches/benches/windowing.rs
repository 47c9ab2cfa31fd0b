// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use tablexxl_window::{Options, RenderSink, Viewport, Windower};

/// Sink that only counts what it is asked to do.
#[derive(Default)]
struct CountingSink {
    live: usize,
    top: f64,
    bottom: f64,
}

impl RenderSink<u32, f64> for CountingSink {
    type Handle = usize;

    fn materialize(&mut self, index: usize, _record: &u32) -> usize {
        index
    }

    fn evict(&mut self, _handle: usize) {
        self.live -= 1;
    }

    fn append_to_tail(&mut self, _handle: &usize) {
        self.live += 1;
    }

    fn insert_at_head(&mut self, _handle: &usize) {
        self.live += 1;
    }

    fn set_top_spacer_extent(&mut self, extent: f64) {
        self.top = extent;
    }

    fn set_bottom_spacer_extent(&mut self, extent: f64) {
        self.bottom = extent;
    }
}

const ROW_HEIGHT: f64 = 24.0;
const VIEWPORT: f64 = 480.0;

fn options(max_materialized: usize) -> Options<f64> {
    Options::new()
        .with_row_height(ROW_HEIGHT)
        .with_max_materialized(max_materialized)
        .with_block_size(10)
}

fn bench_steady_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("tablexxl_window/steady_scroll");

    for &len in &[10_000_u32, 1_000_000_u32] {
        let items: Vec<u32> = (0..len).collect();
        group.bench_function(format!("rows={len}"), |b| {
            let mut sink = CountingSink::default();
            let mut windower = Windower::new(options(200));
            let limit = f64::from(len) * ROW_HEIGHT - VIEWPORT;
            let mut top = 0.0;
            b.iter(|| {
                top += ROW_HEIGHT;
                if top > limit {
                    top = 0.0;
                }
                let viewport = Viewport::new(top, top + VIEWPORT);
                black_box(windower.pass(&items, viewport, &mut sink))
            });
        });
    }

    group.finish();
}

fn bench_jump(c: &mut Criterion) {
    let mut group = c.benchmark_group("tablexxl_window/jump");
    let items: Vec<u32> = (0..1_000_000).collect();

    for &max_materialized in &[100_usize, 1_000] {
        group.bench_function(format!("max={max_materialized}"), |b| {
            b.iter_batched(
                || {
                    let mut sink = CountingSink::default();
                    let mut windower = Windower::new(options(max_materialized));
                    // Walk down until the window is full.
                    let mut top = 0.0;
                    while windower.window().limit < max_materialized {
                        windower.pass(&items, Viewport::new(top, top + VIEWPORT), &mut sink);
                        top += ROW_HEIGHT * 5.0;
                    }
                    (windower, sink)
                },
                |(mut windower, mut sink)| {
                    let viewport = Viewport::new(12_000_000.0, 12_000_000.0 + VIEWPORT);
                    black_box(windower.pass(&items, viewport, &mut sink));
                    black_box(sink.live)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_idle_pass(c: &mut Criterion) {
    let items: Vec<u32> = (0..1_000_000).collect();
    let mut sink = CountingSink::default();
    let mut windower = Windower::new(options(100));
    let viewport = Viewport::new(240_000.0, 240_000.0 + VIEWPORT);
    windower.pass(&items, viewport, &mut sink);

    c.bench_function("tablexxl_window/idle_pass", |b| {
        b.iter(|| black_box(windower.pass(&items, black_box(viewport), &mut sink)));
    });
}

criterion_group!(benches, bench_steady_scroll, bench_jump, bench_idle_pass);
criterion_main!(benches);
