// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use tablexxl::{MemorySink, Options, ScriptedViewport, TableXxl, ViewportProbe};

type Table = TableXxl<String, MemorySink<String>, ScriptedViewport>;

fn items(len: usize) -> Vec<String> {
    (0..len).map(|i| format!("row {i}")).collect()
}

fn bench_reset(c: &mut Criterion) {
    let mut group = c.benchmark_group("tablexxl/reset");

    for &len in &[1_000_usize, 100_000] {
        let data = items(len);
        group.bench_function(format!("rows={len}"), |b| {
            b.iter_batched(
                || {
                    let table: Table =
                        TableXxl::with_surface(MemorySink::new(), ScriptedViewport::new(480.0));
                    (table, data.clone())
                },
                |(mut table, data)| black_box(table.reset(data, Options::new())),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_pumped_scroll(c: &mut Criterion) {
    let mut table: Table = TableXxl::with_surface(MemorySink::new(), ScriptedViewport::new(480.0));
    let _ = table.reset(items(100_000), Options::new().with_max_materialized(200));
    let end = table.content_extent() - 480.0;

    c.bench_function("tablexxl/pumped_scroll", |b| {
        b.iter(|| {
            if let Some((_, probe)) = table.surface_mut() {
                let next = probe.scroll_offset() + 24.0;
                probe.scroll_to(if next > end { 0.0 } else { next });
            }
            black_box(table.pump())
        });
    });
}

criterion_group!(benches, bench_reset, bench_pumped_scroll);
criterion_main!(benches);
