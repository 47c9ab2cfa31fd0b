// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving `TableXxl` through the in-memory surface.

use tablexxl::{
    ConfigurationError, MemorySink, Options, PassFlags, PassLog, ScriptedViewport, TableXxl,
    WindowState,
};

type Table = TableXxl<u32, MemorySink<u32>, ScriptedViewport>;

fn items(len: u32) -> Vec<u32> {
    (0..len).collect()
}

fn standard_options() -> Options<f64> {
    Options::new()
        .with_row_height(24.0)
        .with_max_materialized(100)
        .with_block_size(10)
}

fn bound_table() -> Table {
    TableXxl::with_surface(MemorySink::new(), ScriptedViewport::new(480.0))
}

fn scroll_to(table: &mut Table, offset: f64) {
    let (_, probe) = table.surface_mut().expect("table is bound");
    probe.scroll_to(offset);
}

/// Sink rows, engine window, and spacers all agree.
fn assert_consistent(table: &Table) {
    let (sink, _) = table.surface().expect("table is bound");
    let window = table.window();
    assert_eq!(
        sink.indices().collect::<Vec<_>>(),
        window.range().collect::<Vec<_>>(),
        "sink rows differ from window {window:?}"
    );
    for row in sink.rows() {
        assert_eq!(row.record as usize, row.index, "row holds the wrong record");
        assert_eq!(table.handle(row.index), Some(&row.id));
    }
    assert_eq!(sink.spacers(), table.spacers());
    assert_eq!(sink.created() - sink.evicted(), window.limit);
}

#[test]
fn reset_draws_the_first_window() {
    let mut table = bound_table();
    let summary = table.reset(items(1000), standard_options()).unwrap();

    assert_eq!(summary.window, WindowState::new(0, 30));
    assert_eq!(table.spacers().top, 0.0);
    assert_eq!(table.spacers().bottom, 23_280.0);
    assert_eq!(table.content_extent(), 24_000.0);
    assert_eq!(table.len(), 1000);
    assert_consistent(&table);
}

#[test]
fn far_scroll_jumps_and_refills_forward() {
    let mut table = bound_table();
    table.reset(items(1000), standard_options()).unwrap();

    scroll_to(&mut table, 9600.0);
    let mut log = PassLog::new();
    let summary = table.on_viewport_change_with_trace(&mut log).unwrap();

    assert!(summary.flags.contains(PassFlags::JUMPED));
    assert_eq!(log.evicted().count(), 30);
    assert_eq!(summary.window, WindowState::new(390, 40));
    assert_eq!(table.spacers().top, 9360.0);
    assert_consistent(&table);
}

#[test]
fn one_row_scroll_adds_a_block() {
    let mut table = bound_table();
    table.reset(items(1000), standard_options()).unwrap();

    scroll_to(&mut table, 24.0);
    let summary = table.on_viewport_change().unwrap();
    assert_eq!(summary.window, WindowState::new(0, 40));
    assert_eq!(summary.evicted, 0);
    assert_consistent(&table);
}

#[test]
fn long_scroll_keeps_the_limit() {
    let mut table = bound_table();
    table.reset(items(1000), standard_options()).unwrap();

    let mut offset = 0.0;
    while offset < 6000.0 {
        offset += 48.0;
        scroll_to(&mut table, offset);
        let summary = table.pump().unwrap().expect("probe signalled a scroll");
        assert!(summary.window.limit <= 100);
        assert_consistent(&table);
    }
    assert_eq!(table.window().limit, 100);
}

#[test]
fn disabled_jumps_report_the_materialized_extent() {
    let mut table = bound_table();
    let summary = table
        .reset(items(1000), standard_options().with_allow_jump(false))
        .unwrap();

    assert_eq!(summary.spacers.bottom, 0.0);
    assert_eq!(table.content_extent(), 30.0 * 24.0);

    scroll_to(&mut table, 600.0);
    let summary = table.on_viewport_change().unwrap();
    assert_eq!(table.spacers().bottom, 0.0);
    assert_eq!(table.content_extent(), summary.window.end() as f64 * 24.0);
    assert_consistent(&table);
}

#[test]
fn reset_with_no_items_clears_everything() {
    let mut table = bound_table();
    table.reset(items(1000), standard_options()).unwrap();
    scroll_to(&mut table, 2400.0);
    table.on_viewport_change().unwrap();

    let summary = table.reset(Vec::new(), standard_options()).unwrap();
    assert_eq!(summary.window, WindowState::EMPTY);
    assert_eq!(table.spacers().top, 0.0);
    assert_eq!(table.spacers().bottom, 0.0);
    let (sink, _) = table.surface().unwrap();
    assert!(sink.is_empty());
    assert_consistent(&table);
}

#[test]
fn unbound_table_reports_missing_surface() {
    let mut table = Table::new();
    assert!(!table.is_bound());
    assert_eq!(
        table.reset(items(50), standard_options()),
        Err(ConfigurationError::NoSurface)
    );
    assert_eq!(table.on_viewport_change(), Err(ConfigurationError::NoSurface));
    assert_eq!(table.pump(), Err(ConfigurationError::NoSurface));
    assert_eq!(
        ConfigurationError::NoSurface.to_string(),
        "no render surface is bound to the table"
    );

    // The data survives and is drawn once a surface arrives.
    assert_eq!(table.len(), 50);
    assert_eq!(table.window(), WindowState::EMPTY);
    assert!(table.bind(MemorySink::new(), ScriptedViewport::new(480.0)).is_none());
    let summary = table.pump().unwrap().expect("binding requests a redraw");
    assert_eq!(summary.window, WindowState::new(0, 30));
    assert_consistent(&table);
}

#[test]
fn pump_runs_only_after_a_signal() {
    let mut table = bound_table();
    table.reset(items(1000), standard_options()).unwrap();
    assert_eq!(table.pump(), Ok(None));

    scroll_to(&mut table, 240.0);
    assert!(table.signal().is_pending());
    assert!(table.pump().unwrap().is_some());
    assert_eq!(table.pump(), Ok(None));

    // A direct redraw consumes a pending signal.
    scroll_to(&mut table, 480.0);
    table.on_viewport_change().unwrap();
    assert_eq!(table.pump(), Ok(None));

    // Setting the same geometry again is not a change.
    scroll_to(&mut table, 480.0);
    assert_eq!(table.pump(), Ok(None));
}

#[test]
fn unbind_evicts_rows_from_the_old_sink() {
    let mut table = bound_table();
    table.reset(items(1000), standard_options()).unwrap();

    let (sink, probe) = table.unbind().expect("table was bound");
    assert!(sink.is_empty());
    assert_eq!(sink.created(), 30);
    assert_eq!(sink.evicted(), 30);
    assert_eq!(sink.spacers().bottom, 0.0);
    assert_eq!(table.window(), WindowState::EMPTY);
    assert!(table.unbind().is_none());

    // Rebinding draws into the new sink at the probe's position.
    let mut probe = probe;
    probe.scroll_to(9600.0);
    table.bind(MemorySink::new(), probe);
    let summary = table.pump().unwrap().expect("binding requests a redraw");
    assert_eq!(summary.window.offset, 390);
    assert_consistent(&table);
}

#[test]
fn rebinding_returns_the_previous_surface_emptied() {
    let mut table = bound_table();
    table.reset(items(1000), standard_options()).unwrap();

    let (old, _) = table
        .bind(MemorySink::new(), ScriptedViewport::new(240.0))
        .expect("previous surface");
    assert!(old.is_empty());
    let summary = table.pump().unwrap().unwrap();
    assert_eq!(summary.window, WindowState::new(0, 20));
}

#[test]
fn resizing_the_viewport_grows_the_window() {
    let mut table = bound_table();
    table.reset(items(1000), standard_options()).unwrap();

    let (_, probe) = table.surface_mut().unwrap();
    probe.resize(960.0);
    let summary = table.pump().unwrap().unwrap();
    assert_eq!(summary.window, WindowState::new(0, 50));
    assert!(summary.flags.contains(PassFlags::GREW_TAIL));
    assert_consistent(&table);
}
