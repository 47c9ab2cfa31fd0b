// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tablexxl --heading-base-level=0

//! TableXXL: a table that stays fast with millions of rows.
//!
//! [`TableXxl`] owns an item sequence and keeps only the rows around the
//! visible region materialized in a render surface. The surface is a pair of
//!
//! - a [`RenderSink`] that creates, places, and destroys rows and sizes the two
//!   spacers standing in for the rest of the list, and
//! - a [`ViewportProbe`] reporting the scroll offset and visible extent, which
//!   raises a [`ViewportSignal`] when they change.
//!
//! The windowing itself is done by [`tablexxl_window`]; this crate adds the
//! controller that ties it to a surface, the [`ConfigurationError`] returned
//! when none is bound, and an in-memory surface ([`MemorySink`] and
//! [`ScriptedViewport`]) for headless hosts and tests.
//!
//! ## Example
//!
//! ```rust
//! use tablexxl::{MemorySink, Options, PassFlags, ScriptedViewport, TableXxl};
//!
//! let items: Vec<String> = (0..10_000).map(|i| format!("row {i}")).collect();
//! let mut table: TableXxl<String, MemorySink<String>, ScriptedViewport> =
//!     TableXxl::with_surface(MemorySink::new(), ScriptedViewport::new(480.0));
//!
//! // 480px of 24px rows plus one block of ten below.
//! let summary = table.reset(items, Options::new()).unwrap();
//! assert_eq!(summary.window.range(), 0..30);
//! assert_eq!(table.content_extent(), 240_000.0);
//!
//! // Scrolling raises the probe's signal; the next pump redraws once.
//! let (_, probe) = table.surface_mut().unwrap();
//! probe.scroll_to(9600.0);
//! let summary = table.pump().unwrap().unwrap();
//! assert!(summary.flags.contains(PassFlags::JUMPED));
//! assert_eq!(table.window().offset, 390);
//! assert_eq!(table.pump().unwrap(), None);
//!
//! let (sink, _) = table.surface().unwrap();
//! assert_eq!(sink.record(400).map(String::as_str), Some("row 400"));
//! ```
//!
//! Enable the `tracing` feature to log every redraw, with its elapsed time,
//! through the [`tracing`](https://docs.rs/tracing) crate.

mod error;
mod memory;
mod probe;
mod table;

pub use error::ConfigurationError;
pub use memory::{MemoryRow, MemorySink, RowId, ScriptedViewport};
pub use probe::{ViewportProbe, ViewportSignal};
pub use table::TableXxl;

pub use tablexxl_window::{
    Options, PassFlags, PassLog, PassSummary, PassTrace, RenderSink, Scalar, Spacers, Viewport,
    WindowState,
};
