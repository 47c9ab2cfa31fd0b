// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tablexxl_window --heading-base-level=0

//! TableXXL Window: windowed materialization for very long row lists.
//!
//! A list of `N` fixed-height rows is rendered by keeping only a contiguous
//! window `[offset, offset + limit)` of rows materialized, with two spacers
//! standing in for everything above and below it. The cost of a redraw then
//! depends on the viewport, not on `N`.
//!
//! The core concepts are:
//!
//! - [`Options`]: row height, materialization limit, block size, and the
//!   `allow_jump` mode switch. Every setter clamps, so options are always valid.
//! - [`HeightModel`]: maps row counts and indices to pixel extents.
//! - [`WindowState`], [`Spacers`], [`Viewport`]: the materialized range, the
//!   extents around it, and the visible region.
//! - [`RenderSink`]: the host-implemented trait that creates, places, and
//!   destroys rows and receives spacer extents.
//! - [`Windower`]: the engine. Each [`Windower::pass`] reconciles the window
//!   with the viewport, relocating it wholesale when the viewport jumped
//!   outside the materialized extent and otherwise growing and trimming it a
//!   block at a time.
//! - [`PassTrace`] / [`PassLog`]: an optional observer for every instruction of
//!   a pass.
//!
//! This crate deliberately does **not** know about scroll listeners, widgets,
//! or containers. Hosts read the scroll position, build a [`Viewport`], and
//! call [`Windower::pass`] whenever it changes. The `tablexxl` crate packages
//! that loop together with an in-memory sink.
//!
//! ## Minimal example
//!
//! ```rust
//! use tablexxl_window::{Options, PassLog, RenderSink, Viewport, Windower};
//!
//! /// Keeps the materialized indices in visual order.
//! #[derive(Default)]
//! struct Rows {
//!     order: Vec<usize>,
//!     spacers: (f64, f64),
//! }
//!
//! impl RenderSink<u32, f64> for Rows {
//!     type Handle = usize;
//!     fn materialize(&mut self, index: usize, _record: &u32) -> usize { index }
//!     fn evict(&mut self, handle: usize) { self.order.retain(|&i| i != handle); }
//!     fn append_to_tail(&mut self, handle: &usize) { self.order.push(*handle); }
//!     fn insert_at_head(&mut self, handle: &usize) { self.order.insert(0, *handle); }
//!     fn set_top_spacer_extent(&mut self, extent: f64) { self.spacers.0 = extent; }
//!     fn set_bottom_spacer_extent(&mut self, extent: f64) { self.spacers.1 = extent; }
//! }
//!
//! let items: Vec<u32> = (0..1000).collect();
//! let options = Options::new().with_row_height(24.0).with_block_size(10);
//! let mut windower = Windower::new(options);
//! let mut rows = Rows::default();
//!
//! // First paint: one block of pre-roll below a 480px viewport.
//! windower.pass(&items, Viewport::new(0.0, 480.0), &mut rows);
//! assert_eq!(windower.window().range(), 0..30);
//! assert_eq!(rows.spacers, (0.0, 970.0 * 24.0));
//!
//! // Dragging the scrollbar far down relocates the window instead of
//! // materializing everything in between.
//! let mut log = PassLog::new();
//! windower.pass_with_trace(&items, Viewport::new(9600.0, 10080.0), &mut rows, &mut log);
//! assert_eq!(log.evicted().count(), 30);
//! assert_eq!(windower.window().offset, 390);
//! assert_eq!(rows.order.first(), Some(&390));
//! ```
//!
//! Row heights are fixed; measured or variable heights are not supported.
//! All extents and offsets live in a caller-chosen 1D coordinate space
//! (typically logical pixels). This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod arena;
mod engine;
mod height;
mod options;
mod scalar;
mod sink;
mod trace;
mod window;

pub use arena::RowArena;
pub use engine::{PassSummary, Windower};
pub use height::HeightModel;
pub use options::{
    DEFAULT_BLOCK_SIZE, DEFAULT_ROW_HEIGHT, MIN_BLOCK_SIZE, MIN_MAX_MATERIALIZED, Options,
};
pub use scalar::Scalar;
pub use sink::RenderSink;
pub use trace::{Edge, Eviction, PassEvent, PassFlags, PassLog, PassTrace};
pub use window::{Spacers, Viewport, WindowState};
