// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observing what a window pass did.
//!
//! The engine does not keep a history of its instructions. Callers that want
//! one (tests, debugging overlays, replay tools) pass a [`PassTrace`] to
//! [`Windower::pass_with_trace`](crate::Windower::pass_with_trace); the
//! built-in [`PassLog`] simply records every callback in order.

use alloc::vec::Vec;

use crate::WindowState;

bitflags::bitflags! {
    /// Which steps of a pass changed the window.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PassFlags: u8 {
        /// The viewport left the materialized extent and the window was relocated.
        const JUMPED       = 0b0000_0001;
        /// Rows were appended after the window.
        const GREW_TAIL    = 0b0000_0010;
        /// Rows were evicted from the start of the window after tail growth.
        const TRIMMED_HEAD = 0b0000_0100;
        /// Rows were inserted before the window.
        const GREW_HEAD    = 0b0000_1000;
        /// Rows were evicted from the end of the window after head growth.
        const TRIMMED_TAIL = 0b0001_0000;
    }
}

impl PassFlags {
    /// Returns `true` if the pass materialized or evicted anything.
    #[must_use]
    pub fn changed(self) -> bool {
        !self.is_empty()
    }
}

/// The end of the window a row was placed at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Before the first live row.
    Head,
    /// After the last live row.
    Tail,
}

/// Why a row was evicted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Eviction {
    /// The whole window was discarded by a jump.
    Jump,
    /// Overflow trimmed from the start of the window.
    TrimHead,
    /// Overflow trimmed from the end of the window.
    TrimTail,
    /// The engine was cleared by a data reset.
    Clear,
}

/// A callback sink for window pass tracing.
///
/// All methods default to doing nothing, so implementors only override what
/// they care about.
pub trait PassTrace {
    /// Called once per jump, before any eviction, with the window being discarded
    /// and the index the new window will be anchored at.
    fn jumped(&mut self, from: WindowState, anchor: usize) {
        let _ = (from, anchor);
    }

    /// Called after row `index` was materialized and placed at `edge`.
    fn materialized(&mut self, index: usize, edge: Edge) {
        let _ = (index, edge);
    }

    /// Called after row `index` was evicted.
    fn evicted(&mut self, index: usize, reason: Eviction) {
        let _ = (index, reason);
    }

    /// Called at the end of a pass with the final window and the step flags.
    fn finished(&mut self, window: WindowState, flags: PassFlags) {
        let _ = (window, flags);
    }
}

impl PassTrace for () {}

impl<T: PassTrace + ?Sized> PassTrace for &mut T {
    fn jumped(&mut self, from: WindowState, anchor: usize) {
        (**self).jumped(from, anchor);
    }

    fn materialized(&mut self, index: usize, edge: Edge) {
        (**self).materialized(index, edge);
    }

    fn evicted(&mut self, index: usize, reason: Eviction) {
        (**self).evicted(index, reason);
    }

    fn finished(&mut self, window: WindowState, flags: PassFlags) {
        (**self).finished(window, flags);
    }
}

/// One recorded [`PassTrace`] callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PassEvent {
    /// See [`PassTrace::jumped`].
    Jumped {
        /// Window that was discarded.
        from: WindowState,
        /// Anchor of the relocated window.
        anchor: usize,
    },
    /// See [`PassTrace::materialized`].
    Materialized {
        /// Row index.
        index: usize,
        /// Placement.
        edge: Edge,
    },
    /// See [`PassTrace::evicted`].
    Evicted {
        /// Row index.
        index: usize,
        /// Cause.
        reason: Eviction,
    },
    /// See [`PassTrace::finished`].
    Finished {
        /// Final window.
        window: WindowState,
        /// Steps that changed the window.
        flags: PassFlags,
    },
}

/// Records every callback of one or more passes, in order.
#[derive(Clone, Debug, Default)]
pub struct PassLog {
    events: Vec<PassEvent>,
}

impl PassLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[PassEvent] {
        &self.events
    }

    /// Forgets every recorded event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Indices materialized so far, in the order they were created.
    pub fn materialized(&self) -> impl Iterator<Item = usize> + '_ {
        self.events.iter().filter_map(|event| match *event {
            PassEvent::Materialized { index, .. } => Some(index),
            _ => None,
        })
    }

    /// Indices evicted so far, in the order they were destroyed.
    pub fn evicted(&self) -> impl Iterator<Item = usize> + '_ {
        self.events.iter().filter_map(|event| match *event {
            PassEvent::Evicted { index, .. } => Some(index),
            _ => None,
        })
    }
}

impl PassTrace for PassLog {
    fn jumped(&mut self, from: WindowState, anchor: usize) {
        self.events.push(PassEvent::Jumped { from, anchor });
    }

    fn materialized(&mut self, index: usize, edge: Edge) {
        self.events.push(PassEvent::Materialized { index, edge });
    }

    fn evicted(&mut self, index: usize, reason: Eviction) {
        self.events.push(PassEvent::Evicted { index, reason });
    }

    fn finished(&mut self, window: WindowState, flags: PassFlags) {
        self.events.push(PassEvent::Finished { window, flags });
    }
}
