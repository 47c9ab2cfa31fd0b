// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory render surface.
//!
//! [`MemorySink`] stands in for a real widget tree: it keeps the live rows in
//! visual order together with a copy of their records, so hosts can render
//! from it directly or assert on it in tests. [`ScriptedViewport`] is a
//! viewport probe whose geometry is set by hand.

use std::collections::VecDeque;

use hashbrown::HashMap;
use tablexxl_window::{RenderSink, Scalar, Spacers};

use crate::{ViewportProbe, ViewportSignal};

/// Identifier of a row created by a [`MemorySink`].
///
/// Ids are never reused within one sink.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A row held by a [`MemorySink`].
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryRow<T> {
    /// Handle the engine holds for this row.
    pub id: RowId,
    /// Index of the row's record in the item sequence.
    pub index: usize,
    /// Copy of the record taken when the row was created.
    pub record: T,
}

/// Render sink that keeps rows in memory.
///
/// ```rust
/// use tablexxl::MemorySink;
/// use tablexxl_window::{Options, Viewport, Windower};
///
/// let items: Vec<String> = (0..500).map(|i| format!("row {i}")).collect();
/// let mut sink = MemorySink::new();
/// let mut windower = Windower::new(Options::new());
///
/// windower.pass(&items, Viewport::new(0.0, 240.0), &mut sink);
/// assert_eq!(sink.indices().collect::<Vec<_>>(), (0..20).collect::<Vec<_>>());
/// assert_eq!(sink.record(3).map(String::as_str), Some("row 3"));
/// assert_eq!(sink.spacers().bottom, 480.0 * 24.0);
/// ```
#[derive(Clone, Debug)]
pub struct MemorySink<T, S: Scalar = f64> {
    rows: VecDeque<MemoryRow<T>>,
    unplaced: Vec<MemoryRow<T>>,
    index_of: HashMap<RowId, usize>,
    spacers: Spacers<S>,
    next_id: u64,
    created: usize,
    evicted: usize,
}

impl<T, S: Scalar> MemorySink<T, S> {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: VecDeque::new(),
            unplaced: Vec::new(),
            index_of: HashMap::new(),
            spacers: Spacers::zero(),
            next_id: 0,
            created: 0,
            evicted: 0,
        }
    }

    /// Placed rows in visual order.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &MemoryRow<T>> + ExactSizeIterator {
        self.rows.iter()
    }

    /// Indices of the placed rows in visual order.
    pub fn indices(&self) -> impl DoubleEndedIterator<Item = usize> + ExactSizeIterator + '_ {
        self.rows.iter().map(|row| row.index)
    }

    /// Record of the placed row at `index`.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<&T> {
        self.position(index).map(|at| &self.rows[at].record)
    }

    /// The live row with handle `id`, placed or not.
    #[must_use]
    pub fn row(&self, id: RowId) -> Option<&MemoryRow<T>> {
        let index = *self.index_of.get(&id)?;
        match self.position(index) {
            Some(at) if self.rows[at].id == id => Some(&self.rows[at]),
            _ => self.unplaced.iter().find(|row| row.id == id),
        }
    }

    /// Item index of the live row with handle `id`.
    #[must_use]
    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.index_of.get(&id).copied()
    }

    /// Number of placed rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no rows are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Last spacer extents received.
    #[must_use]
    pub fn spacers(&self) -> Spacers<S> {
        self.spacers
    }

    /// Total number of rows ever created.
    #[must_use]
    pub fn created(&self) -> usize {
        self.created
    }

    /// Total number of rows ever evicted.
    #[must_use]
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    /// Position of item `index` in the placed rows.
    ///
    /// Placed rows always hold consecutive indices.
    fn position(&self, index: usize) -> Option<usize> {
        let first = self.rows.front()?.index;
        let at = index.checked_sub(first)?;
        (at < self.rows.len()).then_some(at)
    }

    fn take_unplaced(&mut self, id: RowId) -> Option<MemoryRow<T>> {
        let at = self.unplaced.iter().position(|row| row.id == id)?;
        Some(self.unplaced.swap_remove(at))
    }
}

impl<T, S: Scalar> Default for MemorySink<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, S: Scalar> RenderSink<T, S> for MemorySink<T, S> {
    type Handle = RowId;

    fn materialize(&mut self, index: usize, record: &T) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.created += 1;
        self.index_of.insert(id, index);
        self.unplaced.push(MemoryRow {
            id,
            index,
            record: record.clone(),
        });
        id
    }

    fn evict(&mut self, handle: RowId) {
        let Some(index) = self.index_of.remove(&handle) else {
            return;
        };
        self.evicted += 1;
        if self.take_unplaced(handle).is_some() {
            return;
        }
        if let Some(at) = self.position(index) {
            self.rows.remove(at);
        }
    }

    fn append_to_tail(&mut self, handle: &RowId) {
        let row = self.take_unplaced(*handle);
        debug_assert!(row.is_some(), "placed {handle:?} twice");
        if let Some(row) = row {
            self.rows.push_back(row);
        }
    }

    fn insert_at_head(&mut self, handle: &RowId) {
        let row = self.take_unplaced(*handle);
        debug_assert!(row.is_some(), "placed {handle:?} twice");
        if let Some(row) = row {
            self.rows.push_front(row);
        }
    }

    fn set_top_spacer_extent(&mut self, extent: S) {
        self.spacers.top = extent;
    }

    fn set_bottom_spacer_extent(&mut self, extent: S) {
        self.spacers.bottom = extent;
    }
}

/// Viewport probe driven by explicit calls.
///
/// Every change to the geometry raises the subscribed signal.
#[derive(Clone, Debug)]
pub struct ScriptedViewport<S: Scalar = f64> {
    scroll_offset: S,
    client_extent: S,
    signal: Option<ViewportSignal>,
}

impl<S: Scalar> ScriptedViewport<S> {
    /// Creates a probe scrolled to the top with the given visible extent.
    #[must_use]
    pub fn new(client_extent: S) -> Self {
        Self {
            scroll_offset: S::zero(),
            client_extent,
            signal: None,
        }
    }

    /// Moves the scroll offset to `offset`.
    pub fn scroll_to(&mut self, offset: S) {
        if offset != self.scroll_offset {
            self.scroll_offset = offset;
            self.changed();
        }
    }

    /// Moves the scroll offset by `delta`, stopping at zero.
    pub fn scroll_by(&mut self, delta: S) {
        self.scroll_to((self.scroll_offset + delta).clamp_non_negative());
    }

    /// Changes the visible extent.
    pub fn resize(&mut self, client_extent: S) {
        if client_extent != self.client_extent {
            self.client_extent = client_extent;
            self.changed();
        }
    }

    fn changed(&self) {
        if let Some(signal) = &self.signal {
            signal.notify();
        }
    }
}

impl<S: Scalar> ViewportProbe<S> for ScriptedViewport<S> {
    fn scroll_offset(&self) -> S {
        self.scroll_offset
    }

    fn client_extent(&self) -> S {
        self.client_extent
    }

    fn subscribe(&mut self, signal: ViewportSignal) {
        self.signal = Some(signal);
    }
}
