// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The windowed materialization engine.

use crate::{
    Edge, Eviction, HeightModel, Options, PassFlags, PassTrace, RenderSink, RowArena, Scalar,
    Spacers, Viewport, WindowState,
};

/// Outcome of one window pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PassSummary<S: Scalar> {
    /// Window after the pass.
    pub window: WindowState,
    /// Spacer extents pushed to the sink.
    pub spacers: Spacers<S>,
    /// Steps that changed the window.
    pub flags: PassFlags,
    /// Rows created during the pass.
    pub materialized: usize,
    /// Rows destroyed during the pass.
    pub evicted: usize,
}

/// Keeps a contiguous window of rows materialized around a viewport.
///
/// `H` is the sink's row handle type. The engine owns every live handle in a
/// [`RowArena`] and only ever hands them back through
/// [`RenderSink::evict`]. Dropping a `Windower` drops its handles without
/// evicting them; call [`clear`](Self::clear) first if the sink needs to know.
///
/// ```rust
/// use tablexxl_window::{Options, RenderSink, Viewport, Windower};
///
/// #[derive(Default)]
/// struct Rows(Vec<usize>);
///
/// impl RenderSink<String, f64> for Rows {
///     type Handle = usize;
///     fn materialize(&mut self, index: usize, _record: &String) -> usize { index }
///     fn evict(&mut self, handle: usize) { self.0.retain(|&i| i != handle); }
///     fn append_to_tail(&mut self, handle: &usize) { self.0.push(*handle); }
///     fn insert_at_head(&mut self, handle: &usize) { self.0.insert(0, *handle); }
///     fn set_top_spacer_extent(&mut self, _extent: f64) {}
///     fn set_bottom_spacer_extent(&mut self, _extent: f64) {}
/// }
///
/// let items: Vec<String> = (0..1000).map(|i| format!("row {i}")).collect();
/// let mut sink = Rows::default();
/// let mut windower = Windower::new(Options::new().with_block_size(10));
///
/// let summary = windower.pass(&items, Viewport::new(0.0, 480.0), &mut sink);
/// assert_eq!(summary.window.range(), 0..30);
/// assert_eq!(sink.0, (0..30).collect::<Vec<_>>());
/// assert_eq!(summary.spacers.bottom, 970.0 * 24.0);
/// ```
#[derive(Clone, Debug)]
pub struct Windower<H, S: Scalar = f64> {
    options: Options<S>,
    heights: HeightModel<S>,
    rows: RowArena<H>,
    spacers: Spacers<S>,
}

impl<H, S: Scalar> Windower<H, S> {
    /// Creates an engine with an empty window.
    #[must_use]
    pub fn new(options: Options<S>) -> Self {
        Self {
            options,
            heights: HeightModel::new(options.row_height()),
            rows: RowArena::new(),
            spacers: Spacers::zero(),
        }
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options<S> {
        &self.options
    }

    /// Height model derived from the options.
    #[must_use]
    pub fn heights(&self) -> &HeightModel<S> {
        &self.heights
    }

    /// Currently materialized range.
    #[must_use]
    pub fn window(&self) -> WindowState {
        self.rows.window()
    }

    /// Spacer extents computed by the last pass.
    #[must_use]
    pub fn spacers(&self) -> Spacers<S> {
        self.spacers
    }

    /// Handle of row `index`, if it is materialized.
    #[must_use]
    pub fn handle(&self, index: usize) -> Option<&H> {
        self.rows.get(index)
    }

    /// Live `(index, handle)` pairs in ascending index order.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = (usize, &H)> + ExactSizeIterator {
        self.rows.iter()
    }

    /// Total scrollable extent the spacers give a list of `len` rows.
    ///
    /// This is `len * row_height`, except with jumping disabled, where the
    /// content ends at the last materialized row.
    #[must_use]
    pub fn content_extent(&self, len: usize) -> S {
        if self.options.allow_jump() {
            self.heights.extent(len)
        } else {
            self.heights.extent(self.window().end().min(len))
        }
    }

    /// Evicts every materialized row and collapses both spacers.
    ///
    /// Returns the number of evicted rows.
    pub fn clear<T, R>(&mut self, sink: &mut R) -> usize
    where
        R: RenderSink<T, S, Handle = H>,
    {
        self.clear_with_trace::<T, R>(sink, &mut ())
    }

    /// Like [`clear`](Self::clear), reporting each eviction to `trace`.
    pub fn clear_with_trace<T, R>(&mut self, sink: &mut R, trace: &mut impl PassTrace) -> usize
    where
        R: RenderSink<T, S, Handle = H>,
    {
        let mut evicted = 0;
        for (index, handle) in self.rows.drain() {
            sink.evict(handle);
            trace.evicted(index, Eviction::Clear);
            evicted += 1;
        }
        self.spacers = Spacers::zero();
        sink.set_top_spacer_extent(S::zero());
        sink.set_bottom_spacer_extent(S::zero());
        evicted
    }

    /// Clears the window and switches to new options.
    ///
    /// This is the engine half of a data reset; the next pass starts from an
    /// empty window at index `0`.
    pub fn reset<T, R>(&mut self, options: Options<S>, sink: &mut R) -> usize
    where
        R: RenderSink<T, S, Handle = H>,
    {
        let evicted = self.clear::<T, R>(sink);
        self.options = options;
        self.heights = HeightModel::new(options.row_height());
        evicted
    }

    /// Runs one window pass for `items` seen through `viewport`.
    ///
    /// See [`pass_with_trace`](Self::pass_with_trace).
    pub fn pass<T, R>(&mut self, items: &[T], viewport: Viewport<S>, sink: &mut R) -> PassSummary<S>
    where
        R: RenderSink<T, S, Handle = H>,
    {
        self.pass_with_trace(items, viewport, sink, &mut ())
    }

    /// Runs one window pass, reporting every instruction to `trace`.
    ///
    /// A pass first checks whether the viewport left the materialized extent.
    /// If it did, the whole window is evicted and re-anchored on a block
    /// boundary one block above the viewport. It then:
    ///
    /// 1. appends blocks after the window until it reaches one block past the
    ///    viewport bottom,
    /// 2. evicts from the start while the window is over the limit,
    /// 3. inserts blocks before the window until it reaches one block above the
    ///    viewport top,
    /// 4. evicts from the end while the window is over the limit,
    ///
    /// and finally pushes both spacer extents to the sink.
    ///
    /// `items` is expected to be the sequence the window was built from. If it
    /// is shorter, rows past its end are evicted before anything else.
    pub fn pass_with_trace<T, R>(
        &mut self,
        items: &[T],
        viewport: Viewport<S>,
        sink: &mut R,
        trace: &mut impl PassTrace,
    ) -> PassSummary<S>
    where
        R: RenderSink<T, S, Handle = H>,
    {
        let len = items.len();
        let mut pass = PassCounts::default();

        #[cfg(feature = "tracing")]
        let _span = {
            let window = self.rows.window();
            tracing::debug_span!(
                "window_pass",
                len,
                offset = window.offset,
                limit = window.limit
            )
            .entered()
        };

        self.truncate_to::<T, R>(len, sink, trace, &mut pass);
        self.relocate_if_outside::<T, R>(len, viewport, sink, trace, &mut pass);
        self.grow_tail(items, viewport, sink, trace, &mut pass);
        self.trim::<T, R>(Edge::Head, sink, trace, &mut pass);
        self.grow_head(items, viewport, sink, trace, &mut pass);
        self.trim::<T, R>(Edge::Tail, sink, trace, &mut pass);

        let window = self.rows.window();
        self.spacers = Spacers::for_window(window, len, &self.heights, self.options.allow_jump());
        sink.set_top_spacer_extent(self.spacers.top);
        sink.set_bottom_spacer_extent(self.spacers.bottom);
        trace.finished(window, pass.flags);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            offset = window.offset,
            limit = window.limit,
            materialized = pass.materialized,
            evicted = pass.evicted,
            flags = ?pass.flags,
            "window pass finished"
        );

        PassSummary {
            window,
            spacers: self.spacers,
            flags: pass.flags,
            materialized: pass.materialized,
            evicted: pass.evicted,
        }
    }

    /// Index a relocated window starts at for a viewport whose top is `top`.
    ///
    /// One block above the viewport, rounded down to a block boundary, and
    /// clamped into `[0, len - 1]`.
    #[must_use]
    pub fn jump_anchor(&self, top: S, len: usize) -> usize {
        let row_height = self.heights.row_height();
        let raw = ((top - self.options.block_extent()) / row_height).floor_to_isize();
        if raw <= 0 {
            return 0;
        }
        let block = isize::try_from(self.options.block_size()).unwrap_or(isize::MAX);
        let aligned = raw.div_euclid(block) * block;
        usize::try_from(aligned)
            .unwrap_or(0)
            .min(len.saturating_sub(1))
    }

    fn discard<T, R>(
        sink: &mut R,
        trace: &mut impl PassTrace,
        pass: &mut PassCounts,
        (index, handle): (usize, H),
        reason: Eviction,
    ) where
        R: RenderSink<T, S, Handle = H>,
    {
        sink.evict(handle);
        trace.evicted(index, reason);
        pass.evicted += 1;
    }

    /// Evicts rows at or past `len`, left over from a longer item sequence.
    fn truncate_to<T, R>(
        &mut self,
        len: usize,
        sink: &mut R,
        trace: &mut impl PassTrace,
        pass: &mut PassCounts,
    ) where
        R: RenderSink<T, S, Handle = H>,
    {
        while self.rows.window().end() > len {
            let Some(row) = self.rows.pop_tail() else {
                break;
            };
            Self::discard::<T, R>(sink, trace, pass, row, Eviction::TrimTail);
            pass.flags |= PassFlags::TRIMMED_TAIL;
        }
        if self.rows.offset() > len.saturating_sub(1) {
            self.rows.reanchor(len.saturating_sub(1));
        }
    }

    /// Phase A: discard the window if the viewport lies entirely outside it.
    fn relocate_if_outside<T, R>(
        &mut self,
        len: usize,
        viewport: Viewport<S>,
        sink: &mut R,
        trace: &mut impl PassTrace,
        pass: &mut PassCounts,
    ) where
        R: RenderSink<T, S, Handle = H>,
    {
        let window = self.rows.window();
        let content_top = self.heights.offset_of(window.offset);
        let content_bottom = self.heights.offset_of(window.end());
        let outside = content_bottom < viewport.top() || content_top > viewport.bottom();
        if !outside {
            return;
        }

        let anchor = self.jump_anchor(viewport.top(), len);
        // Relocating onto the current anchor would rebuild the same rows.
        if anchor == window.offset {
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            from_offset = window.offset,
            from_limit = window.limit,
            anchor,
            "viewport left the window, jumping"
        );

        trace.jumped(window, anchor);
        for row in self.rows.drain() {
            Self::discard::<T, R>(sink, trace, pass, row, Eviction::Jump);
        }
        self.rows.reanchor(anchor);
        pass.flags |= PassFlags::JUMPED;
    }

    /// Phase B, step 1: append blocks until one block past the viewport bottom.
    fn grow_tail<T, R>(
        &mut self,
        items: &[T],
        viewport: Viewport<S>,
        sink: &mut R,
        trace: &mut impl PassTrace,
        pass: &mut PassCounts,
    ) where
        R: RenderSink<T, S, Handle = H>,
    {
        let target = viewport.bottom() + self.options.block_extent();
        let block = self.options.block_size();
        loop {
            let end = self.rows.window().end();
            if end >= items.len() || self.heights.offset_of(end) >= target {
                break;
            }
            let stop = end.saturating_add(block).min(items.len());
            for (index, record) in (end..stop).zip(&items[end..stop]) {
                let handle = sink.materialize(index, record);
                sink.append_to_tail(self.rows.push_tail(handle));
                trace.materialized(index, Edge::Tail);
                pass.materialized += 1;
            }
            pass.flags |= PassFlags::GREW_TAIL;
        }
    }

    /// Phase B, step 3: insert blocks until one block above the viewport top.
    fn grow_head<T, R>(
        &mut self,
        items: &[T],
        viewport: Viewport<S>,
        sink: &mut R,
        trace: &mut impl PassTrace,
        pass: &mut PassCounts,
    ) where
        R: RenderSink<T, S, Handle = H>,
    {
        let target = viewport.top() - self.options.block_extent();
        let block = self.options.block_size();
        loop {
            let offset = self.rows.offset();
            if offset == 0 || self.heights.offset_of(offset) <= target {
                break;
            }
            let start = offset.saturating_sub(block);
            for (index, record) in (start..offset).zip(&items[start..offset]).rev() {
                let handle = sink.materialize(index, record);
                match self.rows.push_head(handle) {
                    Ok(handle) => sink.insert_at_head(handle),
                    Err(handle) => {
                        sink.evict(handle);
                        return;
                    }
                }
                trace.materialized(index, Edge::Head);
                pass.materialized += 1;
            }
            pass.flags |= PassFlags::GREW_HEAD;
        }
    }

    /// Phase B, steps 2 and 4: evict from `edge` while over the limit.
    fn trim<T, R>(
        &mut self,
        edge: Edge,
        sink: &mut R,
        trace: &mut impl PassTrace,
        pass: &mut PassCounts,
    ) where
        R: RenderSink<T, S, Handle = H>,
    {
        let max = self.options.max_materialized();
        if self.rows.len() <= max {
            return;
        }
        let (reason, flag) = match edge {
            Edge::Head => (Eviction::TrimHead, PassFlags::TRIMMED_HEAD),
            Edge::Tail => (Eviction::TrimTail, PassFlags::TRIMMED_TAIL),
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            overflow = self.rows.len() - max,
            ?edge,
            "window over limit, trimming"
        );

        while self.rows.len() > max {
            let row = match edge {
                Edge::Head => self.rows.pop_head(),
                Edge::Tail => self.rows.pop_tail(),
            };
            let Some(row) = row else {
                break;
            };
            Self::discard::<T, R>(sink, trace, pass, row, reason);
        }
        pass.flags |= flag;
    }
}

#[derive(Default)]
struct PassCounts {
    flags: PassFlags,
    materialized: usize,
    evicted: usize,
}
