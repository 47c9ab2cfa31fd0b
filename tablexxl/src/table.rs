// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The table controller.

use core::fmt;

use tablexxl_window::{
    Options, PassSummary, PassTrace, RenderSink, Scalar, Spacers, WindowState, Windower,
};

use crate::{ConfigurationError, ViewportProbe, ViewportSignal};

/// A row sink together with the probe describing its scroll container.
struct Surface<R, P> {
    sink: R,
    probe: P,
}

/// Owns an item sequence and keeps its rows windowed inside a render surface.
///
/// The table couples a [`Windower`] with a bound sink and
/// [`ViewportProbe`]. Hosts either call
/// [`on_viewport_change`](Self::on_viewport_change) from their own scroll
/// handling, or let the probe raise the table's [`ViewportSignal`] and call
/// [`pump`](Self::pump) once per frame.
///
/// Dropping a bound table drops the sink with its rows still in place; call
/// [`unbind`](Self::unbind) first if they must be evicted.
pub struct TableXxl<T, R, P, S = f64>
where
    S: Scalar,
    R: RenderSink<T, S>,
{
    items: Vec<T>,
    windower: Windower<R::Handle, S>,
    surface: Option<Surface<R, P>>,
    signal: ViewportSignal,
}

impl<T, R, P, S> TableXxl<T, R, P, S>
where
    S: Scalar,
    R: RenderSink<T, S>,
    P: ViewportProbe<S>,
{
    /// Creates an unbound table with no items and default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            windower: Windower::new(Options::default()),
            surface: None,
            signal: ViewportSignal::new(),
        }
    }

    /// Creates a table bound to `sink` and `probe`.
    #[must_use]
    pub fn with_surface(sink: R, probe: P) -> Self {
        let mut table = Self::new();
        table.bind(sink, probe);
        table
    }

    /// Binds a render surface, returning the previously bound one.
    ///
    /// The previous surface has all its rows evicted. The probe is subscribed
    /// to the table's signal, which is raised so the next [`pump`](Self::pump)
    /// draws the stored items into the new surface.
    pub fn bind(&mut self, sink: R, mut probe: P) -> Option<(R, P)> {
        let previous = self.unbind();
        probe.subscribe(self.signal.clone());
        self.surface = Some(Surface { sink, probe });
        self.signal.notify();
        previous
    }

    /// Detaches the render surface after evicting every live row from it.
    pub fn unbind(&mut self) -> Option<(R, P)> {
        let mut surface = self.surface.take()?;
        self.windower.clear::<T, R>(&mut surface.sink);
        self.signal.take();
        Some((surface.sink, surface.probe))
    }

    /// Returns `true` if a render surface is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.surface.is_some()
    }

    /// Replaces the items and options, then redraws from the top of the window.
    ///
    /// Every live row is evicted and the window restarts empty at index `0`
    /// before one pass runs against the current viewport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NoSurface`] if no surface is bound. The
    /// items and options are stored anyway and drawn on the next bind.
    pub fn reset(
        &mut self,
        items: Vec<T>,
        options: Options<S>,
    ) -> Result<PassSummary<S>, ConfigurationError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(len = items.len(), ?options, "table reset");

        self.items = items;
        match self.surface.as_mut() {
            Some(surface) => {
                self.windower.reset::<T, R>(options, &mut surface.sink);
            }
            None => {
                self.windower = Windower::new(options);
                return Err(ConfigurationError::NoSurface);
            }
        }
        self.redraw(&mut ())
    }

    /// Runs one window pass against the probe's current viewport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NoSurface`] if no surface is bound.
    pub fn on_viewport_change(&mut self) -> Result<PassSummary<S>, ConfigurationError> {
        self.redraw(&mut ())
    }

    /// Like [`on_viewport_change`](Self::on_viewport_change), reporting each
    /// instruction of the pass to `trace`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NoSurface`] if no surface is bound.
    pub fn on_viewport_change_with_trace(
        &mut self,
        trace: &mut impl PassTrace,
    ) -> Result<PassSummary<S>, ConfigurationError> {
        self.redraw(trace)
    }

    /// Runs a pass if the probe signalled a change since the last one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NoSurface`] if no surface is bound.
    pub fn pump(&mut self) -> Result<Option<PassSummary<S>>, ConfigurationError> {
        if self.surface.is_none() {
            return Err(ConfigurationError::NoSurface);
        }
        if !self.signal.is_pending() {
            return Ok(None);
        }
        self.redraw(&mut ()).map(Some)
    }

    /// A handle to the table's change signal.
    ///
    /// Hosts without a [`ViewportProbe`] that can subscribe may raise it
    /// themselves.
    #[must_use]
    pub fn signal(&self) -> ViewportSignal {
        self.signal.clone()
    }

    fn redraw(&mut self, trace: &mut impl PassTrace) -> Result<PassSummary<S>, ConfigurationError> {
        let surface = self
            .surface
            .as_mut()
            .ok_or(ConfigurationError::NoSurface)?;

        #[cfg(feature = "tracing")]
        let start = std::time::Instant::now();

        self.signal.take();
        let viewport = surface.probe.viewport();
        let summary = self
            .windower
            .pass_with_trace(&self.items, viewport, &mut surface.sink, trace);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            elapsed = ?start.elapsed(),
            offset = summary.window.offset,
            limit = summary.window.limit,
            materialized = summary.materialized,
            evicted = summary.evicted,
            "redraw"
        );

        Ok(summary)
    }
}

impl<T, R, P, S> TableXxl<T, R, P, S>
where
    S: Scalar,
    R: RenderSink<T, S>,
{
    /// The item sequence.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options<S> {
        self.windower.options()
    }

    /// Currently materialized range.
    #[must_use]
    pub fn window(&self) -> WindowState {
        self.windower.window()
    }

    /// Spacer extents from the last pass.
    #[must_use]
    pub fn spacers(&self) -> Spacers<S> {
        self.windower.spacers()
    }

    /// Total scrollable extent of the table.
    ///
    /// With jumping disabled this ends at the last materialized row.
    #[must_use]
    pub fn content_extent(&self) -> S {
        self.windower.content_extent(self.items.len())
    }

    /// Handle of row `index`, if it is materialized.
    #[must_use]
    pub fn handle(&self, index: usize) -> Option<&R::Handle> {
        self.windower.handle(index)
    }

    /// The bound sink and probe.
    #[must_use]
    pub fn surface(&self) -> Option<(&R, &P)> {
        self.surface
            .as_ref()
            .map(|surface| (&surface.sink, &surface.probe))
    }

    /// The bound sink and probe, mutably.
    ///
    /// Changes made through the probe are picked up by the next
    /// [`pump`](Self::pump) if the probe raises its signal.
    #[must_use]
    pub fn surface_mut(&mut self) -> Option<(&mut R, &mut P)> {
        self.surface
            .as_mut()
            .map(|surface| (&mut surface.sink, &mut surface.probe))
    }
}

impl<T, R, P, S> Default for TableXxl<T, R, P, S>
where
    S: Scalar,
    R: RenderSink<T, S>,
    P: ViewportProbe<S>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R, P, S> fmt::Debug for TableXxl<T, R, P, S>
where
    S: Scalar,
    R: RenderSink<T, S>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableXxl")
            .field("len", &self.items.len())
            .field("options", self.windower.options())
            .field("window", &self.windower.window())
            .field("spacers", &self.windower.spacers())
            .field("bound", &self.surface.is_some())
            .field("pending", &self.signal.is_pending())
            .finish_non_exhaustive()
    }
}
