// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport geometry and change notification.

use std::cell::Cell;
use std::rc::Rc;

use tablexxl_window::{Scalar, Viewport};

/// Shared flag a [`ViewportProbe`] raises when its geometry changes.
///
/// Clones share the same flag. The table owns one and hands a clone to its
/// probe on bind; [`TableXxl::pump`](crate::TableXxl::pump) consumes it.
#[derive(Clone, Debug, Default)]
pub struct ViewportSignal(Rc<Cell<bool>>);

impl ViewportSignal {
    /// Creates a lowered signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the signal.
    pub fn notify(&self) {
        self.0.set(true);
    }

    /// Returns `true` if the signal is raised.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.0.get()
    }

    /// Lowers the signal, returning whether it was raised.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

/// Source of the scroll position and visible extent.
///
/// Implementations report geometry in the same coordinate space as the row
/// height. They must not call back into the table; they only raise the
/// subscribed signal.
pub trait ViewportProbe<S: Scalar> {
    /// Current scroll offset along the list axis.
    fn scroll_offset(&self) -> S;

    /// Visible extent of the scroll container.
    fn client_extent(&self) -> S;

    /// Registers the signal to raise whenever the geometry changes.
    ///
    /// Replaces any previously subscribed signal.
    fn subscribe(&mut self, signal: ViewportSignal);

    /// The visible region built from the offset and extent.
    fn viewport(&self) -> Viewport<S> {
        Viewport::from_scroll(self.scroll_offset(), self.client_extent())
    }
}

impl<S: Scalar, P: ViewportProbe<S> + ?Sized> ViewportProbe<S> for &mut P {
    fn scroll_offset(&self) -> S {
        (**self).scroll_offset()
    }

    fn client_extent(&self) -> S {
        (**self).client_extent()
    }

    fn subscribe(&mut self, signal: ViewportSignal) {
        (**self).subscribe(signal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_flag() {
        let signal = ViewportSignal::new();
        let probe_side = signal.clone();
        assert!(!signal.is_pending());

        probe_side.notify();
        probe_side.notify();
        assert!(signal.is_pending());
        assert!(signal.take());
        assert!(!signal.take());
        assert!(!probe_side.is_pending());
    }
}
