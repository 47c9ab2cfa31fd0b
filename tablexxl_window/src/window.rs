// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window bookkeeping: the materialized range, spacer extents, and viewport bounds.

use core::ops::Range;

use crate::{HeightModel, Scalar};

/// The contiguous range of materialized rows, `[offset, offset + limit)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WindowState {
    /// Index of the first materialized row.
    pub offset: usize,
    /// Number of materialized rows.
    pub limit: usize,
}

impl WindowState {
    /// The empty window at the start of the list.
    pub const EMPTY: Self = Self {
        offset: 0,
        limit: 0,
    };

    /// Creates a window covering `[offset, offset + limit)`.
    #[must_use]
    pub const fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// One past the last materialized index.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.limit
    }

    /// The materialized index range.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Returns `true` if nothing is materialized.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.limit == 0
    }

    /// Returns `true` if row `index` is materialized.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.offset && index < self.end()
    }

    /// Returns `true` if the window lies inside a list of `len` rows.
    #[must_use]
    pub const fn fits(&self, len: usize) -> bool {
        self.end() <= len
    }
}

/// Placeholder extents standing in for the rows before and after the window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spacers<S: Scalar> {
    /// Extent above the first materialized row.
    pub top: S,
    /// Extent below the last materialized row.
    ///
    /// Always zero when jumping is disabled.
    pub bottom: S,
}

impl<S: Scalar> Spacers<S> {
    /// Both spacers collapsed.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            top: S::zero(),
            bottom: S::zero(),
        }
    }

    /// Spacer extents for `window` within a list of `len` rows.
    ///
    /// With `allow_jump` disabled the bottom spacer is forced to zero.
    #[must_use]
    pub fn for_window(
        window: WindowState,
        len: usize,
        heights: &HeightModel<S>,
        allow_jump: bool,
    ) -> Self {
        let bottom = if allow_jump {
            heights.extent(len.saturating_sub(window.end()))
        } else {
            S::zero()
        };
        Self {
            top: heights.extent(window.offset),
            bottom,
        }
    }
}

impl<S: Scalar> Default for Spacers<S> {
    fn default() -> Self {
        Self::zero()
    }
}

/// Visible region `[top, bottom)` in content coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport<S: Scalar> {
    top: S,
    bottom: S,
}

impl<S: Scalar> Viewport<S> {
    /// Creates a viewport spanning `[top, bottom)`.
    ///
    /// A `bottom` above `top` collapses the viewport to `[top, top)`. A
    /// non-finite `top` is treated as `0`, a non-finite `bottom` as `top`.
    #[must_use]
    pub fn new(top: S, bottom: S) -> Self {
        let top = if top.is_finite() { top } else { S::zero() };
        let bottom = if bottom.is_finite() {
            bottom.max(top)
        } else {
            top
        };
        Self { top, bottom }
    }

    /// Creates a viewport from a scroll offset and a visible (client) extent.
    ///
    /// Negative or non-finite extents are treated as zero.
    #[must_use]
    pub fn from_scroll(scroll_offset: S, client_extent: S) -> Self {
        let extent = if client_extent.is_finite() {
            client_extent.clamp_non_negative()
        } else {
            S::zero()
        };
        Self::new(scroll_offset, scroll_offset + extent)
    }

    /// Top edge of the visible region.
    #[must_use]
    pub fn top(&self) -> S {
        self.top
    }

    /// Bottom edge (exclusive) of the visible region.
    #[must_use]
    pub fn bottom(&self) -> S {
        self.bottom
    }

    /// Visible extent.
    #[must_use]
    pub fn extent(&self) -> S {
        self.bottom - self.top
    }

    /// Returns `true` if the viewport shows nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bottom <= self.top
    }
}
