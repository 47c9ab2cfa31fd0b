// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-height row geometry.
//!
//! Every row contributes exactly one row height, whatever its content. Measured
//! or variable heights are not modelled.

use core::ops::Range;

use crate::{Scalar, Viewport};

/// Maps row counts and indices to pixel extents for uniformly tall rows.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HeightModel<S: Scalar> {
    row_height: S,
}

impl<S: Scalar> HeightModel<S> {
    /// Creates a model for rows of `row_height` pixels.
    ///
    /// The height is expected to be positive and finite; [`Options`](crate::Options)
    /// guarantees this for values it hands out.
    #[must_use]
    pub fn new(row_height: S) -> Self {
        Self { row_height }
    }

    /// Height of a single row.
    #[must_use]
    pub fn row_height(&self) -> S {
        self.row_height
    }

    /// Pixel extent of `count` consecutive rows.
    #[must_use]
    pub fn extent(&self, count: usize) -> S {
        S::from_usize(count) * self.row_height
    }

    /// Pixel offset of the top edge of row `index`.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> S {
        self.extent(index)
    }

    /// Index of the row containing pixel offset `offset`, for a list of `len` rows.
    ///
    /// Offsets before the content map to `0`, offsets past it to `len - 1`.
    /// Returns `0` for an empty list.
    #[must_use]
    pub fn index_at_offset(&self, offset: S, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let raw = (offset.clamp_non_negative() / self.row_height).floor_to_isize();
        usize::try_from(raw).unwrap_or(0).min(len - 1)
    }

    /// Rows of a `len`-row list that intersect `viewport`.
    ///
    /// This is independent of what is materialized; it is the range a host
    /// would consider on screen.
    #[must_use]
    pub fn visible_range(&self, len: usize, viewport: Viewport<S>) -> Range<usize> {
        if len == 0 || viewport.is_empty() {
            return 0..0;
        }
        let content = self.extent(len);
        if viewport.top() >= content || viewport.bottom() <= S::zero() {
            return 0..0;
        }
        let start = self.index_at_offset(viewport.top(), len);
        let last = self.index_at_offset(viewport.bottom(), len);
        // A viewport ending exactly on a row boundary does not show that row.
        let end = if self.offset_of(last) < viewport.bottom() {
            last + 1
        } else {
            last
        };
        start..end.max(start + 1).min(len)
    }
}
