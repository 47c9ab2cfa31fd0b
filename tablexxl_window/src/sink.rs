// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render sink: where materialized rows and spacer extents end up.

use crate::Scalar;

/// Receives the instructions of a window pass.
///
/// The engine calls [`materialize`](Self::materialize) to create a row and
/// immediately places it with either [`append_to_tail`](Self::append_to_tail)
/// or [`insert_at_head`](Self::insert_at_head). Implementations must keep
/// their visual order equal to the ascending index order implied by those
/// placements: tail placements go after every live row, head placements go
/// before every live row.
///
/// Every handle the engine receives is eventually given back through
/// [`evict`](Self::evict), either during a pass or when the engine is cleared.
pub trait RenderSink<T, S: Scalar> {
    /// Live render handle for one row.
    type Handle;

    /// Creates (but does not place) the row for `record` at `index`.
    fn materialize(&mut self, index: usize, record: &T) -> Self::Handle;

    /// Destroys a row previously returned by [`materialize`](Self::materialize).
    fn evict(&mut self, handle: Self::Handle);

    /// Places `handle` after every live row.
    fn append_to_tail(&mut self, handle: &Self::Handle);

    /// Places `handle` before every live row.
    fn insert_at_head(&mut self, handle: &Self::Handle);

    /// Sets the extent of the spacer standing in for rows before the window.
    fn set_top_spacer_extent(&mut self, extent: S);

    /// Sets the extent of the spacer standing in for rows after the window.
    fn set_bottom_spacer_extent(&mut self, extent: S);
}

impl<T, S: Scalar, R: RenderSink<T, S> + ?Sized> RenderSink<T, S> for &mut R {
    type Handle = R::Handle;

    fn materialize(&mut self, index: usize, record: &T) -> Self::Handle {
        (**self).materialize(index, record)
    }

    fn evict(&mut self, handle: Self::Handle) {
        (**self).evict(handle);
    }

    fn append_to_tail(&mut self, handle: &Self::Handle) {
        (**self).append_to_tail(handle);
    }

    fn insert_at_head(&mut self, handle: &Self::Handle) {
        (**self).insert_at_head(handle);
    }

    fn set_top_spacer_extent(&mut self, extent: S) {
        (**self).set_top_spacer_extent(extent);
    }

    fn set_bottom_spacer_extent(&mut self, extent: S) {
        (**self).set_bottom_spacer_extent(extent);
    }
}
