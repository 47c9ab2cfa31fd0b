// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index-keyed storage for live row handles.
//!
//! [`RowArena`] is a ring buffer keyed by `index - offset`. Because handles can
//! only be pushed or popped at either end, the set of live indices is always a
//! contiguous range and the arena doubles as the authoritative [`WindowState`].

use alloc::collections::VecDeque;

use crate::WindowState;

/// Live render handles for the contiguous range `[offset, offset + len)`.
#[derive(Clone, Debug)]
pub struct RowArena<H> {
    offset: usize,
    rows: VecDeque<H>,
}

impl<H> RowArena<H> {
    /// Creates an empty arena anchored at index `0`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 0,
            rows: VecDeque::new(),
        }
    }

    /// The window covered by live handles.
    #[must_use]
    pub fn window(&self) -> WindowState {
        WindowState::new(self.offset, self.rows.len())
    }

    /// Index of the first live handle (or the anchor, when empty).
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of live handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no handle is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the handle for row `index`, if it is live.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&H> {
        self.rows.get(index.checked_sub(self.offset)?)
    }

    /// Iterates `(index, handle)` pairs in ascending index order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &H)> + ExactSizeIterator {
        let offset = self.offset;
        self.rows
            .iter()
            .enumerate()
            .map(move |(slot, handle)| (offset + slot, handle))
    }

    /// Moves the anchor of an empty arena to `offset`.
    ///
    /// Returns `false` (and does nothing) if handles are still live.
    pub fn reanchor(&mut self, offset: usize) -> bool {
        if !self.rows.is_empty() {
            return false;
        }
        self.offset = offset;
        true
    }

    /// Stores the handle for row `offset + len` and returns it.
    pub fn push_tail(&mut self, handle: H) -> &H {
        self.rows.push_back(handle);
        &self.rows[self.rows.len() - 1]
    }

    /// Stores the handle for row `offset - 1` and returns it.
    ///
    /// Gives the handle back if the arena already starts at index `0`.
    pub fn push_head(&mut self, handle: H) -> Result<&H, H> {
        let Some(offset) = self.offset.checked_sub(1) else {
            return Err(handle);
        };
        self.rows.push_front(handle);
        self.offset = offset;
        Ok(&self.rows[0])
    }

    /// Removes the handle for the first live row.
    pub fn pop_head(&mut self) -> Option<(usize, H)> {
        let handle = self.rows.pop_front()?;
        let index = self.offset;
        self.offset += 1;
        Some((index, handle))
    }

    /// Removes the handle for the last live row.
    pub fn pop_tail(&mut self) -> Option<(usize, H)> {
        let handle = self.rows.pop_back()?;
        Some((self.offset + self.rows.len(), handle))
    }

    /// Removes every handle, last row first, and re-anchors at index `0`.
    pub fn drain(&mut self) -> impl Iterator<Item = (usize, H)> + '_ {
        let offset = self.offset;
        self.offset = 0;
        self.rows
            .drain(..)
            .enumerate()
            .rev()
            .map(move |(slot, handle)| (offset + slot, handle))
    }
}

impl<H> Default for RowArena<H> {
    fn default() -> Self {
        Self::new()
    }
}
