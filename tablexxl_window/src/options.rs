// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window configuration.
//!
//! Every setter coerces or clamps its input, so an [`Options`] value is always
//! valid once constructed. Invalid values are never reported as errors.

use crate::Scalar;

/// Row height used when none (or an invalid one) is supplied.
pub const DEFAULT_ROW_HEIGHT: usize = 24;

/// Lower bound for [`Options::max_materialized`].
pub const MIN_MAX_MATERIALIZED: usize = 100;

/// Lower bound for [`Options::block_size`].
pub const MIN_BLOCK_SIZE: usize = 1;

/// Default for [`Options::block_size`].
pub const DEFAULT_BLOCK_SIZE: usize = 10;

/// Configuration for a windowed list.
///
/// ```rust
/// use tablexxl_window::Options;
///
/// let options = Options::<f64>::new()
///     .with_row_height(-5.0)
///     .with_max_materialized(20)
///     .with_block_size(0);
///
/// // Out-of-range values are coerced, never rejected.
/// assert_eq!(options.row_height(), 24.0);
/// assert_eq!(options.max_materialized(), 100);
/// assert_eq!(options.block_size(), 1);
/// assert!(options.allow_jump());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "OptionsRepr<S>", into = "OptionsRepr<S>"),
    serde(bound(
        serialize = "S: Scalar + serde::Serialize",
        deserialize = "S: Scalar + serde::Deserialize<'de>"
    ))
)]
pub struct Options<S: Scalar> {
    row_height: S,
    max_materialized: usize,
    block_size: usize,
    allow_jump: bool,
}

impl<S: Scalar> Options<S> {
    /// Creates options with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            row_height: S::from_usize(DEFAULT_ROW_HEIGHT),
            max_materialized: MIN_MAX_MATERIALIZED,
            block_size: DEFAULT_BLOCK_SIZE,
            allow_jump: true,
        }
    }

    /// Sets the fixed row height.
    ///
    /// Non-finite or non-positive heights fall back to [`DEFAULT_ROW_HEIGHT`].
    #[must_use]
    pub fn with_row_height(mut self, row_height: S) -> Self {
        self.row_height = if row_height.is_positive_finite() {
            row_height
        } else {
            S::from_usize(DEFAULT_ROW_HEIGHT)
        };
        self
    }

    /// Sets the maximum number of rows kept materialized after a pass.
    ///
    /// Clamped to at least [`MIN_MAX_MATERIALIZED`].
    #[must_use]
    pub fn with_max_materialized(mut self, max_materialized: usize) -> Self {
        self.max_materialized = max_materialized.max(MIN_MAX_MATERIALIZED);
        self
    }

    /// Sets how many rows are materialized per growth step.
    ///
    /// Clamped to at least [`MIN_BLOCK_SIZE`].
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(MIN_BLOCK_SIZE);
        self
    }

    /// Sets whether the bottom spacer reflects the rows after the window.
    ///
    /// When `false`, the bottom spacer is always zero and the scrollable
    /// extent ends at the last materialized row.
    #[must_use]
    pub fn with_allow_jump(mut self, allow_jump: bool) -> Self {
        self.allow_jump = allow_jump;
        self
    }

    /// Fixed height of every row.
    #[must_use]
    pub fn row_height(&self) -> S {
        self.row_height
    }

    /// Upper bound on the window length at the end of a pass.
    #[must_use]
    pub fn max_materialized(&self) -> usize {
        self.max_materialized
    }

    /// Rows per growth step; also the jump alignment.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Whether the bottom spacer tracks the remaining rows.
    #[must_use]
    pub fn allow_jump(&self) -> bool {
        self.allow_jump
    }

    /// Pixel extent of one block of rows.
    #[must_use]
    pub fn block_extent(&self) -> S {
        S::from_usize(self.block_size) * self.row_height
    }
}

impl<S: Scalar> Default for Options<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire representation of [`Options`], using the host-facing option names.
///
/// Missing fields take their defaults; present fields go through the same
/// clamping setters as [`Options`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct OptionsRepr<S> {
    row_height: Option<S>,
    max_materialized: Option<usize>,
    block_size: Option<usize>,
    allow_jump: Option<bool>,
}

#[cfg(feature = "serde")]
impl<S> Default for OptionsRepr<S> {
    fn default() -> Self {
        Self {
            row_height: None,
            max_materialized: None,
            block_size: None,
            allow_jump: None,
        }
    }
}

#[cfg(feature = "serde")]
impl<S: Scalar> From<OptionsRepr<S>> for Options<S> {
    fn from(repr: OptionsRepr<S>) -> Self {
        let mut options = Self::new();
        if let Some(row_height) = repr.row_height {
            options = options.with_row_height(row_height);
        }
        if let Some(max_materialized) = repr.max_materialized {
            options = options.with_max_materialized(max_materialized);
        }
        if let Some(block_size) = repr.block_size {
            options = options.with_block_size(block_size);
        }
        if let Some(allow_jump) = repr.allow_jump {
            options = options.with_allow_jump(allow_jump);
        }
        options
    }
}

#[cfg(feature = "serde")]
impl<S: Scalar> From<Options<S>> for OptionsRepr<S> {
    fn from(options: Options<S>) -> Self {
        Self {
            row_height: Some(options.row_height),
            max_materialized: Some(options.max_materialized),
            block_size: Some(options.block_size),
            allow_jump: Some(options.allow_jump),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = Options::<f64>::default();
        assert_eq!(options.row_height(), 24.0);
        assert_eq!(options.max_materialized(), MIN_MAX_MATERIALIZED);
        assert_eq!(options.block_size(), DEFAULT_BLOCK_SIZE);
        assert!(options.allow_jump());
    }

    #[test]
    fn invalid_row_heights_fall_back_to_default() {
        for bad in [0.0_f32, -1.0, f32::NAN, f32::INFINITY] {
            let options = Options::<f32>::new().with_row_height(bad);
            assert_eq!(options.row_height(), 24.0, "row height {bad} not coerced");
        }
        assert_eq!(Options::<f32>::new().with_row_height(18.5).row_height(), 18.5);
    }

    #[test]
    fn counts_are_floor_clamped() {
        let options = Options::<f64>::new()
            .with_max_materialized(0)
            .with_block_size(0);
        assert_eq!(options.max_materialized(), 100);
        assert_eq!(options.block_size(), 1);

        let options = Options::<f64>::new()
            .with_max_materialized(250)
            .with_block_size(25);
        assert_eq!(options.max_materialized(), 250);
        assert_eq!(options.block_size(), 25);
    }

    #[test]
    fn block_extent_is_block_times_row_height() {
        let options = Options::<f64>::new().with_block_size(10);
        assert_eq!(options.block_extent(), 240.0);
    }
}
