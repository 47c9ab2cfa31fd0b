// Copyright 2025 the TableXXL Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error returned when the table cannot redraw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConfigurationError {
    /// No render surface (sink and viewport probe) is bound.
    NoSurface,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSurface => f.write_str("no render surface is bound to the table"),
        }
    }
}

impl core::error::Error for ConfigurationError {}
