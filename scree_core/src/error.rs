// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recoverable errors from node mutation.

use core::fmt;

/// Errors returned by [`NodeStore`](crate::node::NodeStore) setters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeError {
    /// Opacity outside `0.0..=1.0`, or NaN.
    OpacityOutOfRange(f32),
    /// A [`DamageConfig`](crate::config::DamageConfig) field is out of range.
    InvalidConfig,
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpacityOutOfRange(v) => write!(f, "opacity must be between 0 and 1, got {v}"),
            Self::InvalidConfig => f.write_str("damage configuration out of range"),
        }
    }
}

impl core::error::Error for NodeError {}
