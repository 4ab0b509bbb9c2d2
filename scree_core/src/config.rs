// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs for damage tracking.

use crate::region::MAX_DIRTY_REGIONS;

/// Number of accumulated dirty-child signals above which a group is treated
/// as a single dirty unit instead of being descended into.
pub const DIRTY_CHILDREN_THRESHOLD: u32 = 12;

/// Configuration for a [`NodeStore`](crate::node::NodeStore).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageConfig {
    /// Margin added to every side of a screen-space dirty rectangle before it
    /// is clipped, covering antialiasing bleed.
    pub padding: f64,
    /// Capacity of each pooled dirty-region container (1..=15).
    pub region_count: usize,
    /// Pending removed-child snapshots a group keeps before it gives up and
    /// marks itself fully dirty.
    pub removed_children_threshold: usize,
    /// Whether translation-only transform changes under a cached parent use
    /// the translation-hint fast path.
    pub translation_hints: bool,
}

impl DamageConfig {
    /// The default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            padding: 1.0,
            region_count: 6,
            removed_children_threshold: 20,
            translation_hints: true,
        }
    }

    /// A configuration that collapses all damage into a single rectangle.
    #[must_use]
    pub const fn single_region() -> Self {
        Self {
            region_count: 1,
            ..Self::new()
        }
    }

    /// Returns this configuration with the given padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Returns this configuration with the given region count.
    #[must_use]
    pub const fn with_region_count(mut self, region_count: usize) -> Self {
        self.region_count = region_count;
        self
    }

    /// Returns `true` if every field is in range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.padding.is_finite()
            && self.padding >= 0.0
            && (1..=MAX_DIRTY_REGIONS).contains(&self.region_count)
    }
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self::new()
    }
}
