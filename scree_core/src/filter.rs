// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cache and effect attachments.
//!
//! Both are owned by the node they are attached to and are opaque to the
//! damage engine beyond the contracts below: a [`CacheFilter`] is told when
//! its raster is stale, and an [`EffectFilter`] describes how it grows bounds
//! and dirty rectangles.

use core::fmt;

use kurbo::Rect;

use crate::region::{DirtyRegionContainer, RegionPool};
use crate::transform::Transform3d;

/// Caching strategy requested for a cached node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CacheHint {
    /// No particular preference.
    #[default]
    Default,
    /// Favor reuse over fidelity.
    Speed,
    /// Favor fidelity over reuse.
    Quality,
    /// The node is expected to be scaled.
    Scale,
    /// The node is expected to be rotated.
    Rotate,
    /// The node is expected to be scaled and rotated.
    ScaleAndRotate,
}

/// Translation delta recorded for a node whose transform changed only in its
/// x/y translation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DirtyHint {
    /// Change in x translation.
    pub translate_x_delta: f64,
    /// Change in y translation.
    pub translate_y_delta: f64,
}

/// A per-node raster cache.
pub trait CacheFilter: fmt::Debug {
    /// Marks the cached raster stale.
    fn invalidate(&mut self);

    /// Notes that a cached child moved by `(dx, dy)` without other changes.
    ///
    /// Implementations may scroll the existing raster instead of rebuilding.
    fn invalidate_by_translation(&mut self, dx: f64, dy: f64);

    /// Returns `true` if the cache already uses `hint`.
    fn matches_hint(&self, hint: CacheHint) -> bool;

    /// Switches the cache to `hint`.
    fn set_hint(&mut self, hint: CacheHint);

    /// Releases any resources; called when the cache is detached.
    fn dispose(&mut self) {}
}

/// Identity of the effect an [`EffectFilter`] applies.
///
/// Two filters with the same id are considered the same effect, so replacing
/// one with the other is not a visual change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EffectId(pub u64);

/// A per-node image effect.
pub trait EffectFilter: fmt::Debug {
    /// The effect this filter applies.
    fn effect(&self) -> EffectId;

    /// Returns the output bounds of the effect applied to `content` (local
    /// space) and then mapped through `tx`.
    fn bounds(&self, content: Rect, tx: &Transform3d) -> Rect;

    /// Expands pre-effect dirty rectangles into post-effect ones.
    ///
    /// `input_bounds` is the node's content bounds. The returned container
    /// must be checked out of `pool`; the caller checks it back in.
    fn dirty_regions(
        &self,
        input_bounds: Rect,
        pre: &DirtyRegionContainer,
        pool: &mut RegionPool,
    ) -> DirtyRegionContainer;

    /// Releases any resources; called when the effect is detached.
    fn dispose(&mut self) {}
}
