// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region culling.
//!
//! After accumulation, every node can be classified against each of the
//! frame's dirty regions. Two bits per region are packed into a `u32`,
//! region `i` at bits `2i..2i+2`:
//!
//! | bits | meaning |
//! |------|---------|
//! | `00` | outside the region |
//! | `01` | overlaps the region ([`CULL_INTERSECTS`]) |
//! | `10` | inside the region ([`CULL_CONTAINS`]) |
//!
//! A child is only tested against regions its parent overlaps, and a group
//! is only descended into if it overlaps at least one region.

use kurbo::Rect;

use crate::bounds;
use crate::region::DirtyRegionContainer;
use crate::trace::{CullEvent, Tracer};
use crate::transform::Transform3d;

use super::id::{INVALID, NodeId};
use super::state::NodeKind;
use super::store::NodeStore;

/// Culling code: the node overlaps the region.
pub const CULL_INTERSECTS: u32 = 0x1;

/// Culling code: the region contains the node.
pub const CULL_CONTAINS: u32 = 0x2;

/// Mask of every region's [`CULL_INTERSECTS`] bit.
pub const CULL_INTERSECTS_MASK: u32 = 0x1555_5555;

/// A node's relation to one dirty region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CullClass {
    /// Outside the region.
    Outside,
    /// Overlaps the region.
    Intersects,
    /// Entirely inside the region.
    Contained,
}

impl CullClass {
    /// Decodes region `region` from packed culling bits.
    #[must_use]
    pub fn of(bits: u32, region: usize) -> Self {
        match (bits >> (2 * region)) & 0x3 {
            CULL_INTERSECTS => Self::Intersects,
            CULL_CONTAINS => Self::Contained,
            _ => Self::Outside,
        }
    }
}

/// Work counters for one culling pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CullStats {
    /// Regions in the container.
    pub regions: u32,
    /// Nodes whose bits were recomputed.
    pub nodes_classified: u32,
    /// Nodes whose dirty state was cleared because their subtree lies
    /// outside every region.
    pub nodes_cleared: u32,
}

impl NodeStore {
    /// Classifies the subtree rooted at `id` against `regions`.
    ///
    /// `tx` maps the node's parent space to the scene and `projection` the
    /// scene to the screen. A node outside every region that is still dirty
    /// has its dirty subtree cleared, since nothing will draw it this frame.
    pub fn do_pre_culling(
        &mut self,
        id: NodeId,
        regions: &DirtyRegionContainer,
        tx: &Transform3d,
        projection: &Transform3d,
    ) -> CullStats {
        self.validate(id);
        let mut stats = CullStats {
            regions: u32::try_from(regions.size()).unwrap_or(u32::MAX),
            ..CullStats::default()
        };
        self.mark_cull_regions_at(id.idx, regions, None, tx, projection, &mut stats);
        stats
    }

    /// [`do_pre_culling`](Self::do_pre_culling), reporting the outcome to
    /// `tracer`.
    pub fn do_pre_culling_traced(
        &mut self,
        id: NodeId,
        regions: &DirtyRegionContainer,
        tx: &Transform3d,
        projection: &Transform3d,
        tracer: &mut Tracer<'_>,
    ) -> CullStats {
        let stats = self.do_pre_culling(id, regions, tx, projection);
        tracer.cull(&CullEvent {
            frame_index: tracer.frame_index(),
            stats,
        });
        #[cfg(feature = "trace-rich")]
        {
            let mut records = alloc::vec::Vec::new();
            self.collect_cull_records(id.idx, &mut records);
            tracer.cull_records(tracer.frame_index(), &records);
        }
        stats
    }

    /// Classifies one node given its parent's bits (`None` at the root of
    /// the pass), then recurses into groups that overlap some region.
    pub fn mark_cull_regions(
        &mut self,
        id: NodeId,
        regions: &DirtyRegionContainer,
        parent_bits: Option<u32>,
        tx: &Transform3d,
        projection: &Transform3d,
    ) -> CullStats {
        self.validate(id);
        let mut stats = CullStats::default();
        self.mark_cull_regions_at(id.idx, regions, parent_bits, tx, projection, &mut stats);
        stats
    }

    fn mark_cull_regions_at(
        &mut self,
        idx: u32,
        regions: &DirtyRegionContainer,
        parent_bits: Option<u32>,
        tx: &Transform3d,
        projection: &Transform3d,
        stats: &mut CullStats,
    ) {
        let i = idx as usize;
        let screen = projection.transform_rect(tx.transform_rect(self.transformed_bounds[i]));
        let bits = cull_bits(screen, regions, parent_bits);
        self.culling_bits[i] = bits;
        stats.nodes_classified += 1;

        if bits == 0 && !self.is_clean_at(idx) {
            let cleared = self.clear_dirty_tree_at(idx);
            stats.nodes_cleared = stats
                .nodes_cleared
                .saturating_add(u32::try_from(cleared).unwrap_or(u32::MAX));
        }

        if self.kind[i] == NodeKind::Group && bits & CULL_INTERSECTS_MASK != 0 {
            let child_tx = *tx * self.transform[i];
            let mut child = self.first_child[i];
            while child != INVALID {
                self.mark_cull_regions_at(child, regions, Some(bits), &child_tx, projection, stats);
                child = self.next_sibling[child as usize];
            }
        }
    }

    #[cfg(feature = "trace-rich")]
    fn collect_cull_records(&self, idx: u32, out: &mut alloc::vec::Vec<crate::trace::CullRecord>) {
        out.push(crate::trace::CullRecord {
            node_index: idx,
            bits: self.culling_bits[idx as usize],
        });
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.collect_cull_records(child, out);
            child = self.next_sibling[child as usize];
        }
    }
}

/// Packs the classification of `screen` against every region the parent
/// overlaps.
fn cull_bits(screen: Rect, regions: &DirtyRegionContainer, parent_bits: Option<u32>) -> u32 {
    let mut bits = 0;
    for (i, region) in regions.iter().enumerate() {
        let shift = 2 * i;
        let parent_overlaps = parent_bits.is_none_or(|p| p & (CULL_INTERSECTS << shift) != 0);
        if parent_overlaps && bounds::intersects(region, screen) {
            let code = if bounds::contains_rect(region, screen) {
                CULL_CONTAINS
            } else {
                CULL_INTERSECTS
            };
            bits |= code << shift;
        }
    }
    bits
}
