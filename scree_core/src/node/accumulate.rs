// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame dirty-region accumulation.
//!
//! A single downward pass from the root collects screen-space rectangles for
//! every dirty node. Clean subtrees are skipped outright, a dirty node is
//! taken as one rectangle without looking at its children, and only groups
//! that merely have dirty descendants are descended into.
//!
//! Groups with an effect or a clip node accumulate their children into a
//! scratch container from the [`RegionPool`], post-process it, and merge the
//! result. Every scratch container goes back to the pool on every path.

use kurbo::Rect;

use crate::bounds;
use crate::config::DIRTY_CHILDREN_THRESHOLD;
use crate::region::{DirtyRegionContainer, RegionPool};
use crate::trace::{AccumulateEvent, Tracer};
use crate::transform::Transform3d;

use super::id::{INVALID, NodeId};
use super::state::DirtyState;
use super::store::NodeStore;

/// Outcome of accumulating one subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccumulateStatus {
    /// Accumulation finished; the container holds the subtree's damage.
    Ok,
    /// Some dirty rectangle covered the whole clip, so the whole clip is
    /// dirty and the traversal stopped early.
    ContainsClip,
}

/// Work counters for one accumulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AccumulateStats {
    /// Nodes whose dirty state was examined.
    pub nodes_visited: u32,
    /// Groups whose children were walked.
    pub groups_descended: u32,
    /// Groups taken as a single unit because of their dirty-child counter.
    pub threshold_short_circuits: u32,
    /// Removed-child snapshots contributed.
    pub removed_visited: u32,
    /// Rectangles added to a container.
    pub rects_added: u32,
}

/// Result of [`NodeStore::accumulate_dirty_regions`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Accumulation {
    /// Whether the clip was fully covered.
    pub status: AccumulateStatus,
    /// What the traversal did.
    pub stats: AccumulateStats,
}

impl NodeStore {
    /// Collects the screen-space damage of the subtree rooted at `id` into
    /// `out`.
    ///
    /// `tx` maps the node's parent space to the scene, `projection` maps the
    /// scene to the screen, and `clip` bounds the result in screen space.
    /// The tree is not modified; call
    /// [`clear_dirty_tree`](Self::clear_dirty_tree) once the frame is drawn.
    ///
    /// With [`AccumulateStatus::ContainsClip`] the contents of `out` are
    /// incomplete and the caller should redraw the whole clip.
    pub fn accumulate_dirty_regions(
        &self,
        id: NodeId,
        clip: Rect,
        pool: &mut RegionPool,
        out: &mut DirtyRegionContainer,
        tx: &Transform3d,
        projection: &Transform3d,
    ) -> Accumulation {
        self.validate(id);
        let outstanding = pool.outstanding();
        let mut stats = AccumulateStats::default();
        let status = self.accumulate_at(id.idx, clip, pool, out, tx, projection, &mut stats);
        debug_assert_eq!(
            pool.outstanding(),
            outstanding,
            "region container leaked during accumulation"
        );
        Accumulation { status, stats }
    }

    /// [`accumulate_dirty_regions`](Self::accumulate_dirty_regions), reporting
    /// the outcome to `tracer`.
    pub fn accumulate_dirty_regions_traced(
        &self,
        id: NodeId,
        clip: Rect,
        pool: &mut RegionPool,
        out: &mut DirtyRegionContainer,
        tx: &Transform3d,
        projection: &Transform3d,
        tracer: &mut Tracer<'_>,
    ) -> Accumulation {
        let acc = self.accumulate_dirty_regions(id, clip, pool, out, tx, projection);
        tracer.accumulate(&AccumulateEvent {
            frame_index: tracer.frame_index(),
            status: acc.status,
            rect_count: out.size(),
            stats: acc.stats,
        });
        #[cfg(feature = "trace-rich")]
        {
            let rects: alloc::vec::Vec<_> =
                out.iter().map(crate::trace::DamageRect::from_rect).collect();
            tracer.damage_rects(tracer.frame_index(), &rects);
        }
        acc
    }

    /// Takes the node as one rectangle: its dirty bounds, or its transformed
    /// bounds when those are empty.
    pub fn accumulate_node_dirty_region(
        &self,
        id: NodeId,
        clip: Rect,
        out: &mut DirtyRegionContainer,
        tx: &Transform3d,
        projection: &Transform3d,
    ) -> AccumulateStatus {
        self.validate(id);
        let mut stats = AccumulateStats::default();
        self.accumulate_node_at(id.idx, clip, out, tx, projection, &mut stats)
    }

    /// Returns the node's padded screen-space dirty rectangle, as used by
    /// [`accumulate_node_dirty_region`](Self::accumulate_node_dirty_region).
    #[must_use]
    pub fn dirty_region(&self, id: NodeId, tx: &Transform3d, projection: &Transform3d) -> Rect {
        self.validate(id);
        self.screen_region(self.damage_source_at(id.idx), tx, projection)
    }

    // -- Internal helpers --

    fn accumulate_at(
        &self,
        idx: u32,
        clip: Rect,
        pool: &mut RegionPool,
        out: &mut DirtyRegionContainer,
        tx: &Transform3d,
        projection: &Transform3d,
        stats: &mut AccumulateStats,
    ) -> AccumulateStatus {
        stats.nodes_visited += 1;
        let i = idx as usize;
        if self.dirty[i] != DirtyState::Clean {
            self.accumulate_node_at(idx, clip, out, tx, projection, stats)
        } else if self.child_dirty[i] {
            self.accumulate_group_at(idx, clip, pool, out, tx, projection, stats)
        } else {
            AccumulateStatus::Ok
        }
    }

    fn accumulate_node_at(
        &self,
        idx: u32,
        clip: Rect,
        out: &mut DirtyRegionContainer,
        tx: &Transform3d,
        projection: &Transform3d,
        stats: &mut AccumulateStats,
    ) -> AccumulateStatus {
        let region = self.screen_region(self.damage_source_at(idx), tx, projection);
        add_clipped(region, clip, out, stats)
    }

    /// Dirty bounds if any, else the current transformed bounds.
    pub(crate) fn damage_source_at(&self, idx: u32) -> Rect {
        let i = idx as usize;
        if bounds::is_empty(self.dirty_bounds[i]) {
            self.transformed_bounds[i]
        } else {
            self.dirty_bounds[i]
        }
    }

    /// Maps a parent-space rectangle to the screen and pads it.
    fn screen_region(&self, local: Rect, tx: &Transform3d, projection: &Transform3d) -> Rect {
        if bounds::is_empty(local) {
            return bounds::EMPTY;
        }
        let scene = tx.transform_rect(local);
        bounds::pad(projection.transform_rect(scene), self.config.padding)
    }

    fn accumulate_group_at(
        &self,
        idx: u32,
        clip: Rect,
        pool: &mut RegionPool,
        out: &mut DirtyRegionContainer,
        tx: &Transform3d,
        projection: &Transform3d,
        stats: &mut AccumulateStats,
    ) -> AccumulateStatus {
        let i = idx as usize;
        if self.dirty_child_count[i] > DIRTY_CHILDREN_THRESHOLD {
            stats.threshold_short_circuits += 1;
            return self.accumulate_node_at(idx, clip, out, tx, projection, stats);
        }
        stats.groups_descended += 1;

        let render_tx = *tx * self.transform[i];
        let clip_node = self.clip_node[i];

        if let Some(effect) = self.effect[i].as_deref() {
            // Children are gathered in the group's local space so the effect
            // sees the same coordinates as its content.
            let Some(local_inverse) = render_tx.inverse() else {
                return AccumulateStatus::Ok;
            };
            // A projection without an inverse (one flattening depth, say)
            // leaves the clip in scene coordinates.
            let scene_clip = projection
                .inverse()
                .map_or(clip, |inverse| inverse.transform_rect(clip));
            let local_clip = local_inverse.transform_rect(scene_clip);
            let mut scratch = pool.check_out();
            let status = self.accumulate_children(
                idx,
                local_clip,
                pool,
                &mut scratch,
                &Transform3d::IDENTITY,
                &Transform3d::IDENTITY,
                stats,
            );
            if status == AccumulateStatus::Ok {
                let post = effect.dirty_regions(self.content_bounds[i], &scratch, pool);
                scratch.replace_with(&post);
                pool.check_in(post);
                if clip_node != INVALID {
                    scratch.apply_clip(self.complete_bounds_at(clip_node, &Transform3d::IDENTITY));
                }
                scratch.apply_transform(&(*projection * render_tx));
                scratch.apply_clip(clip);
                out.merge(&scratch);
            }
            pool.check_in(scratch);
            status
        } else if clip_node != INVALID {
            let clip_bounds =
                projection.transform_rect(self.complete_bounds_at(clip_node, &render_tx));
            let my_clip = bounds::intersect(clip_bounds, clip);
            let mut scratch = pool.check_out();
            let mut status = self.accumulate_children(
                idx,
                my_clip,
                pool,
                &mut scratch,
                &render_tx,
                projection,
                stats,
            );
            if status == AccumulateStatus::ContainsClip {
                // Children overflow the group's clip; the group's own bounds
                // are the tighter answer.
                status = self.accumulate_node_at(idx, clip, out, tx, projection, stats);
            } else {
                out.merge(&scratch);
            }
            pool.check_in(scratch);
            status
        } else {
            self.accumulate_children(idx, clip, pool, out, &render_tx, projection, stats)
        }
    }

    /// Walks pending removal snapshots (newest first), then the children.
    fn accumulate_children(
        &self,
        idx: u32,
        clip: Rect,
        pool: &mut RegionPool,
        out: &mut DirtyRegionContainer,
        tx: &Transform3d,
        projection: &Transform3d,
        stats: &mut AccumulateStats,
    ) -> AccumulateStatus {
        for removed in self.removed[idx as usize].iter().rev() {
            stats.removed_visited += 1;
            let region = self.screen_region(removed.bounds, tx, projection);
            if add_clipped(region, clip, out, stats) == AccumulateStatus::ContainsClip {
                return AccumulateStatus::ContainsClip;
            }
        }
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            let status = self.accumulate_at(child, clip, pool, out, tx, projection, stats);
            if status == AccumulateStatus::ContainsClip {
                return status;
            }
            child = self.next_sibling[child as usize];
        }
        AccumulateStatus::Ok
    }
}

/// Adds `region ∩ clip` to `out` unless it is empty or covers the clip.
fn add_clipped(
    region: Rect,
    clip: Rect,
    out: &mut DirtyRegionContainer,
    stats: &mut AccumulateStats,
) -> AccumulateStatus {
    if bounds::is_empty(region) || !bounds::intersects(region, clip) {
        return AccumulateStatus::Ok;
    }
    if bounds::contains_rect(region, clip) {
        return AccumulateStatus::ContainsClip;
    }
    out.add(bounds::intersect(region, clip));
    stats.rects_added += 1;
    AccumulateStatus::Ok
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec::Vec;

    use super::*;
    use crate::testing::GrowEffect;

    fn r(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect::new(x0, y0, x1, y1)
    }

    const SCREEN: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    fn leaf_at(store: &mut NodeStore, parent: NodeId, b: Rect) -> NodeId {
        let leaf = store.create_leaf();
        store.add_child(parent, leaf);
        store.set_content_bounds(leaf, b);
        store.set_transformed_bounds(leaf, b, false);
        leaf
    }

    fn accumulate(
        store: &NodeStore,
        root: NodeId,
        clip: Rect,
        pool: &mut RegionPool,
    ) -> (Accumulation, DirtyRegionContainer) {
        let mut out = DirtyRegionContainer::new(pool.region_count());
        let acc = store.accumulate_dirty_regions(
            root,
            clip,
            pool,
            &mut out,
            &Transform3d::IDENTITY,
            &Transform3d::IDENTITY,
        );
        (acc, out)
    }

    /// Root -> A -> {Leaf1, Leaf2}, all clean.
    fn scenario() -> (NodeStore, NodeId, NodeId, NodeId, NodeId) {
        let mut store = NodeStore::new();
        let root = store.create_group();
        let a = store.create_group();
        store.add_child(root, a);
        let l1 = leaf_at(&mut store, a, r(0.0, 0.0, 10.0, 10.0));
        let l2 = leaf_at(&mut store, a, r(40.0, 40.0, 50.0, 50.0));
        store.clear_dirty_tree(root);
        (store, root, a, l1, l2)
    }

    #[test]
    fn leaf_growth_yields_one_padded_rect() {
        let (mut store, root, a, l1, l2) = scenario();
        store.set_content_bounds(l1, r(0.0, 0.0, 10.0, 20.0));
        store.set_transformed_bounds(l1, r(0.0, 0.0, 10.0, 20.0), false);
        assert_eq!(store.dirty_state(l1), DirtyState::Dirty);
        assert!(store.is_child_dirty(a));
        assert!(store.is_child_dirty(root));
        assert_eq!(store.dirty_state(l2), DirtyState::Clean);

        let mut pool = RegionPool::new(6);
        let (acc, out) = accumulate(&store, root, SCREEN, &mut pool);
        assert_eq!(acc.status, AccumulateStatus::Ok);
        assert_eq!(out.as_slice(), &[r(0.0, 0.0, 11.0, 21.0)]);
        assert_eq!(pool.outstanding(), 0);
    }

    #[test]
    fn clean_tree_contributes_nothing() {
        let (mut store, root, _, l1, _) = scenario();
        store.mark_dirty(l1);
        store.clear_dirty_tree(root);
        let mut pool = RegionPool::new(6);
        let (acc, out) = accumulate(&store, root, SCREEN, &mut pool);
        assert_eq!(acc.status, AccumulateStatus::Ok);
        assert!(out.is_empty());
        assert_eq!(acc.stats.nodes_visited, 1);
    }

    #[test]
    fn dirty_group_is_taken_whole() {
        let (mut store, root, a, _, _) = scenario();
        store.set_transformed_bounds(a, r(0.0, 0.0, 50.0, 50.0), false);
        store.mark_dirty(a);
        let mut pool = RegionPool::new(6);
        let (acc, out) = accumulate(&store, root, SCREEN, &mut pool);
        assert_eq!(out.size(), 1);
        assert_eq!(out.get(0), r(0.0, 0.0, 51.0, 51.0));
        // Root and A only: A's children are never examined.
        assert_eq!(acc.stats.nodes_visited, 2);
    }

    #[test]
    fn region_covering_clip_stops_early() {
        let (mut store, root, _, l1, _) = scenario();
        store.set_transformed_bounds(l1, r(-10.0, -10.0, 200.0, 200.0), false);
        let mut pool = RegionPool::new(6);
        let (acc, _) = accumulate(&store, root, SCREEN, &mut pool);
        assert_eq!(acc.status, AccumulateStatus::ContainsClip);
    }

    #[test]
    fn disjoint_damage_is_ignored() {
        let (mut store, root, _, l1, _) = scenario();
        store.set_transformed_bounds(l1, r(300.0, 300.0, 310.0, 310.0), false);
        store.clear_dirty(l1);
        store.set_transformed_bounds(l1, r(400.0, 400.0, 410.0, 410.0), false);
        let mut pool = RegionPool::new(6);
        let (acc, out) = accumulate(&store, root, SCREEN, &mut pool);
        assert_eq!(acc.status, AccumulateStatus::Ok);
        assert!(out.is_empty());
    }

    #[test]
    fn group_transform_applies_to_children() {
        let (mut store, root, a, l1, _) = scenario();
        store.set_transform(a, Transform3d::from_translation(20.0, 30.0, 0.0));
        store.clear_dirty_tree(root);
        store.mark_dirty(l1);
        let mut pool = RegionPool::new(6);
        let (_, out) = accumulate(&store, root, SCREEN, &mut pool);
        assert_eq!(out.as_slice(), &[r(19.0, 29.0, 31.0, 41.0)]);
    }

    #[test]
    fn many_dirty_children_short_circuit() {
        let mut store = NodeStore::new();
        let root = store.create_group();
        let group = store.create_group();
        store.add_child(root, group);
        store.set_transformed_bounds(group, r(0.0, 0.0, 60.0, 60.0), false);
        let leaves: Vec<_> = (0_u8..14)
            .map(|k| {
                let x = f64::from(k) * 4.0;
                leaf_at(&mut store, group, r(x, 0.0, x + 2.0, 2.0))
            })
            .collect();
        store.clear_dirty_tree(root);
        for &l in &leaves {
            store.mark_dirty(l);
        }
        assert!(store.dirty_child_count(group) > DIRTY_CHILDREN_THRESHOLD);

        let mut pool = RegionPool::new(6);
        let (acc, out) = accumulate(&store, root, SCREEN, &mut pool);
        assert_eq!(acc.stats.threshold_short_circuits, 1);
        // Root descends; the group does not.
        assert_eq!(acc.stats.groups_descended, 1);
        assert_eq!(acc.stats.nodes_visited, 2);
        assert_eq!(out.as_slice(), &[r(0.0, 0.0, 61.0, 61.0)]);
    }

    #[test]
    fn few_dirty_children_are_visited_individually() {
        let mut store = NodeStore::new();
        let root = store.create_group();
        let leaves: Vec<_> = (0..DIRTY_CHILDREN_THRESHOLD)
            .map(|k| {
                let x = f64::from(k) * 8.0;
                leaf_at(&mut store, root, r(x, 0.0, x + 2.0, 2.0))
            })
            .collect();
        store.clear_dirty_tree(root);
        for &l in &leaves {
            store.mark_dirty(l);
        }
        let mut pool = RegionPool::new(6);
        let (acc, _) = accumulate(&store, root, SCREEN, &mut pool);
        assert_eq!(acc.stats.threshold_short_circuits, 0);
        assert_eq!(acc.stats.nodes_visited, 1 + DIRTY_CHILDREN_THRESHOLD);
    }

    #[test]
    fn removed_child_is_damaged_exactly_once() {
        let (mut store, root, a, _, l2) = scenario();
        store.remove_child(a, l2);

        let mut pool = RegionPool::new(6);
        let (acc, out) = accumulate(&store, root, SCREEN, &mut pool);
        assert_eq!(acc.status, AccumulateStatus::Ok);
        assert_eq!(acc.stats.removed_visited, 1);
        assert_eq!(out.as_slice(), &[r(39.0, 39.0, 51.0, 51.0)]);

        store.clear_dirty_tree(root);
        let (_, out) = accumulate(&store, root, SCREEN, &mut pool);
        assert!(out.is_empty());
    }

    #[test]
    fn removed_then_destroyed_child_still_damaged() {
        let (mut store, root, _, _, l2) = scenario();
        store.destroy_node(l2);
        let mut pool = RegionPool::new(6);
        let (_, out) = accumulate(&store, root, SCREEN, &mut pool);
        assert_eq!(out.as_slice(), &[r(39.0, 39.0, 51.0, 51.0)]);
    }

    #[test]
    fn clip_node_restricts_child_damage() {
        let (mut store, root, a, l1, _) = scenario();
        let clip = store.create_leaf();
        store.set_content_bounds(clip, r(0.0, 0.0, 5.0, 5.0));
        store.set_transformed_bounds(clip, r(0.0, 0.0, 5.0, 5.0), false);
        store.set_clip_node(a, Some(clip));
        store.set_transformed_bounds(a, r(0.0, 0.0, 5.0, 5.0), false);
        store.clear_dirty_tree(root);

        store.mark_dirty(l1);
        let mut pool = RegionPool::new(6);
        let (acc, out) = accumulate(&store, root, SCREEN, &mut pool);
        // The child's padded rect covers the clip, so the group's own
        // bounds are used instead.
        assert_eq!(acc.status, AccumulateStatus::Ok);
        assert_eq!(out.as_slice(), &[r(0.0, 0.0, 6.0, 6.0)]);
        assert_eq!(pool.outstanding(), 0);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn clip_node_partial_overlap_merges_children() {
        let (mut store, root, a, _, l2) = scenario();
        let clip = store.create_leaf();
        store.set_transformed_bounds(clip, r(0.0, 0.0, 45.0, 100.0), false);
        store.set_clip_node(a, Some(clip));
        store.clear_dirty_tree(root);

        store.mark_dirty(l2);
        let mut pool = RegionPool::new(6);
        let (acc, out) = accumulate(&store, root, SCREEN, &mut pool);
        assert_eq!(acc.status, AccumulateStatus::Ok);
        assert_eq!(out.as_slice(), &[r(39.0, 39.0, 45.0, 51.0)]);
        assert_eq!(pool.outstanding(), 0);
    }

    #[test]
    fn effect_expands_child_damage() {
        let (mut store, root, a, l1, _) = scenario();
        store.set_effect(a, Some(Box::new(GrowEffect::new(1, 3.0))));
        store.set_transform(a, Transform3d::from_translation(10.0, 10.0, 0.0));
        store.clear_dirty_tree(root);

        store.mark_dirty(l1);
        let mut pool = RegionPool::new(6);
        let (acc, out) = accumulate(&store, root, SCREEN, &mut pool);
        assert_eq!(acc.status, AccumulateStatus::Ok);
        // [0,0,10,10] padded by 1, grown by 3, moved by 10.
        assert_eq!(out.as_slice(), &[r(6.0, 6.0, 24.0, 24.0)]);
        assert_eq!(pool.outstanding(), 0);
    }

    #[test]
    fn singular_effect_transform_contributes_nothing() {
        let (mut store, root, a, l1, _) = scenario();
        store.set_effect(a, Some(Box::new(GrowEffect::new(1, 3.0))));
        store.set_transform(a, Transform3d::from_scale(0.0, 1.0, 1.0));
        store.clear_dirty_tree(root);

        store.mark_dirty(l1);
        let mut pool = RegionPool::new(6);
        let (acc, out) = accumulate(&store, root, SCREEN, &mut pool);
        assert_eq!(acc.status, AccumulateStatus::Ok);
        assert!(out.is_empty());
        assert_eq!(pool.outstanding(), 0);
    }

    #[test]
    fn effect_child_covering_clip_returns_scratch() {
        let (mut store, root, a, l1, _) = scenario();
        store.set_effect(a, Some(Box::new(GrowEffect::new(1, 3.0))));
        store.clear_dirty_tree(root);

        store.mark_dirty(l1);
        let mut pool = RegionPool::new(6);
        let (acc, out) = accumulate(&store, root, r(2.0, 2.0, 8.0, 8.0), &mut pool);
        assert_eq!(acc.status, AccumulateStatus::ContainsClip);
        assert!(out.is_empty());
        assert_eq!(pool.outstanding(), 0);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn depth_flattening_projection_keeps_effect_damage() {
        let (mut store, root, a, l1, _) = scenario();
        store.set_effect(a, Some(Box::new(GrowEffect::new(1, 3.0))));
        store.clear_dirty_tree(root);

        store.mark_dirty(l1);
        let flatten = Transform3d::from_scale(1.0, 1.0, 0.0);
        assert!(flatten.inverse().is_none());
        let mut pool = RegionPool::new(6);
        let mut out = DirtyRegionContainer::new(6);
        let acc = store.accumulate_dirty_regions(
            root,
            SCREEN,
            &mut pool,
            &mut out,
            &Transform3d::IDENTITY,
            &flatten,
        );
        assert_eq!(acc.status, AccumulateStatus::Ok);
        // [0,0,10,10] padded by 1 and clipped, then grown by 3 and clipped.
        assert_eq!(out.as_slice(), &[r(0.0, 0.0, 14.0, 14.0)]);
        assert_eq!(pool.outstanding(), 0);
    }

    #[test]
    fn projection_maps_damage() {
        let (mut store, root, _, l1, _) = scenario();
        store.mark_dirty(l1);
        let mut pool = RegionPool::new(6);
        let mut out = DirtyRegionContainer::new(6);
        let projection = Transform3d::from_scale(2.0, 2.0, 1.0);
        let acc = store.accumulate_dirty_regions(
            root,
            SCREEN,
            &mut pool,
            &mut out,
            &Transform3d::IDENTITY,
            &projection,
        );
        assert_eq!(acc.status, AccumulateStatus::Ok);
        assert_eq!(out.as_slice(), &[r(0.0, 0.0, 21.0, 21.0)]);
    }

    #[test]
    fn padding_is_configurable() {
        let config = crate::config::DamageConfig::new().with_padding(0.0);
        let mut store = NodeStore::with_config(config).unwrap();
        let root = store.create_group();
        let leaf = leaf_at(&mut store, root, r(10.0, 10.0, 20.0, 20.0));
        store.clear_dirty_tree(root);
        store.mark_dirty(leaf);
        assert_eq!(
            store.dirty_region(leaf, &Transform3d::IDENTITY, &Transform3d::IDENTITY),
            r(10.0, 10.0, 20.0, 20.0)
        );
    }
}
