// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds and transform inputs, and bounds composition queries.
//!
//! The layout system pushes three inputs per changed node: local content
//! bounds, complete bounds in parent space ("transformed bounds"), and the
//! local-to-parent transform. The queries below compose content, effect,
//! clip, and transform in that order.

use kurbo::Rect;

use crate::bounds;
use crate::filter::DirtyHint;
use crate::transform::Transform3d;

use super::id::{INVALID, NodeId};
use super::store::NodeStore;

impl NodeStore {
    /// Stores the node's local content bounds. Does not mark anything dirty.
    pub fn set_content_bounds(&mut self, id: NodeId, content: Rect) {
        self.validate(id);
        self.content_bounds[id.idx as usize] = content;
    }

    /// Stores the node's complete bounds in parent space.
    ///
    /// Unchanged bounds are ignored. Otherwise both the old and the new
    /// bounds are folded into the node's dirty bounds, which keep growing
    /// until the next clear. The node is marked dirty unless it draws nothing
    /// itself or `translation_only` is set.
    pub fn set_transformed_bounds(&mut self, id: NodeId, new: Rect, translation_only: bool) {
        self.validate(id);
        let i = id.idx as usize;
        if self.transformed_bounds[i] == new {
            return;
        }
        let old = self.transformed_bounds[i];
        self.dirty_bounds[i] = if bounds::is_empty(self.dirty_bounds[i]) {
            old
        } else {
            bounds::union(self.dirty_bounds[i], old)
        };
        self.dirty_bounds[i] = bounds::union(self.dirty_bounds[i], new);
        self.transformed_bounds[i] = new;
        if self.has_visuals_at(id.idx) && !translation_only {
            self.mark_dirty_at(id.idx);
        }
    }

    /// Sets the node's local-to-parent transform.
    ///
    /// Under a cached parent, the first change only records a
    /// [`DirtyHint`]; later changes that differ solely in x/y translation
    /// take the translation fast path. Everything else marks the node dirty.
    /// The node's own cache is never invalidated here.
    pub fn set_transform(&mut self, id: NodeId, transform: Transform3d) {
        self.validate(id);
        let i = id.idx as usize;
        if self.transform[i] == transform {
            return;
        }
        let mut use_hint = false;
        let p = self.parent[i];
        if self.config.translation_hints && p != INVALID && self.cache[p as usize].is_some() {
            match &mut self.hint[i] {
                None => self.hint[i] = Some(DirtyHint::default()),
                Some(hint) => {
                    if self.transform[i].differs_only_in_xy_translation(&transform) {
                        let (old_x, old_y, _) = self.transform[i].translation();
                        let (new_x, new_y, _) = transform.translation();
                        hint.translate_x_delta = new_x - old_x;
                        hint.translate_y_delta = new_y - old_y;
                        use_hint = true;
                    }
                }
            }
        }

        self.transform[i] = transform;
        if use_hint {
            self.mark_dirty_by_translation_at(id.idx);
        } else {
            self.mark_dirty_at(id.idx);
        }
    }

    /// Content bounds mapped through `tx`.
    #[must_use]
    pub fn content_bounds_in(&self, id: NodeId, tx: &Transform3d) -> Rect {
        self.validate(id);
        self.content_bounds_at(id.idx, tx)
    }

    /// Effect output bounds mapped through `tx`, or the content bounds if the
    /// node has no effect.
    #[must_use]
    pub fn effect_bounds(&self, id: NodeId, tx: &Transform3d) -> Rect {
        self.validate(id);
        self.effect_bounds_at(id.idx, tx)
    }

    /// Effect bounds intersected with the clip node's complete bounds, both
    /// mapped through `tx`.
    #[must_use]
    pub fn clipped_bounds(&self, id: NodeId, tx: &Transform3d) -> Rect {
        self.validate(id);
        self.clipped_bounds_at(id.idx, tx)
    }

    /// Bounds after content, effect, clip, and the node's own transform,
    /// mapped through `tx`.
    ///
    /// With an identity `tx` this is exactly the stored transformed bounds.
    #[must_use]
    pub fn complete_bounds(&self, id: NodeId, tx: &Transform3d) -> Rect {
        self.validate(id);
        self.complete_bounds_at(id.idx, tx)
    }

    // -- Internal helpers --

    pub(crate) fn content_bounds_at(&self, idx: u32, tx: &Transform3d) -> Rect {
        let content = self.content_bounds[idx as usize];
        if tx.is_translate_or_identity() {
            if tx.is_identity() || bounds::is_empty(content) {
                return content;
            }
            let (dx, dy, _) = tx.translation();
            Rect::new(content.x0 + dx, content.y0 + dy, content.x1 + dx, content.y1 + dy)
        } else {
            tx.transform_rect(content)
        }
    }

    pub(crate) fn effect_bounds_at(&self, idx: u32, tx: &Transform3d) -> Rect {
        match self.effect[idx as usize].as_deref() {
            Some(effect) => effect.bounds(self.content_bounds[idx as usize], tx),
            None => self.content_bounds_at(idx, tx),
        }
    }

    pub(crate) fn clipped_bounds_at(&self, idx: u32, tx: &Transform3d) -> Rect {
        let effect = self.effect_bounds_at(idx, tx);
        let clip = self.clip_node[idx as usize];
        if clip == INVALID {
            effect
        } else {
            bounds::intersect(self.complete_bounds_at(clip, tx), effect)
        }
    }

    pub(crate) fn complete_bounds_at(&self, idx: u32, tx: &Transform3d) -> Rect {
        let own = &self.transform[idx as usize];
        if tx.is_identity() {
            self.transformed_bounds[idx as usize]
        } else if own.is_identity() {
            self.clipped_bounds_at(idx, tx)
        } else {
            self.clipped_bounds_at(idx, &(*tx * *own))
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use super::*;
    use crate::node::DirtyState;
    use crate::testing::{CountingCache, GrowEffect};

    fn r(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect::new(x0, y0, x1, y1)
    }

    #[test]
    fn content_bounds_alone_does_not_mark_dirty() {
        let mut store = NodeStore::new();
        let leaf = store.create_leaf();
        store.clear_dirty(leaf);
        store.set_content_bounds(leaf, r(0.0, 0.0, 5.0, 5.0));
        assert_eq!(store.dirty_state(leaf), DirtyState::Clean);
    }

    #[test]
    fn transformed_bounds_unchanged_is_noop() {
        let mut store = NodeStore::new();
        let leaf = store.create_leaf();
        store.set_transformed_bounds(leaf, r(0.0, 0.0, 5.0, 5.0), false);
        store.clear_dirty(leaf);
        store.set_transformed_bounds(leaf, r(0.0, 0.0, 5.0, 5.0), false);
        assert_eq!(store.dirty_state(leaf), DirtyState::Clean);
        assert!(bounds::is_empty(store.dirty_bounds(leaf)));
    }

    #[test]
    fn dirty_bounds_accumulate_until_cleared() {
        let mut store = NodeStore::new();
        let leaf = store.create_leaf();
        store.set_transformed_bounds(leaf, r(0.0, 0.0, 10.0, 10.0), false);
        store.clear_dirty(leaf);

        store.set_transformed_bounds(leaf, r(20.0, 0.0, 30.0, 10.0), false);
        assert_eq!(store.dirty_bounds(leaf), r(0.0, 0.0, 30.0, 10.0));
        store.set_transformed_bounds(leaf, r(40.0, 0.0, 50.0, 10.0), false);
        assert_eq!(store.dirty_bounds(leaf), r(0.0, 0.0, 50.0, 10.0));
        assert_eq!(store.transformed_bounds(leaf), r(40.0, 0.0, 50.0, 10.0));
    }

    #[test]
    fn group_and_translation_only_changes_do_not_mark_dirty() {
        let mut store = NodeStore::new();
        let group = store.create_group();
        let leaf = store.create_leaf();
        store.clear_dirty(group);
        store.clear_dirty(leaf);

        store.set_transformed_bounds(group, r(0.0, 0.0, 5.0, 5.0), false);
        store.set_transformed_bounds(leaf, r(0.0, 0.0, 5.0, 5.0), true);
        assert_eq!(store.dirty_state(group), DirtyState::Clean);
        assert_eq!(store.dirty_state(leaf), DirtyState::Clean);
        assert!(!bounds::is_empty(store.dirty_bounds(leaf)));
    }

    #[test]
    fn complete_bounds_identity_round_trip() {
        let mut store = NodeStore::new();
        let leaf = store.create_leaf();
        let stored = r(1.25, 2.5, 10.125, 20.75);
        store.set_content_bounds(leaf, r(0.0, 0.0, 8.875, 18.25));
        store.set_transform(leaf, Transform3d::from_translation(1.25, 2.5, 0.0));
        store.set_transformed_bounds(leaf, stored, false);
        for _ in 0..100 {
            assert_eq!(store.complete_bounds(leaf, &Transform3d::IDENTITY), stored);
        }
    }

    #[test]
    fn complete_bounds_applies_own_transform() {
        let mut store = NodeStore::new();
        let leaf = store.create_leaf();
        store.set_content_bounds(leaf, r(0.0, 0.0, 10.0, 10.0));
        store.set_transform(leaf, Transform3d::from_scale(2.0, 2.0, 1.0));
        let tx = Transform3d::from_translation(5.0, 5.0, 0.0);
        assert_eq!(store.complete_bounds(leaf, &tx), r(5.0, 5.0, 25.0, 25.0));
        assert_eq!(store.content_bounds_in(leaf, &tx), r(5.0, 5.0, 15.0, 15.0));
    }

    #[test]
    fn clipped_bounds_intersects_clip_node() {
        let mut store = NodeStore::new();
        let leaf = store.create_leaf();
        let clip = store.create_leaf();
        store.set_content_bounds(leaf, r(0.0, 0.0, 10.0, 10.0));
        store.set_content_bounds(clip, r(5.0, 0.0, 20.0, 20.0));
        store.set_clip_node(leaf, Some(clip));
        let tx = Transform3d::from_translation(1.0, 0.0, 0.0);
        assert_eq!(store.clipped_bounds(leaf, &tx), r(6.0, 0.0, 11.0, 10.0));
    }

    #[test]
    fn effect_bounds_delegate_to_filter() {
        let mut store = NodeStore::new();
        let leaf = store.create_leaf();
        store.set_content_bounds(leaf, r(0.0, 0.0, 10.0, 10.0));
        store.set_effect(leaf, Some(Box::new(GrowEffect::new(7, 2.0))));
        assert_eq!(
            store.effect_bounds(leaf, &Transform3d::IDENTITY),
            r(-2.0, -2.0, 12.0, 12.0)
        );
    }

    #[test]
    fn translation_hint_under_cached_parent() {
        let mut store = NodeStore::new();
        let root = store.create_group();
        let parent = store.create_group();
        let child = store.create_leaf();
        store.add_child(root, parent);
        store.add_child(parent, child);
        let parent_cache = CountingCache::new();
        let child_cache = CountingCache::new();
        store.set_cache_filter(parent, Some(Box::new(parent_cache.clone())));
        store.set_cache_filter(child, Some(Box::new(child_cache.clone())));
        store.set_content_bounds(child, r(0.0, 0.0, 10.0, 10.0));
        store.set_transformed_bounds(child, r(0.0, 0.0, 10.0, 10.0), false);

        // First change under a cached parent only records the hint.
        store.set_transform(child, Transform3d::from_translation(5.0, 0.0, 0.0));
        store.set_transformed_bounds(child, r(5.0, 0.0, 15.0, 10.0), true);
        assert!(store.dirty_hint(child).is_some());
        store.clear_dirty_tree(root);
        parent_cache.reset_counts();
        child_cache.reset_counts();

        store.set_transform(child, Transform3d::from_translation(8.0, 3.0, 0.0));
        store.set_transformed_bounds(child, r(8.0, 3.0, 18.0, 13.0), true);

        assert_eq!(parent_cache.invalidations(), 0);
        assert_eq!(parent_cache.translations(), 1);
        assert_eq!(parent_cache.last_translation(), Some((3.0, 3.0)));
        assert_eq!(child_cache.invalidations(), 0);
        assert_eq!(store.dirty_state(child), DirtyState::DirtyByTranslation);
        assert!(store.is_child_dirty(root));
    }

    #[test]
    fn non_translation_change_marks_dirty_under_cached_parent() {
        let mut store = NodeStore::new();
        let parent = store.create_group();
        let child = store.create_leaf();
        store.add_child(parent, child);
        store.set_cache_filter(parent, Some(Box::new(CountingCache::new())));
        store.set_transform(child, Transform3d::from_translation(1.0, 0.0, 0.0));
        store.clear_dirty_tree(parent);

        store.set_transform(child, Transform3d::from_scale(2.0, 2.0, 1.0));
        assert_eq!(store.dirty_state(child), DirtyState::Dirty);
    }

    #[test]
    fn hints_can_be_disabled() {
        let config = crate::config::DamageConfig {
            translation_hints: false,
            ..crate::config::DamageConfig::new()
        };
        let mut store = NodeStore::with_config(config).unwrap();
        let parent = store.create_group();
        let child = store.create_leaf();
        store.add_child(parent, child);
        store.set_cache_filter(parent, Some(Box::new(CountingCache::new())));
        store.set_transform(child, Transform3d::from_translation(1.0, 0.0, 0.0));
        assert!(store.dirty_hint(child).is_none());
    }
}
