// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Upward dirty propagation, cache invalidation, and clearing.
//!
//! Marking a node dirty walks toward the root, setting `child_dirty` on each
//! ancestor and invalidating its cache. The walk stops at the first ancestor
//! that already knows it has a dirty descendant, so re-dirtying inside a
//! mostly static subtree costs the depth to that ancestor, not the size of
//! the tree.
//!
//! A hop from a clip node to the node it clips marks that owner fully dirty:
//! a changed clip changes everything the owner draws.

use crate::trace::{ClearEvent, Tracer};

use super::id::{INVALID, NodeId};
use super::state::DirtyState;
use super::store::NodeStore;

impl NodeStore {
    /// Marks a node dirty and propagates to the root.
    ///
    /// Does not invalidate the node's own cache. No-op if already
    /// [`DirtyState::Dirty`].
    pub fn mark_dirty(&mut self, id: NodeId) {
        self.validate(id);
        self.mark_dirty_at(id.idx);
    }

    /// Marks a node dirty by translation.
    ///
    /// Applies only while the node and its parent are clean and the parent
    /// has no other dirty descendant: the parent's cache then receives the
    /// node's translation delta instead of a full invalidation. Any other
    /// situation falls back to [`mark_dirty`](Self::mark_dirty).
    pub fn mark_dirty_by_translation(&mut self, id: NodeId) {
        self.validate(id);
        self.mark_dirty_by_translation_at(id.idx);
    }

    /// Propagates this node's dirtiness to its ancestors without changing the
    /// node's own state.
    pub fn mark_tree_dirty(&mut self, id: NodeId) {
        self.validate(id);
        self.mark_tree_dirty_at(id.idx);
    }

    /// Resets a node's own dirty state, dirty bounds, counter, and, for
    /// groups, pending removal snapshots.
    pub fn clear_dirty(&mut self, id: NodeId) {
        self.validate(id);
        self.clear_dirty_at(id.idx);
    }

    /// Clears a node, its clip node, and every descendant that is dirty or
    /// has a dirty descendant. Returns the number of nodes cleared.
    ///
    /// Clean subtrees are skipped; they cannot hold dirty nodes.
    pub fn clear_dirty_tree(&mut self, id: NodeId) -> usize {
        self.validate(id);
        self.clear_dirty_tree_at(id.idx)
    }

    /// [`clear_dirty_tree`](Self::clear_dirty_tree), reporting the number of
    /// cleared nodes to `tracer`.
    pub fn clear_dirty_tree_traced(&mut self, id: NodeId, tracer: &mut Tracer<'_>) -> usize {
        let nodes_cleared = self.clear_dirty_tree(id);
        tracer.clear(&ClearEvent {
            frame_index: tracer.frame_index(),
            nodes_cleared,
        });
        nodes_cleared
    }

    // -- Internal helpers --

    /// Next node up the propagation path and whether the hop is a clip hop.
    pub(crate) fn next_hop(&self, idx: u32) -> (u32, bool) {
        let i = idx as usize;
        if self.parent[i] != INVALID {
            (self.parent[i], false)
        } else if self.owner[i] != INVALID {
            (self.owner[i], true)
        } else {
            (INVALID, false)
        }
    }

    pub(crate) fn mark_dirty_at(&mut self, idx: u32) {
        if self.dirty[idx as usize] != DirtyState::Dirty {
            self.dirty[idx as usize] = DirtyState::Dirty;
            self.mark_tree_dirty_at(idx);
        }
    }

    pub(crate) fn mark_dirty_by_translation_at(&mut self, idx: u32) {
        let i = idx as usize;
        if self.dirty[i] != DirtyState::Clean {
            return;
        }
        let p = self.parent[i];
        if p != INVALID
            && self.dirty[p as usize] == DirtyState::Clean
            && !self.child_dirty[p as usize]
        {
            let pi = p as usize;
            self.dirty[i] = DirtyState::DirtyByTranslation;
            self.child_dirty[pi] = true;
            self.dirty_child_count[pi] = self.dirty_child_count[pi].saturating_add(1);
            let hint = self.hint[i].unwrap_or_default();
            if let Some(cache) = self.cache[pi].as_deref_mut() {
                cache.invalidate_by_translation(hint.translate_x_delta, hint.translate_y_delta);
            }
            self.mark_tree_dirty_at(p);
        } else {
            self.mark_dirty_at(idx);
        }
    }

    pub(crate) fn mark_tree_dirty_at(&mut self, idx: u32) {
        let (mut p, mut at_clip) = self.next_hop(idx);
        let mut by_translation = self.dirty[idx as usize] == DirtyState::DirtyByTranslation;
        while p != INVALID
            && self.dirty[p as usize] != DirtyState::Dirty
            && (!self.child_dirty[p as usize] || at_clip || by_translation)
        {
            let pi = p as usize;
            if at_clip {
                self.dirty[pi] = DirtyState::Dirty;
            } else if !by_translation {
                self.child_dirty[pi] = true;
                self.dirty_child_count[pi] = self.dirty_child_count[pi].saturating_add(1);
            }
            self.invalidate_cache_at(p);
            by_translation = self.dirty[pi] == DirtyState::DirtyByTranslation;
            (p, at_clip) = self.next_hop(p);
        }
        if p == INVALID {
            return;
        }
        // Stopped at an ancestor that already had a dirty descendant.
        if self.dirty[p as usize] == DirtyState::Clean && !at_clip && !by_translation {
            let pi = p as usize;
            self.dirty_child_count[pi] = self.dirty_child_count[pi].saturating_add(1);
        }
        // Its bits may already be set while its cache is still valid.
        self.invalidate_cache_at(p);
    }

    /// Propagates from a node that is not itself the source of a change,
    /// such as a group that gained or lost a child.
    pub(crate) fn mark_tree_dirty_no_increment_at(&mut self, idx: u32) {
        let (p, _) = self.next_hop(idx);
        if p != INVALID
            && (!self.child_dirty[p as usize]
                || self.dirty[idx as usize] == DirtyState::DirtyByTranslation)
        {
            self.mark_tree_dirty_at(idx);
        }
    }

    pub(crate) fn invalidate_cache_at(&mut self, idx: u32) {
        if let Some(cache) = self.cache[idx as usize].as_deref_mut() {
            cache.invalidate();
        }
    }

    pub(crate) fn clear_dirty_at(&mut self, idx: u32) {
        let i = idx as usize;
        self.dirty[i] = DirtyState::Clean;
        self.child_dirty[i] = false;
        self.dirty_bounds[i] = crate::bounds::EMPTY;
        self.dirty_child_count[i] = 0;
        self.removed[i].clear();
    }

    pub(crate) fn clear_dirty_tree_at(&mut self, idx: u32) -> usize {
        self.clear_dirty_at(idx);
        let mut cleared = 1;
        let clip = self.clip_node[idx as usize];
        if clip != INVALID {
            cleared += self.clear_dirty_tree_at(clip);
        }
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            if !self.is_clean_at(child) {
                cleared += self.clear_dirty_tree_at(child);
            }
            child = self.next_sibling[child as usize];
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec::Vec;

    use super::*;
    use crate::testing::CountingCache;

    /// A chain `root -> g1 -> ... -> leaf` of the given depth, all clean.
    fn chain(store: &mut NodeStore, depth: usize) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        let root = store.create_group();
        nodes.push(root);
        for _ in 1..depth {
            let g = store.create_group();
            store.add_child(*nodes.last().unwrap(), g);
            nodes.push(g);
        }
        let leaf = store.create_leaf();
        store.add_child(*nodes.last().unwrap(), leaf);
        nodes.push(leaf);
        store.clear_dirty_tree(root);
        nodes
    }

    #[test]
    fn mark_dirty_sets_child_dirty_on_every_ancestor() {
        let mut store = NodeStore::new();
        let nodes = chain(&mut store, 4);
        let leaf = *nodes.last().unwrap();
        store.mark_dirty(leaf);
        assert_eq!(store.dirty_state(leaf), DirtyState::Dirty);
        for &n in &nodes[..nodes.len() - 1] {
            assert!(store.is_child_dirty(n));
            assert_eq!(store.dirty_state(n), DirtyState::Clean);
            assert_eq!(store.dirty_child_count(n), 1);
        }
    }

    #[test]
    fn mark_dirty_is_idempotent() {
        let mut store = NodeStore::new();
        let nodes = chain(&mut store, 3);
        let leaf = *nodes.last().unwrap();
        store.mark_dirty(leaf);
        let snapshot: Vec<_> = nodes
            .iter()
            .map(|&n| (store.dirty_state(n), store.is_child_dirty(n), store.dirty_child_count(n)))
            .collect();
        store.mark_dirty(leaf);
        let again: Vec<_> = nodes
            .iter()
            .map(|&n| (store.dirty_state(n), store.is_child_dirty(n), store.dirty_child_count(n)))
            .collect();
        assert_eq!(snapshot, again);
    }

    #[test]
    fn propagation_stops_at_first_marked_ancestor() {
        let mut store = NodeStore::new();
        let root = store.create_group();
        let mid = store.create_group();
        let a = store.create_leaf();
        let b = store.create_leaf();
        store.add_child(root, mid);
        store.add_child(mid, a);
        store.add_child(mid, b);
        store.clear_dirty_tree(root);
        let root_cache = CountingCache::new();
        let mid_cache = CountingCache::new();
        store.cache[root.idx as usize] = Some(Box::new(root_cache.clone()));
        store.cache[mid.idx as usize] = Some(Box::new(mid_cache.clone()));

        store.mark_dirty(a);
        assert_eq!(store.dirty_child_count(root), 1);
        assert_eq!(store.dirty_child_count(mid), 1);
        assert_eq!(root_cache.invalidations(), 1);

        // The walk stops at `mid`, which already has a dirty child: its
        // counter still grows and its cache is invalidated again, but
        // nothing above it is touched.
        store.mark_dirty(b);
        assert_eq!(store.dirty_child_count(mid), 2);
        assert_eq!(store.dirty_child_count(root), 1);
        assert_eq!(mid_cache.invalidations(), 2);
        assert_eq!(root_cache.invalidations(), 1);
    }

    #[test]
    fn propagation_work_is_proportional_to_depth() {
        // Wide and deep tree: 4 levels, 5 children per group.
        let mut store = NodeStore::new();
        let root = store.create_group();
        let mut frontier = alloc::vec![root];
        for _ in 0..3 {
            let mut next = Vec::new();
            for &g in &frontier {
                for _ in 0..5 {
                    let c = store.create_group();
                    store.add_child(g, c);
                    next.push(c);
                }
            }
            frontier = next;
        }
        let leaf = store.create_leaf();
        store.add_child(frontier[0], leaf);
        store.clear_dirty_tree(root);

        let caches: Vec<_> = (0..store.len)
            .map(|i| {
                let c = CountingCache::new();
                store.cache[i as usize] = Some(Box::new(c.clone()));
                c
            })
            .collect();
        store.mark_dirty(leaf);
        let touched = caches.iter().filter(|c| c.invalidations() > 0).count();
        // Only the four ancestors of the leaf are visited.
        assert_eq!(touched, 4);
    }

    #[test]
    fn clip_hop_marks_owner_fully_dirty() {
        let mut store = NodeStore::new();
        let root = store.create_group();
        let owner = store.create_leaf();
        let clip = store.create_leaf();
        store.add_child(root, owner);
        store.set_clip_node(owner, Some(clip));
        store.clear_dirty_tree(root);

        store.mark_dirty(clip);
        assert_eq!(store.dirty_state(owner), DirtyState::Dirty);
        assert!(!store.is_child_dirty(owner));
        assert!(store.is_child_dirty(root));
    }

    #[test]
    fn translation_marks_parent_without_full_invalidation() {
        let mut store = NodeStore::new();
        let nodes = chain(&mut store, 2);
        let (root, parent, leaf) = (nodes[0], nodes[1], nodes[2]);
        let cache = CountingCache::new();
        store.cache[parent.idx as usize] = Some(Box::new(cache.clone()));

        store.mark_dirty_by_translation(leaf);
        assert_eq!(store.dirty_state(leaf), DirtyState::DirtyByTranslation);
        assert!(store.is_child_dirty(parent));
        assert!(store.is_child_dirty(root));
        assert_eq!(cache.invalidations(), 0);
        assert_eq!(cache.translations(), 1);
    }

    #[test]
    fn translation_falls_back_when_parent_already_dirty() {
        let mut store = NodeStore::new();
        let nodes = chain(&mut store, 2);
        let (parent, leaf) = (nodes[1], nodes[2]);
        store.mark_dirty(parent);
        store.mark_dirty_by_translation(leaf);
        assert_eq!(store.dirty_state(leaf), DirtyState::Dirty);
    }

    #[test]
    fn clear_then_invariants_hold() {
        let mut store = NodeStore::new();
        let nodes = chain(&mut store, 3);
        let leaf = *nodes.last().unwrap();
        store.set_transformed_bounds(leaf, kurbo::Rect::new(0.0, 0.0, 4.0, 4.0), false);
        assert_eq!(store.clear_dirty_tree(nodes[0]), nodes.len());
        for &n in &nodes {
            assert_eq!(store.dirty_state(n), DirtyState::Clean);
            assert!(crate::bounds::is_empty(store.dirty_bounds(n)));
            assert!(!store.is_child_dirty(n));
            assert_eq!(store.dirty_child_count(n), 0);
        }
    }

    #[test]
    fn clear_skips_clean_subtrees() {
        let mut store = NodeStore::new();
        let root = store.create_group();
        let a = store.create_group();
        let b = store.create_group();
        let leaf = store.create_leaf();
        store.add_child(root, a);
        store.add_child(root, b);
        store.add_child(b, leaf);
        store.clear_dirty_tree(root);

        store.mark_dirty(leaf);
        // root, b, leaf; `a` is clean and skipped.
        assert_eq!(store.clear_dirty_tree(root), 3);
    }
}
