// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and property management.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::bounds;
use crate::config::DamageConfig;
use crate::error::NodeError;
use crate::filter::{CacheFilter, CacheHint, DirtyHint, EffectFilter};
use crate::transform::Transform3d;

use super::id::{INVALID, NodeId};
use super::state::{BlendMode, DirtyState, NodeKind, RemovedChild};
use super::traverse::Children;

/// Struct-of-arrays storage for every node of a scene.
///
/// Nodes are addressed by [`NodeId`] handles; each occupies one slot across
/// the parallel arrays below. Destroyed slots are recycled through a free
/// list and generation counters reject stale handles.
#[derive(Debug)]
pub struct NodeStore {
    // -- Topology --
    pub(crate) kind: Vec<NodeKind>,
    pub(crate) parent: Vec<u32>,
    /// Node whose clip this node is, or [`INVALID`].
    pub(crate) owner: Vec<u32>,
    pub(crate) clip_node: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,
    pub(crate) removed: Vec<Vec<RemovedChild>>,

    // -- Properties (set by callers) --
    pub(crate) transform: Vec<Transform3d>,
    pub(crate) content_bounds: Vec<Rect>,
    pub(crate) transformed_bounds: Vec<Rect>,
    pub(crate) visible: Vec<bool>,
    pub(crate) opacity: Vec<f32>,
    pub(crate) blend_mode: Vec<Option<BlendMode>>,
    pub(crate) depth_test: Vec<bool>,
    pub(crate) view_order: Vec<f64>,
    pub(crate) name: Vec<Option<String>>,

    // -- Attachments --
    pub(crate) cache: Vec<Option<Box<dyn CacheFilter>>>,
    pub(crate) effect: Vec<Option<Box<dyn EffectFilter>>>,

    // -- Dirty state --
    pub(crate) dirty: Vec<DirtyState>,
    pub(crate) child_dirty: Vec<bool>,
    pub(crate) dirty_child_count: Vec<u32>,
    pub(crate) dirty_bounds: Vec<Rect>,
    pub(crate) hint: Vec<Option<DirtyHint>>,
    pub(crate) culling_bits: Vec<u32>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    pub(crate) config: DamageConfig,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Creates an empty store with the default [`DamageConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_config(DamageConfig::new())
    }

    /// Creates an empty store with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidConfig`] if a field is out of range.
    pub fn with_config(config: DamageConfig) -> Result<Self, NodeError> {
        if config.is_valid() {
            Ok(Self::from_valid_config(config))
        } else {
            Err(NodeError::InvalidConfig)
        }
    }

    fn from_valid_config(config: DamageConfig) -> Self {
        Self {
            kind: Vec::new(),
            parent: Vec::new(),
            owner: Vec::new(),
            clip_node: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            removed: Vec::new(),
            transform: Vec::new(),
            content_bounds: Vec::new(),
            transformed_bounds: Vec::new(),
            visible: Vec::new(),
            opacity: Vec::new(),
            blend_mode: Vec::new(),
            depth_test: Vec::new(),
            view_order: Vec::new(),
            name: Vec::new(),
            cache: Vec::new(),
            effect: Vec::new(),
            dirty: Vec::new(),
            child_dirty: Vec::new(),
            dirty_child_count: Vec::new(),
            dirty_bounds: Vec::new(),
            hint: Vec::new(),
            culling_bits: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            config,
        }
    }

    /// Returns the configuration this store was created with.
    #[must_use]
    pub fn config(&self) -> &DamageConfig {
        &self.config
    }

    // -- Allocation API --

    /// Creates a node of the given kind and returns its handle.
    ///
    /// The node starts detached, visible, fully opaque, with an identity
    /// transform, empty bounds, and no attachments. Its dirty state is
    /// [`DirtyState::Dirty`] so that its first placement in a tree is drawn.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.kind[i] = kind;
            self.parent[i] = INVALID;
            self.owner[i] = INVALID;
            self.clip_node[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.removed[i].clear();
            self.transform[i] = Transform3d::IDENTITY;
            self.content_bounds[i] = bounds::EMPTY;
            self.transformed_bounds[i] = bounds::EMPTY;
            self.visible[i] = true;
            self.opacity[i] = 1.0;
            self.blend_mode[i] = None;
            self.depth_test[i] = false;
            self.view_order[i] = 0.0;
            self.name[i] = None;
            self.cache[i] = None;
            self.effect[i] = None;
            self.dirty[i] = DirtyState::Dirty;
            self.child_dirty[i] = false;
            self.dirty_child_count[i] = 0;
            self.dirty_bounds[i] = bounds::EMPTY;
            self.hint[i] = None;
            self.culling_bits[i] = 0;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.kind.push(kind);
            self.parent.push(INVALID);
            self.owner.push(INVALID);
            self.clip_node.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.removed.push(Vec::new());
            self.transform.push(Transform3d::IDENTITY);
            self.content_bounds.push(bounds::EMPTY);
            self.transformed_bounds.push(bounds::EMPTY);
            self.visible.push(true);
            self.opacity.push(1.0);
            self.blend_mode.push(None);
            self.depth_test.push(false);
            self.view_order.push(0.0);
            self.name.push(None);
            self.cache.push(None);
            self.effect.push(None);
            self.dirty.push(DirtyState::Dirty);
            self.child_dirty.push(false);
            self.dirty_child_count.push(0);
            self.dirty_bounds.push(bounds::EMPTY);
            self.hint.push(None);
            self.culling_bits.push(0);
            self.generation.push(0);
            idx
        };

        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Creates a leaf node.
    pub fn create_leaf(&mut self) -> NodeId {
        self.create_node(NodeKind::Leaf)
    }

    /// Creates a group node.
    pub fn create_group(&mut self) -> NodeId {
        self.create_node(NodeKind::Group)
    }

    /// Destroys a node, disposing its attachments and freeing its slot.
    ///
    /// If the node is attached to a group it is removed first, so the space
    /// it occupied is still damaged on the next accumulation. If it is some
    /// node's clip, the owner loses its clip and is marked dirty.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node still has children.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;
        let i = idx as usize;
        assert!(
            self.first_child[i] == INVALID,
            "cannot destroy node with children"
        );

        if self.parent[i] != INVALID {
            let p = self.parent[i];
            self.remove_child_at(p, idx);
        }
        let owner = self.owner[i];
        if owner != INVALID {
            self.clip_node[owner as usize] = INVALID;
            self.owner[i] = INVALID;
            self.visuals_changed_at(owner);
        }
        let clip = self.clip_node[i];
        if clip != INVALID {
            self.owner[clip as usize] = INVALID;
            self.clip_node[i] = INVALID;
        }
        if let Some(mut cache) = self.cache[i].take() {
            cache.dispose();
        }
        if let Some(mut effect) = self.effect[i].take() {
            effect.dispose();
        }
        self.removed[i].clear();
        self.name[i] = None;

        self.generation[i] = self.generation[i].wrapping_add(1);
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Appends `child` to `group`'s children.
    ///
    /// The child is marked dirty and the change propagates to the root.
    /// A pending removal snapshot of the same child is dropped, so a
    /// remove/re-add within one frame is not counted twice.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, `group` is not a group, or `child`
    /// already has a parent or is some node's clip.
    pub fn add_child(&mut self, group: NodeId, child: NodeId) {
        self.validate(group);
        self.validate(child);
        self.check_attachable(group, child);
        let p = group.idx;
        let c = child.idx;

        let last = self.children(group).last().map_or(INVALID, |n| n.idx);
        self.link(p, c, last, INVALID);
        self.child_added(p, c);
    }

    /// Inserts `child` into `group`'s children at `index` (clamped to the
    /// child count).
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`add_child`](Self::add_child).
    pub fn insert_child(&mut self, group: NodeId, index: usize, child: NodeId) {
        self.validate(group);
        self.validate(child);
        self.check_attachable(group, child);
        let p = group.idx;
        let c = child.idx;

        let mut prev = INVALID;
        let mut next = self.first_child[p as usize];
        for _ in 0..index {
            if next == INVALID {
                break;
            }
            prev = next;
            next = self.next_sibling[next as usize];
        }
        self.link(p, c, prev, next);
        self.child_added(p, c);
    }

    /// Removes `child` from `group`.
    ///
    /// The bounds the child last occupied are kept as a [`RemovedChild`]
    /// snapshot and damaged by exactly one subsequent accumulation. Once a
    /// group holds `removed_children_threshold` snapshots it is marked fully
    /// dirty instead.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale or `child` is not a child of `group`.
    pub fn remove_child(&mut self, group: NodeId, child: NodeId) {
        self.validate(group);
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] == group.idx,
            "node is not a child of this group"
        );
        self.remove_child_at(group.idx, child.idx);
    }

    /// Returns the structural parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle(self.parent[id.idx as usize])
    }

    /// Returns the node this node clips, if it is a clip node.
    #[must_use]
    pub fn owner(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle(self.owner[id.idx as usize])
    }

    /// Returns an iterator over the direct children of a node, in paint order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the removal snapshots a group still owes a damage pass.
    #[must_use]
    pub fn removed_children(&self, id: NodeId) -> &[RemovedChild] {
        self.validate(id);
        &self.removed[id.idx as usize]
    }

    // -- Property getters (read-only) --

    /// Returns the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Returns `true` if the node draws content of its own.
    ///
    /// Groups only draw their children.
    #[must_use]
    pub fn has_visuals(&self, id: NodeId) -> bool {
        self.validate(id);
        self.has_visuals_at(id.idx)
    }

    /// Returns the local-to-parent transform.
    #[must_use]
    pub fn transform(&self, id: NodeId) -> Transform3d {
        self.validate(id);
        self.transform[id.idx as usize]
    }

    /// Returns the stored local content bounds.
    #[must_use]
    pub fn content_bounds(&self, id: NodeId) -> Rect {
        self.validate(id);
        self.content_bounds[id.idx as usize]
    }

    /// Returns the stored complete bounds in parent space.
    #[must_use]
    pub fn transformed_bounds(&self, id: NodeId) -> Rect {
        self.validate(id);
        self.transformed_bounds[id.idx as usize]
    }

    /// Returns the parent-space area changed since the last clear.
    #[must_use]
    pub fn dirty_bounds(&self, id: NodeId) -> Rect {
        self.validate(id);
        self.dirty_bounds[id.idx as usize]
    }

    /// Returns the node's own dirty state.
    #[must_use]
    pub fn dirty_state(&self, id: NodeId) -> DirtyState {
        self.validate(id);
        self.dirty[id.idx as usize]
    }

    /// Returns `true` if some descendant was marked dirty since the last clear.
    #[must_use]
    pub fn is_child_dirty(&self, id: NodeId) -> bool {
        self.validate(id);
        self.child_dirty[id.idx as usize]
    }

    /// Returns the heuristic count of dirty-descendant signals since the last
    /// clear. Removals never decrement it.
    #[must_use]
    pub fn dirty_child_count(&self, id: NodeId) -> u32 {
        self.validate(id);
        self.dirty_child_count[id.idx as usize]
    }

    /// Returns `true` if neither the node nor any descendant is dirty.
    #[must_use]
    pub fn is_clean(&self, id: NodeId) -> bool {
        self.validate(id);
        self.is_clean_at(id.idx)
    }

    /// Returns whether the node is visible.
    #[must_use]
    pub fn visible(&self, id: NodeId) -> bool {
        self.validate(id);
        self.visible[id.idx as usize]
    }

    /// Returns the node's opacity.
    #[must_use]
    pub fn opacity(&self, id: NodeId) -> f32 {
        self.validate(id);
        self.opacity[id.idx as usize]
    }

    /// Returns the node's blend mode; `None` passes children's blending through.
    #[must_use]
    pub fn blend_mode(&self, id: NodeId) -> Option<BlendMode> {
        self.validate(id);
        self.blend_mode[id.idx as usize]
    }

    /// Returns whether depth testing is enabled.
    #[must_use]
    pub fn depth_test(&self, id: NodeId) -> bool {
        self.validate(id);
        self.depth_test[id.idx as usize]
    }

    /// Returns the node's view order.
    #[must_use]
    pub fn view_order(&self, id: NodeId) -> f64 {
        self.validate(id);
        self.view_order[id.idx as usize]
    }

    /// Returns the node's diagnostic name.
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.validate(id);
        self.name[id.idx as usize].as_deref()
    }

    /// Returns the node's clip node, if any.
    #[must_use]
    pub fn clip_node(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle(self.clip_node[id.idx as usize])
    }

    /// Returns the node's cache filter, if any.
    #[must_use]
    pub fn cache_filter(&self, id: NodeId) -> Option<&dyn CacheFilter> {
        self.validate(id);
        self.cache[id.idx as usize].as_deref()
    }

    /// Returns the node's effect filter, if any.
    #[must_use]
    pub fn effect_filter(&self, id: NodeId) -> Option<&dyn EffectFilter> {
        self.validate(id);
        self.effect[id.idx as usize].as_deref()
    }

    /// Returns the translation hint recorded by the last transform change.
    #[must_use]
    pub fn dirty_hint(&self, id: NodeId) -> Option<DirtyHint> {
        self.validate(id);
        self.hint[id.idx as usize]
    }

    /// Returns the culling bits from the most recent culling pass.
    #[must_use]
    pub fn culling_bits(&self, id: NodeId) -> u32 {
        self.validate(id);
        self.culling_bits[id.idx as usize]
    }

    // -- Mutation API (marks dirty as needed) --

    /// Sets the diagnostic name. Never marks anything dirty.
    pub fn set_name(&mut self, id: NodeId, name: Option<String>) {
        self.validate(id);
        self.name[id.idx as usize] = name;
    }

    /// Shows or hides the node.
    ///
    /// A change marks the node dirty but leaves its own cache intact;
    /// ancestor caches are invalidated.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.validate(id);
        let i = id.idx as usize;
        if self.visible[i] != visible {
            self.visible[i] = visible;
            self.mark_dirty_at(id.idx);
        }
    }

    /// Sets the node's opacity.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::OpacityOutOfRange`] for values outside
    /// `0.0..=1.0` or NaN, leaving the node untouched.
    pub fn set_opacity(&mut self, id: NodeId, opacity: f32) -> Result<(), NodeError> {
        self.validate(id);
        if !(0.0..=1.0).contains(&opacity) {
            return Err(NodeError::OpacityOutOfRange(opacity));
        }
        let i = id.idx as usize;
        if self.opacity[i] != opacity {
            self.opacity[i] = opacity;
            self.mark_dirty_at(id.idx);
        }
        Ok(())
    }

    /// Sets the blend mode.
    pub fn set_blend_mode(&mut self, id: NodeId, mode: Option<BlendMode>) {
        self.validate(id);
        let i = id.idx as usize;
        if self.blend_mode[i] != mode {
            self.blend_mode[i] = mode;
            self.mark_dirty_at(id.idx);
        }
    }

    /// Enables or disables depth testing. A change marks the node dirty but
    /// keeps its own cache.
    pub fn set_depth_test(&mut self, id: NodeId, depth_test: bool) {
        self.validate(id);
        let i = id.idx as usize;
        if self.depth_test[i] != depth_test {
            self.depth_test[i] = depth_test;
            self.mark_dirty_at(id.idx);
        }
    }

    /// Sets the view order. A change invalidates the node's own cache.
    pub fn set_view_order(&mut self, id: NodeId, view_order: f64) {
        self.validate(id);
        let i = id.idx as usize;
        if self.view_order[i] != view_order {
            self.view_order[i] = view_order;
            self.visuals_changed_at(id.idx);
        }
    }

    /// Sets or clears the node used as this node's clip shape.
    ///
    /// The clip node gets an owner link back to this node; dirtying it marks
    /// this node fully dirty.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale, or the clip node has a parent or already
    /// clips another node.
    pub fn set_clip_node(&mut self, id: NodeId, clip: Option<NodeId>) {
        self.validate(id);
        let i = id.idx as usize;
        let new = clip.map_or(INVALID, |c| {
            self.validate(c);
            c.idx
        });
        if new == self.clip_node[i] {
            return;
        }
        if new != INVALID {
            assert!(new != id.idx, "a node cannot clip itself");
            assert!(
                self.parent[new as usize] == INVALID && self.owner[new as usize] == INVALID,
                "clip node is already attached"
            );
        }
        let old = self.clip_node[i];
        if old != INVALID {
            self.owner[old as usize] = INVALID;
        }
        if new != INVALID {
            self.owner[new as usize] = id.idx;
        }
        self.clip_node[i] = new;
        self.visuals_changed_at(id.idx);
    }

    /// Attaches, replaces, or removes the node's raster cache.
    ///
    /// A detached cache is disposed. Any change marks the node dirty so the
    /// cache is filled from current visuals.
    pub fn set_cache_filter(&mut self, id: NodeId, cache: Option<Box<dyn CacheFilter>>) {
        self.validate(id);
        let i = id.idx as usize;
        if self.cache[i].is_none() && cache.is_none() {
            return;
        }
        if let Some(mut old) = core::mem::replace(&mut self.cache[i], cache) {
            old.dispose();
        }
        self.mark_dirty_at(id.idx);
    }

    /// Changes the hint of the node's cache, if it has one.
    pub fn set_cache_hint(&mut self, id: NodeId, hint: CacheHint) {
        self.validate(id);
        let i = id.idx as usize;
        let changed = match self.cache[i].as_deref_mut() {
            Some(cache) if !cache.matches_hint(hint) => {
                cache.set_hint(hint);
                true
            }
            _ => false,
        };
        if changed {
            self.mark_dirty_at(id.idx);
        }
    }

    /// Attaches, replaces, or removes the node's effect.
    ///
    /// Replacing a filter with one applying the same [`EffectId`] keeps the
    /// existing filter and disposes the incoming one.
    ///
    /// [`EffectId`]: crate::filter::EffectId
    pub fn set_effect(&mut self, id: NodeId, effect: Option<Box<dyn EffectFilter>>) {
        self.validate(id);
        let i = id.idx as usize;
        let same = match (&self.effect[i], &effect) {
            (None, None) => true,
            (Some(old), Some(new)) => old.effect() == new.effect(),
            _ => false,
        };
        if same {
            if let Some(mut rejected) = effect {
                rejected.dispose();
            }
            return;
        }
        if let Some(mut old) = core::mem::replace(&mut self.effect[i], effect) {
            old.dispose();
        }
        self.visuals_changed_at(id.idx);
    }

    /// Notes that the node's effect changed internally.
    pub fn effect_changed(&mut self, id: NodeId) {
        self.validate(id);
        self.visuals_changed_at(id.idx);
    }

    /// Notes a change to the node's geometry: invalidates its cache and, if
    /// it draws anything itself, marks it dirty.
    pub fn geometry_changed(&mut self, id: NodeId) {
        self.validate(id);
        self.invalidate_cache_at(id.idx);
        if self.has_visuals_at(id.idx) {
            self.mark_dirty_at(id.idx);
        }
    }

    /// Notes a change to the node's visuals: invalidates its cache and marks
    /// it dirty.
    pub fn visuals_changed(&mut self, id: NodeId) {
        self.validate(id);
        self.visuals_changed_at(id.idx);
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Builds a handle for a live slot, or `None` for [`INVALID`].
    pub(crate) fn handle(&self, idx: u32) -> Option<NodeId> {
        (idx != INVALID).then(|| NodeId {
            idx,
            generation: self.generation[idx as usize],
        })
    }

    pub(crate) fn has_visuals_at(&self, idx: u32) -> bool {
        self.kind[idx as usize] == NodeKind::Leaf
    }

    pub(crate) fn is_clean_at(&self, idx: u32) -> bool {
        self.dirty[idx as usize] == DirtyState::Clean && !self.child_dirty[idx as usize]
    }

    pub(crate) fn visuals_changed_at(&mut self, idx: u32) {
        self.invalidate_cache_at(idx);
        self.mark_dirty_at(idx);
    }

    fn check_attachable(&self, group: NodeId, child: NodeId) {
        assert!(
            self.kind[group.idx as usize] == NodeKind::Group,
            "only groups accept children"
        );
        assert!(group.idx != child.idx, "a node cannot be its own child");
        assert!(
            self.parent[child.idx as usize] == INVALID,
            "child already has a parent"
        );
        assert!(
            self.owner[child.idx as usize] == INVALID,
            "child is a clip node"
        );
    }

    /// Splices `c` into `p`'s child list between `prev` and `next`.
    fn link(&mut self, p: u32, c: u32, prev: u32, next: u32) {
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = prev;
        self.next_sibling[c as usize] = next;
        if prev == INVALID {
            self.first_child[p as usize] = c;
        } else {
            self.next_sibling[prev as usize] = c;
        }
        if next != INVALID {
            self.prev_sibling[next as usize] = c;
        }
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            self.first_child[p as usize] = next;
        }
        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }

    fn child_added(&mut self, p: u32, c: u32) {
        let generation = self.generation[c as usize];
        self.removed[p as usize].retain(|r| !(r.idx == c && r.generation == generation));

        // A translation-only state was relative to the old parent's cache.
        self.dirty[c as usize] = DirtyState::Dirty;
        self.mark_tree_dirty_at(c);
    }

    pub(crate) fn remove_child_at(&mut self, p: u32, c: u32) {
        let snapshot = RemovedChild {
            idx: c,
            generation: self.generation[c as usize],
            bounds: self.damage_source_at(c),
        };
        self.unlink_from_parent(c);

        let pi = p as usize;
        if self.removed[pi].len() < self.config.removed_children_threshold {
            self.removed[pi].push(snapshot);
            let was_child_dirty = self.child_dirty[pi];
            self.child_dirty[pi] = true;
            self.dirty_child_count[pi] = self.dirty_child_count[pi].saturating_add(1);
            self.invalidate_cache_at(p);
            if !was_child_dirty {
                self.mark_tree_dirty_no_increment_at(p);
            }
        } else {
            self.visuals_changed_at(p);
        }
    }
}
