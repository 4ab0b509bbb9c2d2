// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene-graph nodes and their damage state.
//!
//! A *node* is either a leaf, which draws content, or a group, which holds an
//! ordered list of children. Each node has:
//!
//! - An identity ([`NodeId`]): a generational handle that becomes stale when
//!   the node is destroyed.
//! - Topology: parent, first-child, and sibling links, plus an optional clip
//!   node owned by it.
//! - Geometry: a local transform, content bounds, and transformed bounds in
//!   parent space.
//! - Visual attributes: visibility, opacity, blend mode, an optional cache
//!   filter and an optional effect filter.
//! - Damage state: a [`DirtyState`], a child-dirty flag, dirty bounds, and a
//!   counter of dirty children.
//!
//! # Frame cycle
//!
//! Mutations mark nodes dirty and propagate a child-dirty flag toward the
//! root, stopping at the first ancestor that already carries it. Once per
//! frame the renderer calls
//! [`accumulate_dirty_regions`](NodeStore::accumulate_dirty_regions) on the
//! root, optionally [`do_pre_culling`](NodeStore::do_pre_culling) with the
//! resulting regions, draws, and finally
//! [`clear_dirty_tree`](NodeStore::clear_dirty_tree).

mod accumulate;
mod cull;
mod geometry;
mod id;
mod propagate;
mod state;
mod store;
mod traverse;

pub use accumulate::{AccumulateStats, AccumulateStatus, Accumulation};
pub use cull::{CULL_CONTAINS, CULL_INTERSECTS, CULL_INTERSECTS_MASK, CullClass, CullStats};
pub use id::{INVALID, NodeId};
pub use state::{BlendMode, DirtyState, NodeKind, RemovedChild};
pub use store::NodeStore;
pub use traverse::Children;
