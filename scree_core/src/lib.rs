// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty tracking and incremental redraw for retained scene graphs.
//!
//! `scree_core` tracks which parts of a retained-mode scene graph changed
//! between frames and turns that into a small set of screen-space rectangles
//! a renderer needs to repaint. It is `no_std` compatible (with `alloc`) and
//! stores nodes in struct-of-arrays layout behind generational handles.
//!
//! # Architecture
//!
//! Each frame flows through the same steps:
//!
//! ```text
//!   mutations (set_transform, set_opacity, add_child, ...)
//!       │  mark dirty, propagate child-dirty toward the root
//!       ▼
//!   NodeStore::accumulate_dirty_regions() ──► DirtyRegionContainer
//!                                                    │
//!                 ┌──────────────────────────────────┘
//!                 ▼
//!   NodeStore::do_pre_culling() ──► per-node culling bits ──► renderer
//!                                                                │
//!                 ┌──────────────────────────────────────────────┘
//!                 ▼
//!   NodeStore::clear_dirty_tree()
//! ```
//!
//! **[`node`]**: Struct-of-arrays node tree with generational handles, dirty
//! propagation, bounds bookkeeping, accumulation, and culling.
//!
//! **[`region`]**: Bounded set of dirty rectangles and the pool of scratch
//! containers used while accumulating.
//!
//! **[`filter`]**: The [`CacheFilter`](filter::CacheFilter) and
//! [`EffectFilter`](filter::EffectFilter) attachments a node may carry.
//!
//! **[`bounds`]**: Rectangle helpers with an explicit empty value.
//!
//! **[`transform`]**: 4×4 transform used for node placement and projection.
//!
//! **[`config`]**: Per-store tunables.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! damage-pass instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Example
//!
//! ```
//! use kurbo::Rect;
//! use scree_core::node::{AccumulateStatus, NodeStore};
//! use scree_core::region::{DirtyRegionContainer, RegionPool};
//! use scree_core::transform::Transform3d;
//!
//! let mut store = NodeStore::new();
//! let root = store.create_group();
//! let leaf = store.create_leaf();
//! store.add_child(root, leaf);
//! store.set_transformed_bounds(leaf, Rect::new(0.0, 0.0, 10.0, 10.0), false);
//! store.clear_dirty_tree(root);
//!
//! store.set_opacity(leaf, 0.5).unwrap();
//!
//! let mut pool = RegionPool::new(6);
//! let mut out = DirtyRegionContainer::new(6);
//! let acc = store.accumulate_dirty_regions(
//!     root,
//!     Rect::new(0.0, 0.0, 100.0, 100.0),
//!     &mut pool,
//!     &mut out,
//!     &Transform3d::IDENTITY,
//!     &Transform3d::IDENTITY,
//! );
//! assert_eq!(acc.status, AccumulateStatus::Ok);
//! // One pixel of padding, clipped to the screen.
//! assert_eq!(out.as_slice(), &[Rect::new(0.0, 0.0, 11.0, 11.0)]);
//! store.clear_dirty_tree(root);
//! ```
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-frame
//!   damage-rect and culling-record events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod bounds;
pub mod config;
pub mod error;
pub mod filter;
pub mod node;
pub mod region;
pub mod trace;
pub mod transform;

#[cfg(test)]
mod testing;
