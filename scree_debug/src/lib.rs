// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, JSON export, and dirty-tree dumps for scree
//! diagnostics.
//!
//! This crate provides [`TraceSink`](scree_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`json::export`]: writes recorded bytes as a JSON array.
//!
//! [`tree::write_dirty_tree`] prints the dirty state and culling bits of a
//! node tree, one node per line.

pub mod json;
pub mod pretty;
pub mod recorder;
pub mod tree;
