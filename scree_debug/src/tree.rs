// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text dump of a node tree's damage state.
//!
//! Each drawn node gets one line: its name (or kind and slot), followed by
//! bracketed markers when any apply. Children are indented by two spaces;
//! a clip node is printed before the children of its owner with a `cl `
//! prefix. Invisible and fully transparent nodes are skipped along with
//! their subtrees.

use std::fmt::Write as _;
use std::io;

use scree_core::node::{CullClass, DirtyState, NodeId, NodeStore};
use scree_core::region::MAX_DIRTY_REGIONS;

/// Key printed at the top of every dump.
pub const LEGEND: &str = "\
d=Dirty
dt=Dirty By Translation
i=Dirty Region Intersects the Node
c=Dirty Region Contains the Node
ef=Effect Filter
cf=Cache Filter
cl=This node is a clip node
b=Blend mode is set
";

/// Writes [`LEGEND`] followed by the tree rooted at `root`.
pub fn write_dirty_tree(
    store: &NodeStore,
    root: NodeId,
    writer: &mut dyn io::Write,
) -> io::Result<()> {
    writer.write_all(dirty_tree_string(store, root).as_bytes())
}

/// Returns [`LEGEND`] followed by the tree rooted at `root`.
#[must_use]
pub fn dirty_tree_string(store: &NodeStore, root: NodeId) -> String {
    let mut out = String::from(LEGEND);
    write_node(store, root, "", &mut out);
    out
}

/// Markers for one node, in print order.
#[must_use]
pub fn node_markers(store: &NodeStore, id: NodeId) -> Vec<String> {
    let mut marks = Vec::new();
    match store.dirty_state(id) {
        DirtyState::Dirty => marks.push("d".to_owned()),
        DirtyState::DirtyByTranslation => marks.push("dt".to_owned()),
        DirtyState::Clean => {}
    }
    let bits = store.culling_bits(id);
    for region in 0..MAX_DIRTY_REGIONS {
        match CullClass::of(bits, region) {
            CullClass::Intersects => marks.push(format!("i{region}")),
            CullClass::Contained => marks.push(format!("c{region}")),
            CullClass::Outside => {}
        }
    }
    if store.effect_filter(id).is_some() {
        marks.push("ef".to_owned());
    }
    if store.cache_filter(id).is_some() {
        marks.push("cf".to_owned());
    }
    if store.blend_mode(id).is_some() {
        marks.push("b".to_owned());
    }
    marks
}

fn write_node(store: &NodeStore, id: NodeId, prefix: &str, out: &mut String) {
    if !store.visible(id) || store.opacity(id) == 0.0 {
        return;
    }
    let label = match store.name(id) {
        Some(name) => name.to_owned(),
        None => format!("{:?}#{}", store.kind(id), id.index()),
    };
    let marks = node_markers(store, id);
    // Writing into a `String` cannot fail.
    if marks.is_empty() {
        let _ = writeln!(out, "{prefix}{label}");
    } else {
        let _ = writeln!(out, "{prefix}{label} [{}]", marks.join(" "));
    }

    if let Some(clip) = store.clip_node(id) {
        write_node(store, clip, &format!("{prefix}  cl "), out);
    }
    for child in store.children(id) {
        write_node(store, child, &format!("{prefix}  "), out);
    }
}
