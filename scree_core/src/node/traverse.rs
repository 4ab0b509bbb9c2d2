// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child iteration.

use core::iter::FusedIterator;

use super::id::NodeId;
use super::store::NodeStore;

/// An iterator over the direct children of a node, in paint order.
///
/// Created by [`NodeStore::children`].
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a NodeStore,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a NodeStore, first: u32) -> Self {
        Self {
            store,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.store.handle(self.current)?;
        self.current = self.store.next_sibling[id.idx as usize];
        Some(id)
    }
}

// `current` stays at `INVALID` once the last sibling is passed.
impl FusedIterator for Children<'_> {}
