// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attachment doubles for unit tests.
//!
//! Clones share their counters, so a test keeps one clone and hands the other
//! to the store.

use alloc::rc::Rc;
use core::cell::Cell;

use kurbo::Rect;

use crate::bounds;
use crate::filter::{CacheFilter, CacheHint, EffectFilter, EffectId};
use crate::region::{DirtyRegionContainer, RegionPool};
use crate::transform::Transform3d;

#[derive(Debug, Default)]
struct CacheCounters {
    invalidations: Cell<u32>,
    translations: Cell<u32>,
    last_translation: Cell<Option<(f64, f64)>>,
    disposals: Cell<u32>,
    hint: Cell<CacheHint>,
}

/// A [`CacheFilter`] that counts what happens to it.
#[derive(Clone, Debug, Default)]
pub(crate) struct CountingCache {
    counters: Rc<CacheCounters>,
}

impl CountingCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn invalidations(&self) -> u32 {
        self.counters.invalidations.get()
    }

    pub(crate) fn translations(&self) -> u32 {
        self.counters.translations.get()
    }

    pub(crate) fn last_translation(&self) -> Option<(f64, f64)> {
        self.counters.last_translation.get()
    }

    pub(crate) fn disposals(&self) -> u32 {
        self.counters.disposals.get()
    }

    pub(crate) fn hint(&self) -> CacheHint {
        self.counters.hint.get()
    }

    /// Zeroes every counter, keeping the hint.
    pub(crate) fn reset_counts(&self) {
        let c = &self.counters;
        c.invalidations.set(0);
        c.translations.set(0);
        c.last_translation.set(None);
        c.disposals.set(0);
    }
}

impl CacheFilter for CountingCache {
    fn invalidate(&mut self) {
        let c = &self.counters.invalidations;
        c.set(c.get() + 1);
    }

    fn invalidate_by_translation(&mut self, dx: f64, dy: f64) {
        let c = &self.counters.translations;
        c.set(c.get() + 1);
        self.counters.last_translation.set(Some((dx, dy)));
    }

    fn matches_hint(&self, hint: CacheHint) -> bool {
        self.counters.hint.get() == hint
    }

    fn set_hint(&mut self, hint: CacheHint) {
        self.counters.hint.set(hint);
    }

    fn dispose(&mut self) {
        let c = &self.counters.disposals;
        c.set(c.get() + 1);
    }
}

/// An [`EffectFilter`] that grows everything by a fixed amount on each side.
#[derive(Clone, Debug)]
pub(crate) struct GrowEffect {
    id: u64,
    amount: f64,
    disposals: Rc<Cell<u32>>,
}

impl GrowEffect {
    pub(crate) fn new(id: u64, amount: f64) -> Self {
        Self {
            id,
            amount,
            disposals: Rc::default(),
        }
    }

    pub(crate) fn disposals(&self) -> u32 {
        self.disposals.get()
    }
}

impl EffectFilter for GrowEffect {
    fn effect(&self) -> EffectId {
        EffectId(self.id)
    }

    fn bounds(&self, content: Rect, tx: &Transform3d) -> Rect {
        tx.transform_rect(bounds::pad(content, self.amount))
    }

    fn dirty_regions(
        &self,
        _input_bounds: Rect,
        pre: &DirtyRegionContainer,
        pool: &mut RegionPool,
    ) -> DirtyRegionContainer {
        let mut post = pool.check_out();
        for rect in pre.iter() {
            post.add(bounds::pad(rect, self.amount));
        }
        post
    }

    fn dispose(&mut self) {
        self.disposals.set(self.disposals.get() + 1);
    }
}
