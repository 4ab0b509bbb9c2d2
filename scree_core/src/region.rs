// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded dirty-region containers and the pool that recycles them.
//!
//! A [`DirtyRegionContainer`] holds at most `capacity` non-empty,
//! pairwise-disjoint rectangles. Adding a rectangle first absorbs every
//! existing rectangle it touches; when the container is full, the cheapest
//! pair (smallest growth in covered area) is merged to make room. The result
//! is a conservative cover of everything added, never an under-approximation.
//!
//! [`RegionPool`] hands out containers by value and takes them back by value,
//! so the per-frame damage pass allocates nothing once the pool is warm.
//! Returning a container twice is impossible by construction; forgetting to
//! return one shows up in [`RegionPool::outstanding`].

use alloc::vec::Vec;

use kurbo::Rect;

use crate::bounds;

/// Maximum number of regions a container may hold.
///
/// Bounded by the culling bitfield: two bits per region in a `u32`.
pub const MAX_DIRTY_REGIONS: usize = 15;

/// An ordered, bounded set of screen-space dirty rectangles.
#[derive(Clone, Debug)]
pub struct DirtyRegionContainer {
    regions: Vec<Rect>,
    capacity: usize,
    pooled: bool,
}

impl DirtyRegionContainer {
    /// Creates an empty container holding at most `capacity` rectangles.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or exceeds [`MAX_DIRTY_REGIONS`].
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(
            (1..=MAX_DIRTY_REGIONS).contains(&capacity),
            "region capacity must be in 1..={MAX_DIRTY_REGIONS}, got {capacity}"
        );
        Self {
            regions: Vec::with_capacity(capacity),
            capacity,
            pooled: false,
        }
    }

    /// Maximum number of rectangles this container holds.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of rectangles currently held.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if no rectangles are held.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Returns rectangle `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.size()`.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize) -> Rect {
        self.regions[i]
    }

    /// Overwrites rectangle `i` without merging.
    ///
    /// Used by in-place clip/transform passes; follow with
    /// [`check_and_clear_region`](Self::check_and_clear_region) if the new
    /// value may be empty.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.size()`.
    #[inline]
    pub fn set(&mut self, i: usize, rect: Rect) {
        self.regions[i] = rect;
    }

    /// Returns the held rectangles in order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Rect] {
        &self.regions
    }

    /// Iterates over the held rectangles.
    pub fn iter(&self) -> impl Iterator<Item = Rect> + '_ {
        self.regions.iter().copied()
    }

    /// Removes rectangle `i` if it became empty, moving the last rectangle
    /// into its slot. Returns `true` if a removal happened, in which case the
    /// caller must revisit index `i`.
    pub fn check_and_clear_region(&mut self, i: usize) -> bool {
        if bounds::is_empty(self.regions[i]) {
            self.regions.swap_remove(i);
            true
        } else {
            false
        }
    }

    /// Adds `rect`, merging it with every rectangle it touches and compacting
    /// when the container is full. Empty rectangles are ignored.
    pub fn add(&mut self, rect: Rect) {
        if bounds::is_empty(rect) {
            return;
        }
        let mut region = rect;
        let mut i = 0;
        while i < self.regions.len() {
            if bounds::intersects(region, self.regions[i]) {
                region = bounds::union(region, self.regions.swap_remove(i));
                // The union may now reach rectangles already passed over.
                i = 0;
            } else {
                i += 1;
            }
        }
        if self.regions.len() < self.capacity {
            self.regions.push(region);
        } else if self.capacity == 1 {
            self.regions[0] = bounds::union(self.regions[0], region);
        } else {
            self.compress(region);
        }
    }

    /// Adds every rectangle of `other`.
    pub fn merge(&mut self, other: &Self) {
        for rect in other.iter() {
            self.add(rect);
        }
    }

    /// Replaces the contents with those of `other`, compacting if `other`
    /// holds more rectangles than this container allows.
    pub fn replace_with(&mut self, other: &Self) {
        self.regions.clear();
        if other.size() <= self.capacity {
            self.regions.extend_from_slice(&other.regions);
        } else {
            self.merge(other);
        }
    }

    /// Intersects every rectangle with `clip`, dropping those that vanish.
    pub fn apply_clip(&mut self, clip: Rect) {
        let mut i = 0;
        while i < self.size() {
            self.set(i, bounds::intersect(self.get(i), clip));
            if !self.check_and_clear_region(i) {
                i += 1;
            }
        }
    }

    /// Maps every rectangle through `tx`, dropping those that vanish.
    ///
    /// Mapped rectangles may overlap afterwards; the container is not
    /// re-merged, matching the conservative contract of the damage pass.
    pub fn apply_transform(&mut self, tx: &crate::transform::Transform3d) {
        if tx.is_identity() {
            return;
        }
        let mut i = 0;
        while i < self.size() {
            self.set(i, tx.transform_rect(self.get(i)));
            if !self.check_and_clear_region(i) {
                i += 1;
            }
        }
    }

    /// Removes every rectangle.
    pub fn reset(&mut self) {
        self.regions.clear();
    }

    /// Returns the union of all held rectangles, or [`bounds::EMPTY`].
    #[must_use]
    pub fn union_rect(&self) -> Rect {
        self.iter().fold(bounds::EMPTY, bounds::union)
    }

    /// Makes room for `region` by merging the pair, among the held rectangles
    /// and `region` itself, whose union adds the least uncovered area.
    fn compress(&mut self, region: Rect) {
        let n = self.regions.len();
        let candidate = |k: usize| if k == n { region } else { self.regions[k] };
        let mut best = (0, 1);
        let mut best_cost = f64::INFINITY;
        for a in 0..=n {
            for b in (a + 1)..=n {
                let (ra, rb) = (candidate(a), candidate(b));
                let cost =
                    bounds::area(bounds::union(ra, rb)) - bounds::area(ra) - bounds::area(rb);
                if cost < best_cost {
                    best_cost = cost;
                    best = (a, b);
                }
            }
        }
        let (a, b) = best;
        let merged = bounds::union(candidate(a), candidate(b));
        // `b > a`, so remove `b` first to keep `a` valid. Index `n` is the
        // incoming region and was never stored.
        if b < n {
            self.regions.swap_remove(b);
        }
        if a < n {
            self.regions.swap_remove(a);
        }
        if b < n {
            // Both merged rectangles were stored; `region` still needs a home.
            self.add(region);
        }
        self.add(merged);
    }
}

/// A free list of [`DirtyRegionContainer`]s sharing one capacity.
#[derive(Debug)]
pub struct RegionPool {
    free: Vec<DirtyRegionContainer>,
    region_count: usize,
    outstanding: usize,
}

impl RegionPool {
    /// Creates an empty pool whose containers hold `region_count` rectangles.
    ///
    /// # Panics
    ///
    /// Panics if `region_count` is zero or exceeds [`MAX_DIRTY_REGIONS`].
    #[must_use]
    pub fn new(region_count: usize) -> Self {
        assert!(
            (1..=MAX_DIRTY_REGIONS).contains(&region_count),
            "region count must be in 1..={MAX_DIRTY_REGIONS}, got {region_count}"
        );
        Self {
            free: Vec::new(),
            region_count,
            outstanding: 0,
        }
    }

    /// Capacity of the containers this pool hands out.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.region_count
    }

    /// Number of containers currently checked out.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Number of idle containers ready for reuse.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    /// Takes an empty container from the pool, allocating one if none is idle.
    #[must_use]
    pub fn check_out(&mut self) -> DirtyRegionContainer {
        let mut container = self
            .free
            .pop()
            .unwrap_or_else(|| DirtyRegionContainer::new(self.region_count));
        container.pooled = true;
        self.outstanding += 1;
        container
    }

    /// Returns a container previously obtained from [`check_out`](Self::check_out).
    pub fn check_in(&mut self, mut container: DirtyRegionContainer) {
        debug_assert!(
            container.pooled && container.capacity == self.region_count,
            "container was not checked out of this pool"
        );
        debug_assert!(self.outstanding > 0, "check-in without a matching check-out");
        container.reset();
        container.pooled = false;
        self.outstanding = self.outstanding.saturating_sub(1);
        self.free.push(container);
    }
}
