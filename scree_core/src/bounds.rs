// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle helpers with explicit "empty" semantics.
//!
//! Bounds are plain [`kurbo::Rect`] values. A rectangle is *empty* when its
//! maximum edge lies before its minimum edge on either axis; a zero-area
//! rectangle (for example the bounds of a horizontal line) is **not** empty.
//! [`EMPTY`] is the canonical empty value, used for fresh nodes and cleared
//! dirty bounds.
//!
//! kurbo's own `union`/`intersect` treat every rectangle as populated, so the
//! damage engine goes through these helpers instead.

use kurbo::Rect;

/// The canonical empty rectangle.
pub const EMPTY: Rect = Rect::new(0.0, 0.0, -1.0, -1.0);

/// Returns `true` if `r` covers no points at all.
#[inline]
#[must_use]
pub fn is_empty(r: Rect) -> bool {
    r.x1 < r.x0 || r.y1 < r.y0
}

/// Returns the smallest rectangle containing both `a` and `b`.
#[must_use]
pub fn union(a: Rect, b: Rect) -> Rect {
    match (is_empty(a), is_empty(b)) {
        (true, _) => b,
        (_, true) => a,
        _ => Rect::new(a.x0.min(b.x0), a.y0.min(b.y0), a.x1.max(b.x1), a.y1.max(b.y1)),
    }
}

/// Returns the overlap of `a` and `b`, or [`EMPTY`] if they are disjoint.
#[must_use]
pub fn intersect(a: Rect, b: Rect) -> Rect {
    if is_empty(a) || is_empty(b) {
        return EMPTY;
    }
    let r = Rect::new(a.x0.max(b.x0), a.y0.max(b.y0), a.x1.min(b.x1), a.y1.min(b.y1));
    if is_empty(r) { EMPTY } else { r }
}

/// Returns `true` if `a` and `b` share at least one point.
#[must_use]
pub fn intersects(a: Rect, b: Rect) -> bool {
    !is_empty(a)
        && !is_empty(b)
        && b.x1 >= a.x0
        && b.y1 >= a.y0
        && b.x0 <= a.x1
        && b.y0 <= a.y1
}

/// Returns `true` if `outer` fully contains `inner`.
///
/// Nothing contains an empty rectangle, and an empty rectangle contains
/// nothing.
#[must_use]
pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    !is_empty(outer)
        && !is_empty(inner)
        && inner.x0 >= outer.x0
        && inner.y0 >= outer.y0
        && inner.x1 <= outer.x1
        && inner.y1 <= outer.y1
}

/// Grows `r` by `amount` on every side. Empty rectangles stay empty.
#[must_use]
pub fn pad(r: Rect, amount: f64) -> Rect {
    if is_empty(r) || amount == 0.0 {
        return r;
    }
    Rect::new(r.x0 - amount, r.y0 - amount, r.x1 + amount, r.y1 + amount)
}

/// Area of `r`, zero for empty rectangles.
#[must_use]
pub fn area(r: Rect) -> f64 {
    if is_empty(r) { 0.0 } else { r.width() * r.height() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_area_is_not_empty() {
        assert!(!is_empty(Rect::new(0.0, 5.0, 10.0, 5.0)));
        assert!(is_empty(EMPTY));
    }

    #[test]
    fn union_ignores_empty() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(union(EMPTY, r), r);
        assert_eq!(union(r, EMPTY), r);
        assert_eq!(
            union(r, Rect::new(-1.0, 0.0, 2.0, 10.0)),
            Rect::new(-1.0, 0.0, 3.0, 10.0)
        );
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 30.0, 30.0);
        assert!(is_empty(intersect(a, b)));
        assert!(!intersects(a, b));
        assert_eq!(
            intersect(a, Rect::new(5.0, 5.0, 15.0, 15.0)),
            Rect::new(5.0, 5.0, 10.0, 10.0)
        );
    }

    #[test]
    fn touching_edges_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(intersects(a, b));
    }

    #[test]
    fn containment_is_inclusive() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(contains_rect(a, a));
        assert!(contains_rect(a, Rect::new(2.0, 2.0, 3.0, 3.0)));
        assert!(!contains_rect(a, Rect::new(2.0, 2.0, 13.0, 3.0)));
        assert!(!contains_rect(a, EMPTY));
    }

    #[test]
    fn pad_grows_each_side() {
        assert_eq!(
            pad(Rect::new(0.0, 0.0, 10.0, 10.0), 1.0),
            Rect::new(-1.0, -1.0, 11.0, 11.0)
        );
        assert!(is_empty(pad(EMPTY, 1.0)));
    }
}
