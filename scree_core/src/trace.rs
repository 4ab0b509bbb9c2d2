// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for damage passes.
//!
//! This module provides a [`TraceSink`] trait with one method per event the
//! damage engine reports. All method bodies default to no-ops, so implementing
//! only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink` together with the index
//! of the frame being traced. When the `trace` feature is **off**, every
//! `Tracer` emit method compiles to nothing. When **on**, each method performs
//! a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies.
//! - `trace-rich` (implies `trace`) gates [`DamageRect`] and [`CullRecord`]
//!   events plus the corresponding `TraceSink` methods.

use crate::node::{AccumulateStats, AccumulateStatus, CullStats};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a root accumulation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccumulateEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Whether the clip was fully covered.
    pub status: AccumulateStatus,
    /// Regions in the output container afterwards.
    pub rect_count: usize,
    /// Traversal counters.
    pub stats: AccumulateStats,
}

/// Emitted after a culling pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CullEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Traversal counters.
    pub stats: CullStats,
}

/// Emitted after the dirty state of a tree is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Nodes whose dirty state was reset.
    pub nodes_cleared: usize,
}

/// A screen-space damage rectangle.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

#[cfg(feature = "trace-rich")]
impl DamageRect {
    /// Converts a [`kurbo::Rect`].
    #[must_use]
    pub fn from_rect(r: kurbo::Rect) -> Self {
        Self {
            x: r.x0,
            y: r.y0,
            width: r.width(),
            height: r.height(),
        }
    }
}

/// The culling bits computed for one node.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CullRecord {
    /// Slot index of the node.
    pub node_index: u32,
    /// Packed per-region culling codes.
    pub bits: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from damage passes.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after an accumulation pass.
    fn on_accumulate(&mut self, e: &AccumulateEvent) {
        _ = e;
    }

    /// Called after a culling pass.
    fn on_cull(&mut self, e: &CullEvent) {
        _ = e;
    }

    /// Called after a tree is cleared.
    fn on_clear(&mut self, e: &ClearEvent) {
        _ = e;
    }

    /// Called with the accumulated damage rectangles (requires `trace-rich`
    /// feature).
    #[cfg(feature = "trace-rich")]
    fn on_damage_rects(&mut self, frame_index: u64, rects: &[DamageRect]) {
        _ = (frame_index, rects);
    }

    /// Called with the culling bits of every node in the culled subtree, in
    /// depth-first order (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_cull_records(&mut self, frame_index: u64, records: &[CullRecord]) {
        _ = (frame_index, records);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// Carries the frame index stamped onto every event it emits.
pub struct Tracer<'a> {
    frame_index: u64,
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer")
            .field("frame_index", &self.frame_index)
            .finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink, starting at
    /// frame 0.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self {
                frame_index: 0,
                sink: Some(sink),
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                frame_index: 0,
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self {
                frame_index: 0,
                sink: None,
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                frame_index: 0,
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Returns the tracer stamped with `frame_index`.
    #[inline]
    #[must_use]
    pub fn with_frame(mut self, frame_index: u64) -> Self {
        self.frame_index = frame_index;
        self
    }

    /// Moves on to the next frame.
    #[inline]
    pub fn advance_frame(&mut self) {
        self.frame_index = self.frame_index.wrapping_add(1);
    }

    /// Frame index stamped onto emitted events.
    #[inline]
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Emits an [`AccumulateEvent`].
    #[inline]
    pub fn accumulate(&mut self, e: &AccumulateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_accumulate(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CullEvent`].
    #[inline]
    pub fn cull(&mut self, e: &CullEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_cull(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ClearEvent`].
    #[inline]
    pub fn clear(&mut self, e: &ClearEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_clear(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits damage rectangles (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn damage_rects(&mut self, frame_index: u64, rects: &[DamageRect]) {
        if let Some(s) = &mut self.sink {
            s.on_damage_rects(frame_index, rects);
        }
    }

    /// Emits culling records (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn cull_records(&mut self, frame_index: u64, records: &[CullRecord]) {
        if let Some(s) = &mut self.sink {
            s.on_cull_records(frame_index, records);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
