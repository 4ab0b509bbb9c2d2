// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as little-endian records, each starting with a one-byte tag.
//! [`decode`] reads them back as an iterator of [`RecordedEvent`].
//!
//! Damage rectangles are stored in full. Culling records store only the
//! count.

use scree_core::node::{AccumulateStats, AccumulateStatus, CullStats};
use scree_core::trace::{
    AccumulateEvent, ClearEvent, CullEvent, CullRecord, DamageRect, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_ACCUMULATE: u8 = 1;
const TAG_CULL: u8 = 2;
const TAG_CLEAR: u8 = 3;
const TAG_DAMAGE_RECTS: u8 = 4;
const TAG_CULL_RECORDS_COUNT: u8 = 5;

/// Encoded size of one damage rectangle.
const RECT_BYTES: usize = 4 * 8;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_count(&mut self, len: usize) -> usize {
        let count = u32::try_from(len).unwrap_or(u32::MAX);
        self.write_u32(count);
        count as usize
    }

    fn write_status(&mut self, s: AccumulateStatus) {
        self.write_u8(match s {
            AccumulateStatus::Ok => 0,
            AccumulateStatus::ContainsClip => 1,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_accumulate(&mut self, e: &AccumulateEvent) {
        self.write_u8(TAG_ACCUMULATE);
        self.write_u64(e.frame_index);
        self.write_status(e.status);
        self.write_count(e.rect_count);
        self.write_u32(e.stats.nodes_visited);
        self.write_u32(e.stats.groups_descended);
        self.write_u32(e.stats.threshold_short_circuits);
        self.write_u32(e.stats.removed_visited);
        self.write_u32(e.stats.rects_added);
    }

    fn on_cull(&mut self, e: &CullEvent) {
        self.write_u8(TAG_CULL);
        self.write_u64(e.frame_index);
        self.write_u32(e.stats.regions);
        self.write_u32(e.stats.nodes_classified);
        self.write_u32(e.stats.nodes_cleared);
    }

    fn on_clear(&mut self, e: &ClearEvent) {
        self.write_u8(TAG_CLEAR);
        self.write_u64(e.frame_index);
        self.write_u64(e.nodes_cleared as u64);
    }

    fn on_damage_rects(&mut self, frame_index: u64, rects: &[DamageRect]) {
        self.write_u8(TAG_DAMAGE_RECTS);
        self.write_u64(frame_index);
        let count = self.write_count(rects.len());
        for r in &rects[..count] {
            self.write_f64(r.x);
            self.write_f64(r.y);
            self.write_f64(r.width);
            self.write_f64(r.height);
        }
    }

    fn on_cull_records(&mut self, frame_index: u64, records: &[CullRecord]) {
        self.write_u8(TAG_CULL_RECORDS_COUNT);
        self.write_u64(frame_index);
        self.write_count(records.len());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// An [`AccumulateEvent`].
    Accumulate(AccumulateEvent),
    /// A [`CullEvent`].
    Cull(CullEvent),
    /// A [`ClearEvent`].
    Clear(ClearEvent),
    /// Damage rectangles for a frame.
    DamageRects {
        /// Frame counter.
        frame_index: u64,
        /// The rectangles, in the order they were emitted.
        rects: Vec<DamageRect>,
    },
    /// Culling-record count for a frame.
    CullRecordsCount {
        /// Frame counter.
        frame_index: u64,
        /// Number of nodes classified.
        count: u32,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        if self.remaining() < N {
            return None;
        }
        let v = self.data[self.pos..self.pos + N].try_into().ok()?;
        self.pos += N;
        Some(v)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.read_array::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_array().map(f64::from_le_bytes)
    }

    fn read_status(&mut self) -> Option<AccumulateStatus> {
        Some(match self.read_u8()? {
            0 => AccumulateStatus::Ok,
            _ => AccumulateStatus::ContainsClip,
        })
    }

    fn decode_accumulate(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Accumulate(AccumulateEvent {
            frame_index: self.read_u64()?,
            status: self.read_status()?,
            rect_count: self.read_u32()? as usize,
            stats: AccumulateStats {
                nodes_visited: self.read_u32()?,
                groups_descended: self.read_u32()?,
                threshold_short_circuits: self.read_u32()?,
                removed_visited: self.read_u32()?,
                rects_added: self.read_u32()?,
            },
        }))
    }

    fn decode_cull(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Cull(CullEvent {
            frame_index: self.read_u64()?,
            stats: CullStats {
                regions: self.read_u32()?,
                nodes_classified: self.read_u32()?,
                nodes_cleared: self.read_u32()?,
            },
        }))
    }

    fn decode_clear(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Clear(ClearEvent {
            frame_index: self.read_u64()?,
            nodes_cleared: usize::try_from(self.read_u64()?).ok()?,
        }))
    }

    fn decode_damage_rects(&mut self) -> Option<RecordedEvent> {
        let frame_index = self.read_u64()?;
        let count = self.read_u32()? as usize;
        if self.remaining() < count.checked_mul(RECT_BYTES)? {
            return None;
        }
        let mut rects = Vec::with_capacity(count);
        for _ in 0..count {
            rects.push(DamageRect {
                x: self.read_f64()?,
                y: self.read_f64()?,
                width: self.read_f64()?,
                height: self.read_f64()?,
            });
        }
        Some(RecordedEvent::DamageRects { frame_index, rects })
    }

    fn decode_cull_records_count(&mut self) -> Option<RecordedEvent> {
        let frame_index = self.read_u64()?;
        let count = self.read_u32()?;
        Some(RecordedEvent::CullRecordsCount { frame_index, count })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_ACCUMULATE => self.decode_accumulate(),
            TAG_CULL => self.decode_cull(),
            TAG_CLEAR => self.decode_clear(),
            TAG_DAMAGE_RECTS => self.decode_damage_rects(),
            TAG_CULL_RECORDS_COUNT => self.decode_cull_records_count(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
