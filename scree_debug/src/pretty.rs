// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use scree_core::node::AccumulateStatus;
use scree_core::trace::{
    AccumulateEvent, ClearEvent, CullEvent, CullRecord, DamageRect, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn status_name(status: AccumulateStatus) -> &'static str {
    match status {
        AccumulateStatus::Ok => "ok",
        AccumulateStatus::ContainsClip => "contains-clip",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_accumulate(&mut self, e: &AccumulateEvent) {
        let _ = writeln!(
            self.writer,
            "[accumulate] frame={} status={} rects={} visited={} descended={} \
             short_circuits={} removed={} added={}",
            e.frame_index,
            status_name(e.status),
            e.rect_count,
            e.stats.nodes_visited,
            e.stats.groups_descended,
            e.stats.threshold_short_circuits,
            e.stats.removed_visited,
            e.stats.rects_added,
        );
    }

    fn on_cull(&mut self, e: &CullEvent) {
        let _ = writeln!(
            self.writer,
            "[cull] frame={} regions={} classified={} cleared={}",
            e.frame_index, e.stats.regions, e.stats.nodes_classified, e.stats.nodes_cleared,
        );
    }

    fn on_clear(&mut self, e: &ClearEvent) {
        let _ = writeln!(
            self.writer,
            "[clear] frame={} nodes={}",
            e.frame_index, e.nodes_cleared,
        );
    }

    fn on_damage_rects(&mut self, frame_index: u64, rects: &[DamageRect]) {
        let _ = write!(self.writer, "[damage] frame={frame_index} rects={}", rects.len());
        for r in rects {
            let _ = write!(
                self.writer,
                " ({},{} {}x{})",
                r.x, r.y, r.width, r.height
            );
        }
        let _ = writeln!(self.writer);
    }

    fn on_cull_records(&mut self, frame_index: u64, records: &[CullRecord]) {
        let _ = writeln!(
            self.writer,
            "[cull:records] frame={frame_index} nodes={}",
            records.len(),
        );
    }
}
