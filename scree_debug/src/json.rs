// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter.
//!
//! [`export`] reads recorded bytes from a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes them as a JSON
//! array with one object per event. Every object carries an `"event"` name
//! and a `"frame_index"`.

use std::io::{self, Write};

use serde_json::{Value, json};

use scree_core::node::AccumulateStatus;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a pretty-printed JSON array.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes).map(|e| to_value(&e)).collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn to_value(recorded: &RecordedEvent) -> Value {
    match recorded {
        RecordedEvent::Accumulate(e) => json!({
            "event": "accumulate",
            "frame_index": e.frame_index,
            "status": status_name(e.status),
            "rect_count": e.rect_count,
            "stats": {
                "nodes_visited": e.stats.nodes_visited,
                "groups_descended": e.stats.groups_descended,
                "threshold_short_circuits": e.stats.threshold_short_circuits,
                "removed_visited": e.stats.removed_visited,
                "rects_added": e.stats.rects_added,
            }
        }),
        RecordedEvent::Cull(e) => json!({
            "event": "cull",
            "frame_index": e.frame_index,
            "regions": e.stats.regions,
            "nodes_classified": e.stats.nodes_classified,
            "nodes_cleared": e.stats.nodes_cleared,
        }),
        RecordedEvent::Clear(e) => json!({
            "event": "clear",
            "frame_index": e.frame_index,
            "nodes_cleared": e.nodes_cleared,
        }),
        RecordedEvent::DamageRects { frame_index, rects } => json!({
            "event": "damage_rects",
            "frame_index": frame_index,
            "rects": rects
                .iter()
                .map(|r| json!([r.x, r.y, r.width, r.height]))
                .collect::<Vec<_>>(),
        }),
        RecordedEvent::CullRecordsCount { frame_index, count } => json!({
            "event": "cull_records",
            "frame_index": frame_index,
            "count": count,
        }),
    }
}

fn status_name(status: AccumulateStatus) -> &'static str {
    match status {
        AccumulateStatus::Ok => "ok",
        AccumulateStatus::ContainsClip => "contains_clip",
    }
}

#[cfg(test)]
mod tests {
    use scree_core::node::{AccumulateStats, CullStats};
    use scree_core::trace::{AccumulateEvent, CullEvent, DamageRect, TraceSink};

    use super::*;
    use crate::recorder::RecorderSink;

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_accumulate(&AccumulateEvent {
            frame_index: 2,
            status: AccumulateStatus::Ok,
            rect_count: 1,
            stats: AccumulateStats {
                nodes_visited: 3,
                ..AccumulateStats::default()
            },
        });
        rec.on_damage_rects(2, &[DamageRect {
            x: 0.0,
            y: 1.0,
            width: 2.0,
            height: 3.0,
        }]);
        rec.on_cull(&CullEvent {
            frame_index: 2,
            stats: CullStats::default(),
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["event"], "accumulate");
        assert_eq!(parsed[0]["status"], "ok");
        assert_eq!(parsed[0]["stats"]["nodes_visited"], 3);

        assert_eq!(parsed[1]["event"], "damage_rects");
        assert_eq!(parsed[1]["rects"][0], json!([0.0, 1.0, 2.0, 3.0]));

        assert_eq!(parsed[2]["event"], "cull");
        assert_eq!(parsed[2]["frame_index"], 2);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
