use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, TimeZone};
use rusqlite::Connection;
use serde::Serialize;

use super::markers::all_markers;
use super::rhythms::{all_rhythms, todays_rhythms};
use super::types::MarkerType;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackerStats {
    pub active_markers: usize,
    pub archived_markers: usize,
    pub pinned_markers: usize,
    /// Active markers per type; every type is present, possibly with 0.
    pub markers_by_type: BTreeMap<String, usize>,
    pub active_rhythms: usize,
    pub archived_rhythms: usize,
    pub rhythms_due_today: usize,
}

/// Count markers and rhythms. `now` decides which rhythms are due today.
pub fn tracker_stats<Tz: TimeZone>(conn: &Connection, now: &DateTime<Tz>) -> Result<TrackerStats> {
    let mut stats = TrackerStats {
        markers_by_type: MarkerType::ALL
            .iter()
            .map(|t| (t.as_str().to_string(), 0))
            .collect(),
        ..Default::default()
    };

    for marker in all_markers(conn)? {
        if marker.archived {
            stats.archived_markers += 1;
            continue;
        }
        stats.active_markers += 1;
        if marker.pinned {
            stats.pinned_markers += 1;
        }
        *stats
            .markers_by_type
            .entry(marker.marker_type.as_str().to_string())
            .or_insert(0) += 1;
    }

    for rhythm in all_rhythms(conn)? {
        if rhythm.archived {
            stats.archived_rhythms += 1;
        } else {
            stats.active_rhythms += 1;
        }
    }
    stats.rhythms_due_today = todays_rhythms(conn, now)?.len();

    Ok(stats)
}
