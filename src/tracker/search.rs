//! Substring search across active markers and rhythms.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use super::markers::active_markers;
use super::rhythms::active_rhythms;
use super::types::{Marker, MarkerType, Rhythm};

#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Only markers of this type. Rhythms are unaffected.
    pub marker_type: Option<MarkerType>,
    /// Only pinned markers. Rhythms are unaffected.
    pub pinned_only: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub markers: Vec<Marker>,
    pub rhythms: Vec<Rhythm>,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.markers.len() + self.rhythms.len()
    }
}

/// Case-insensitive substring search.
///
/// Markers match on title, pointer, next step, or any tag; rhythms on title
/// or any tag. Archived records are never returned. An empty query matches
/// everything that passes the filter.
pub fn search(conn: &Connection, query: &str, filter: &SearchFilter) -> Result<SearchResults> {
    let needle = query.trim().to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    let markers = active_markers(conn)?
        .into_iter()
        .filter(|m| {
            needle.is_empty()
                || contains(&m.title)
                || contains(&m.pointer)
                || contains(&m.next_step)
                || m.tags.iter().any(|t| contains(t))
        })
        .filter(|m| filter.marker_type.map_or(true, |t| m.marker_type == t))
        .filter(|m| !filter.pinned_only || m.pinned)
        .collect();

    let rhythms = active_rhythms(conn)?
        .into_iter()
        .filter(|r| needle.is_empty() || contains(&r.title) || r.tags.iter().any(|t| contains(t)))
        .collect();

    Ok(SearchResults { markers, rhythms })
}
