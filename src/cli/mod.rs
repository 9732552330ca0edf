pub mod add;
pub mod export;
pub mod import;
pub mod list;
pub mod marker;
pub mod reset;
pub mod rhythm;
pub mod search;
pub mod settings;
pub mod stats;
pub mod undo;

use anyhow::Result;
use rusqlite::Connection;

use wilo::config::WiloConfig;
use wilo::schedule::{format_relative_to_today, format_schedule};
use wilo::tracker::types::{Marker, Rhythm};

/// Shortest id prefix shown in listings.
const MIN_ID_PREFIX: usize = 8;

pub(crate) fn open(config: &WiloConfig) -> Result<Connection> {
    wilo::db::open_database(config.resolved_db_path())
}

/// Length of the shortest prefix (at least [`MIN_ID_PREFIX`]) that tells
/// every id in `ids` apart.
pub(crate) fn unique_prefix_len<'a>(ids: impl IntoIterator<Item = &'a str> + Clone) -> usize {
    let longest = ids
        .clone()
        .into_iter()
        .map(|id| id.chars().count())
        .max()
        .unwrap_or(0);
    let mut len = MIN_ID_PREFIX;
    while len < longest {
        let mut seen = std::collections::HashSet::new();
        if ids.clone().into_iter().all(|id| seen.insert(prefix(id, len))) {
            break;
        }
        len += 1;
    }
    len
}

/// First `len` characters of `id`.
fn prefix(id: &str, len: usize) -> &str {
    match id.char_indices().nth(len) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

pub(crate) fn marker_line(marker: &Marker, id_len: usize) -> String {
    let mut line = format!(
        "{}  {}{}",
        prefix(&marker.id, id_len),
        if marker.pinned { "* " } else { "" },
        marker.title
    );
    if !marker.pointer.is_empty() {
        line.push_str(&format!(" @ {}", marker.pointer));
    }
    if !marker.next_step.is_empty() {
        line.push_str(&format!("  -> {}", marker.next_step));
    }
    line
}

pub(crate) fn rhythm_line(rhythm: &Rhythm, id_len: usize) -> String {
    format!(
        "{}  {} ({}, next {})",
        prefix(&rhythm.id, id_len),
        rhythm.title,
        format_schedule(&rhythm.schedule),
        format_relative_to_today(&rhythm.next_occurrence),
    )
}

pub(crate) fn print_markers(markers: &[Marker]) {
    let id_len = unique_prefix_len(markers.iter().map(|m| m.id.as_str()));
    for marker in markers {
        println!("  {}", marker_line(marker, id_len));
    }
}

pub(crate) fn print_rhythms(rhythms: &[Rhythm]) {
    let id_len = unique_prefix_len(rhythms.iter().map(|r| r.id.as_str()));
    for rhythm in rhythms {
        println!("  {}", rhythm_line(rhythm, id_len));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn prefix_grows_until_ids_differ() {
        let ids = ["0192abcd-1111-7000", "0192abcd-2222-7000"];
        assert_eq!(unique_prefix_len(ids.iter().copied()), 10);
        assert_eq!(unique_prefix_len(["0192abcd-1111"].iter().copied()), MIN_ID_PREFIX);
        assert_eq!(unique_prefix_len(std::iter::empty::<&str>()), MIN_ID_PREFIX);
    }

    #[test]
    fn prefix_counts_characters_not_bytes() {
        let ids = ["aéééééééé-1", "aéééééééé-2"];
        assert_eq!(unique_prefix_len(ids.iter().copied()), 11);
        assert_eq!(prefix(ids[0], 8), "aééééééé");
        assert_eq!(prefix("ééé", 8), "ééé");
        assert_eq!(unique_prefix_len(["ééééé-1", "ééééé-2"].iter().copied()), MIN_ID_PREFIX);

        let mut marker = Marker::new("Dune", Utc::now());
        marker.id = ids[0].into();
        assert_eq!(marker_line(&marker, 3), "aéé  Dune");
    }

    #[test]
    fn marker_line_shows_pin_pointer_and_next_step() {
        let mut marker = Marker::new("Dune", Utc::now());
        marker.id = "0192abcd-1111".into();
        marker.pointer = "page 94".into();
        marker.next_step = "reread".into();
        marker.pinned = true;
        assert_eq!(marker_line(&marker, 8), "0192abcd  * Dune @ page 94  -> reread");
    }
}
