//! Marker storage and the actions that change a marker.
//!
//! Plain CRUD functions (`save_marker`, `get_marker`, ...) work on a borrowed
//! connection. The user-facing actions (`advance_marker`, `archive_marker`,
//! ...) run in a transaction and push a snapshot of the previous state onto
//! the undo stack.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::bad_column;
use super::types::{Marker, MarkerType, Snapshot, UndoKind};
use super::undo::push_undo;
use crate::pointer::parse_marker_input;

const MARKER_COLUMNS: &str = "id, title, pointer, next_step, type, tags, group_name, \
     meeting_note, pinned, archived, created_at, last_touched";

/// Map a row selected with [`MARKER_COLUMNS`] to a [`Marker`].
fn marker_from_row(row: &Row<'_>) -> rusqlite::Result<Marker> {
    let type_str: String = row.get(4)?;
    let tags_json: String = row.get(5)?;
    Ok(Marker {
        id: row.get(0)?,
        title: row.get(1)?,
        pointer: row.get(2)?,
        next_step: row.get(3)?,
        marker_type: type_str.parse().map_err(|e: String| bad_column(4, e))?,
        tags: serde_json::from_str(&tags_json).map_err(|e| bad_column(5, e))?,
        group: row.get(6)?,
        meeting_note: row.get(7)?,
        pinned: row.get(8)?,
        archived: row.get(9)?,
        created_at: row.get(10)?,
        last_touched: row.get(11)?,
    })
}

fn query_markers(conn: &Connection, where_clause: &str) -> Result<Vec<Marker>> {
    let sql = format!("SELECT {MARKER_COLUMNS} FROM markers {where_clause}");
    let mut stmt = conn.prepare(&sql)?;
    let markers = stmt
        .query_map([], marker_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(markers)
}

/// Insert or replace a marker.
pub fn save_marker(conn: &Connection, marker: &Marker) -> Result<()> {
    let tags = serde_json::to_string(&marker.tags)?;
    conn.execute(
        &format!(
            "INSERT OR REPLACE INTO markers ({MARKER_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
        ),
        params![
            marker.id,
            marker.title,
            marker.pointer,
            marker.next_step,
            marker.marker_type.as_str(),
            tags,
            marker.group,
            marker.meeting_note,
            marker.pinned,
            marker.archived,
            marker.created_at,
            marker.last_touched,
        ],
    )?;
    tracing::debug!(id = %marker.id, title = %marker.title, "marker saved");
    Ok(())
}

pub fn get_marker(conn: &Connection, id: &str) -> Result<Option<Marker>> {
    let marker = conn
        .query_row(
            &format!("SELECT {MARKER_COLUMNS} FROM markers WHERE id = ?1"),
            params![id],
            marker_from_row,
        )
        .optional()?;
    Ok(marker)
}

/// Look a marker up by full id or any unique id prefix.
pub fn find_marker(conn: &Connection, id_or_prefix: &str) -> Result<Marker> {
    if let Some(marker) = get_marker(conn, id_or_prefix)? {
        return Ok(marker);
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT {MARKER_COLUMNS} FROM markers WHERE substr(id, 1, length(?1)) = ?1 LIMIT 2"
    ))?;
    let mut matches = stmt
        .query_map(params![id_or_prefix], marker_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    match matches.len() {
        0 => bail!("marker not found: {id_or_prefix}"),
        1 => Ok(matches.remove(0)),
        _ => bail!("id prefix {id_or_prefix} matches more than one marker"),
    }
}

/// Remove a marker row. Returns `false` if it did not exist.
pub fn delete_marker_row(conn: &Connection, id: &str) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM markers WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

/// Every marker, oldest first.
pub fn all_markers(conn: &Connection) -> Result<Vec<Marker>> {
    let mut markers = query_markers(conn, "")?;
    markers.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(markers)
}

/// Non-archived markers, pinned first, then most recently touched.
pub fn active_markers(conn: &Connection) -> Result<Vec<Marker>> {
    let mut markers = query_markers(conn, "WHERE archived = 0")?;
    markers.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| b.last_touched.cmp(&a.last_touched))
    });
    Ok(markers)
}

/// Archived markers, most recently touched first.
pub fn archived_markers(conn: &Connection) -> Result<Vec<Marker>> {
    let mut markers = query_markers(conn, "WHERE archived = 1")?;
    markers.sort_by(|a, b| b.last_touched.cmp(&a.last_touched));
    Ok(markers)
}

/// Extra fields for a marker created from quick-add text.
#[derive(Debug, Clone, Default)]
pub struct MarkerOptions {
    pub marker_type: MarkerType,
    pub tags: Vec<String>,
    pub group: Option<String>,
    pub pinned: bool,
}

/// Parse quick-add text and store the result as a new marker.
pub fn create_from_text(
    conn: &Connection,
    text: &str,
    options: &MarkerOptions,
    now: DateTime<Utc>,
) -> Result<Marker> {
    let draft = parse_marker_input(text);
    if draft.title.is_empty() {
        bail!("a marker needs a title");
    }

    let mut marker = Marker::new(draft.title, now);
    marker.pointer = draft.pointer;
    marker.next_step = draft.next_step;
    marker.marker_type = options.marker_type;
    marker.tags = options.tags.clone();
    marker.group = options.group.clone();
    marker.pinned = options.pinned;

    save_marker(conn, &marker)?;
    tracing::info!(id = %marker.id, pointer = %marker.pointer, "marker created");
    Ok(marker)
}

/// Fields to overwrite with `edit_marker`; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct MarkerEdit {
    pub title: Option<String>,
    pub pointer: Option<String>,
    pub next_step: Option<String>,
    pub meeting_note: Option<String>,
    pub marker_type: Option<MarkerType>,
    pub tags: Option<Vec<String>>,
    pub group: Option<String>,
}

impl MarkerEdit {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.pointer.is_none()
            && self.next_step.is_none()
            && self.meeting_note.is_none()
            && self.marker_type.is_none()
            && self.tags.is_none()
            && self.group.is_none()
    }
}

/// Apply `change` to a marker and record the previous version for undo.
fn update_marker(
    conn: &mut Connection,
    id: &str,
    kind: UndoKind,
    undo_limit: usize,
    now: DateTime<Utc>,
    change: impl FnOnce(&mut Marker) -> Result<String>,
) -> Result<Marker> {
    let tx = conn.transaction()?;
    let original = find_marker(&tx, id)?;
    let mut updated = original.clone();
    let description = change(&mut updated)?;

    save_marker(&tx, &updated)?;
    push_undo(&tx, kind, Snapshot::Marker(original), &description, now, undo_limit)?;
    tx.commit()?;

    tracing::debug!(id = %updated.id, action = kind.as_str(), "marker updated");
    Ok(updated)
}

/// Move a marker's pointer forward by `amount` units.
///
/// Fails for freeform pointers, which have no automatic advance; the caller
/// should offer a manual edit instead.
pub fn advance_marker(
    conn: &mut Connection,
    id: &str,
    amount: i64,
    now: DateTime<Utc>,
    undo_limit: usize,
) -> Result<Marker> {
    update_marker(conn, id, UndoKind::Advance, undo_limit, now, |marker| {
        let next = marker
            .parsed_pointer()
            .advance(amount)
            .with_context(|| {
                format!(
                    "pointer {:?} can't be advanced automatically; edit it instead",
                    marker.pointer
                )
            })?;
        marker.pointer = next.to_string();
        marker.last_touched = now;
        Ok(format!("Advanced to {}", marker.pointer))
    })
}

pub fn edit_marker(
    conn: &mut Connection,
    id: &str,
    edit: MarkerEdit,
    now: DateTime<Utc>,
    undo_limit: usize,
) -> Result<Marker> {
    if edit.is_empty() {
        bail!("nothing to edit");
    }
    update_marker(conn, id, UndoKind::Edit, undo_limit, now, |marker| {
        if let Some(title) = edit.title {
            if title.trim().is_empty() {
                bail!("a marker needs a title");
            }
            marker.title = title;
        }
        if let Some(pointer) = edit.pointer {
            marker.pointer = pointer;
        }
        if let Some(next_step) = edit.next_step {
            marker.next_step = next_step;
        }
        if let Some(note) = edit.meeting_note {
            marker.meeting_note = Some(note).filter(|n| !n.is_empty());
        }
        if let Some(marker_type) = edit.marker_type {
            marker.marker_type = marker_type;
        }
        if let Some(tags) = edit.tags {
            marker.tags = tags;
        }
        if let Some(group) = edit.group {
            marker.group = Some(group).filter(|g| !g.is_empty());
        }
        marker.last_touched = now;
        Ok("Edited".to_string())
    })
}

pub fn toggle_pin(
    conn: &mut Connection,
    id: &str,
    now: DateTime<Utc>,
    undo_limit: usize,
) -> Result<Marker> {
    update_marker(conn, id, UndoKind::Pin, undo_limit, now, |marker| {
        marker.pinned = !marker.pinned;
        Ok(if marker.pinned { "Pinned" } else { "Unpinned" }.to_string())
    })
}

pub fn archive_marker(
    conn: &mut Connection,
    id: &str,
    now: DateTime<Utc>,
    undo_limit: usize,
) -> Result<Marker> {
    update_marker(conn, id, UndoKind::Archive, undo_limit, now, |marker| {
        if marker.archived {
            bail!("marker is already archived: {}", marker.title);
        }
        marker.archived = true;
        Ok("Archived".to_string())
    })
}

pub fn restore_marker(
    conn: &mut Connection,
    id: &str,
    now: DateTime<Utc>,
    undo_limit: usize,
) -> Result<Marker> {
    update_marker(conn, id, UndoKind::Restore, undo_limit, now, |marker| {
        if !marker.archived {
            bail!("marker is not archived: {}", marker.title);
        }
        marker.archived = false;
        Ok("Restored".to_string())
    })
}

/// Permanently remove a marker. The removed record stays on the undo stack.
pub fn delete_marker(
    conn: &mut Connection,
    id: &str,
    now: DateTime<Utc>,
    undo_limit: usize,
) -> Result<Marker> {
    let tx = conn.transaction()?;
    let marker = find_marker(&tx, id)?;
    delete_marker_row(&tx, &marker.id)?;
    push_undo(&tx, UndoKind::Delete, Snapshot::Marker(marker.clone()), "Deleted", now, undo_limit)?;
    tx.commit()?;

    tracing::info!(id = %marker.id, "marker deleted");
    Ok(marker)
}
