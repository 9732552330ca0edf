//! Undo history.
//!
//! Every reversible action stores a [`Snapshot`] of the record as it was
//! before the action. Undoing writes that snapshot back, which covers every
//! action kind uniformly: an archived marker comes back unarchived, an
//! advanced pointer comes back to its old value, a deleted record is
//! re-inserted.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::markers::save_marker;
use super::rhythms::save_rhythm;
use super::bad_column;
use super::types::{Snapshot, UndoAction, UndoKind};

fn undo_from_row(row: &Row<'_>) -> rusqlite::Result<UndoAction> {
    let action: String = row.get(1)?;
    let snapshot: String = row.get(3)?;
    Ok(UndoAction {
        id: row.get(0)?,
        action: action.parse().map_err(|e: String| bad_column(1, e))?,
        timestamp: row.get(2)?,
        snapshot: serde_json::from_str(&snapshot).map_err(|e| bad_column(3, e))?,
        description: row.get(4)?,
    })
}

/// Record an action and trim the stack to the newest `limit` entries.
pub fn push_undo(
    conn: &Connection,
    action: UndoKind,
    snapshot: Snapshot,
    description: &str,
    now: DateTime<Utc>,
    limit: usize,
) -> Result<UndoAction> {
    let entry = UndoAction {
        id: uuid::Uuid::now_v7().to_string(),
        action,
        timestamp: now,
        snapshot,
        description: description.to_string(),
    };

    conn.execute(
        "INSERT INTO undo_stack (id, action, timestamp, snapshot, description) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            entry.id,
            entry.action.as_str(),
            entry.timestamp,
            serde_json::to_string(&entry.snapshot)?,
            entry.description,
        ],
    )?;

    let trimmed = conn.execute(
        "DELETE FROM undo_stack WHERE id NOT IN \
         (SELECT id FROM undo_stack ORDER BY timestamp DESC, id DESC LIMIT ?1)",
        params![limit as i64],
    )?;
    if trimmed > 0 {
        tracing::debug!(trimmed, limit, "undo stack trimmed");
    }

    Ok(entry)
}

/// Most recent undo entry, if any.
pub fn latest_undo(conn: &Connection) -> Result<Option<UndoAction>> {
    let entry = conn
        .query_row(
            "SELECT id, action, timestamp, snapshot, description FROM undo_stack \
             ORDER BY timestamp DESC, id DESC LIMIT 1",
            [],
            undo_from_row,
        )
        .optional()?;
    Ok(entry)
}

/// All undo entries, newest first.
pub fn list_undo(conn: &Connection) -> Result<Vec<UndoAction>> {
    let mut stmt = conn.prepare(
        "SELECT id, action, timestamp, snapshot, description FROM undo_stack \
         ORDER BY timestamp DESC, id DESC",
    )?;
    let entries = stmt
        .query_map([], undo_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

pub fn delete_undo(conn: &Connection, id: &str) -> Result<()> {
    conn.execute("DELETE FROM undo_stack WHERE id = ?1", params![id])?;
    Ok(())
}

/// Revert the most recent action. Returns the entry that was undone, or
/// `None` when there is nothing to undo.
pub fn undo_latest(conn: &mut Connection) -> Result<Option<UndoAction>> {
    let tx = conn.transaction()?;
    let Some(entry) = latest_undo(&tx)? else {
        return Ok(None);
    };

    match &entry.snapshot {
        Snapshot::Marker(marker) => save_marker(&tx, marker)?,
        Snapshot::Rhythm(rhythm) => save_rhythm(&tx, rhythm)?,
    }
    delete_undo(&tx, &entry.id)?;
    tx.commit()?;

    tracing::info!(
        action = entry.action.as_str(),
        id = entry.snapshot.id(),
        "undid action"
    );
    Ok(Some(entry))
}
