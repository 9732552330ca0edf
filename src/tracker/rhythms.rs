//! Rhythm storage and completion.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::bad_column;
use super::types::{Rhythm, Snapshot, UndoKind};
use super::undo::push_undo;
use crate::schedule::{next_occurrence, Schedule};

const RHYTHM_COLUMNS: &str = "id, title, schedule, next_occurrence, notification_enabled, \
     tags, archived, created_at, last_completed";

fn rhythm_from_row(row: &Row<'_>) -> rusqlite::Result<Rhythm> {
    let schedule_json: String = row.get(2)?;
    let tags_json: String = row.get(5)?;
    Ok(Rhythm {
        id: row.get(0)?,
        title: row.get(1)?,
        schedule: serde_json::from_str(&schedule_json).unwrap_or(Schedule::Unknown),
        next_occurrence: row.get(3)?,
        notification_enabled: row.get(4)?,
        tags: serde_json::from_str(&tags_json).map_err(|e| bad_column(5, e))?,
        archived: row.get(6)?,
        created_at: row.get(7)?,
        last_completed: row.get(8)?,
    })
}

fn query_rhythms(conn: &Connection, where_clause: &str) -> Result<Vec<Rhythm>> {
    let sql = format!("SELECT {RHYTHM_COLUMNS} FROM rhythms {where_clause}");
    let mut stmt = conn.prepare(&sql)?;
    let rhythms = stmt
        .query_map([], rhythm_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rhythms)
}

/// Insert or replace a rhythm.
pub fn save_rhythm(conn: &Connection, rhythm: &Rhythm) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT OR REPLACE INTO rhythms ({RHYTHM_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        ),
        params![
            rhythm.id,
            rhythm.title,
            serde_json::to_string(&rhythm.schedule)?,
            rhythm.next_occurrence,
            rhythm.notification_enabled,
            serde_json::to_string(&rhythm.tags)?,
            rhythm.archived,
            rhythm.created_at,
            rhythm.last_completed,
        ],
    )?;
    tracing::debug!(id = %rhythm.id, title = %rhythm.title, "rhythm saved");
    Ok(())
}

pub fn get_rhythm(conn: &Connection, id: &str) -> Result<Option<Rhythm>> {
    let rhythm = conn
        .query_row(
            &format!("SELECT {RHYTHM_COLUMNS} FROM rhythms WHERE id = ?1"),
            params![id],
            rhythm_from_row,
        )
        .optional()?;
    Ok(rhythm)
}

/// Look a rhythm up by full id or any unique id prefix.
pub fn find_rhythm(conn: &Connection, id_or_prefix: &str) -> Result<Rhythm> {
    if let Some(rhythm) = get_rhythm(conn, id_or_prefix)? {
        return Ok(rhythm);
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT {RHYTHM_COLUMNS} FROM rhythms WHERE substr(id, 1, length(?1)) = ?1 LIMIT 2"
    ))?;
    let mut matches = stmt
        .query_map(params![id_or_prefix], rhythm_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    match matches.len() {
        0 => bail!("rhythm not found: {id_or_prefix}"),
        1 => Ok(matches.remove(0)),
        _ => bail!("id prefix {id_or_prefix} matches more than one rhythm"),
    }
}

pub fn delete_rhythm_row(conn: &Connection, id: &str) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM rhythms WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

pub fn all_rhythms(conn: &Connection) -> Result<Vec<Rhythm>> {
    let mut rhythms = query_rhythms(conn, "")?;
    rhythms.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(rhythms)
}

/// Non-archived rhythms, soonest first.
pub fn active_rhythms(conn: &Connection) -> Result<Vec<Rhythm>> {
    let mut rhythms = query_rhythms(conn, "WHERE archived = 0")?;
    rhythms.sort_by(|a, b| a.next_occurrence.cmp(&b.next_occurrence));
    Ok(rhythms)
}

pub fn archived_rhythms(conn: &Connection) -> Result<Vec<Rhythm>> {
    let mut rhythms = query_rhythms(conn, "WHERE archived = 1")?;
    rhythms.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(rhythms)
}

/// Active rhythms due by the end of `now`'s calendar day (overdue included),
/// soonest first.
pub fn todays_rhythms<Tz: TimeZone>(conn: &Connection, now: &DateTime<Tz>) -> Result<Vec<Rhythm>> {
    let end_of_day = now
        .date_naive()
        .and_hms_opt(23, 59, 59)
        .and_then(|naive| now.timezone().from_local_datetime(&naive).latest())
        .map(|end| end.with_timezone(&Utc))
        .context("end of day is not representable in this time zone")?;

    let rhythms = active_rhythms(conn)?
        .into_iter()
        .filter(|r| r.next_occurrence <= end_of_day)
        .collect();
    Ok(rhythms)
}

/// Fields for a new rhythm.
#[derive(Debug, Clone)]
pub struct NewRhythm {
    pub title: String,
    pub schedule: Schedule,
    pub tags: Vec<String>,
    pub notification_enabled: bool,
}

/// Validate the schedule and store a rhythm whose first occurrence is the
/// next one after `now`.
pub fn create_rhythm<Tz: TimeZone>(
    conn: &Connection,
    new: NewRhythm,
    now: &DateTime<Tz>,
) -> Result<Rhythm> {
    if new.title.trim().is_empty() {
        bail!("a rhythm needs a title");
    }
    let first = next_occurrence(&new.schedule, now).context("invalid schedule")?;

    let rhythm = Rhythm {
        id: uuid::Uuid::now_v7().to_string(),
        title: new.title,
        schedule: new.schedule,
        next_occurrence: first.with_timezone(&Utc),
        notification_enabled: new.notification_enabled,
        tags: new.tags,
        archived: false,
        created_at: now.with_timezone(&Utc),
        last_completed: None,
    };
    save_rhythm(conn, &rhythm)?;
    tracing::info!(id = %rhythm.id, next = %rhythm.next_occurrence, "rhythm created");
    Ok(rhythm)
}

fn update_rhythm(
    conn: &mut Connection,
    id: &str,
    kind: UndoKind,
    undo_limit: usize,
    now: DateTime<Utc>,
    change: impl FnOnce(&mut Rhythm) -> Result<String>,
) -> Result<Rhythm> {
    let tx = conn.transaction()?;
    let original = find_rhythm(&tx, id)?;
    let mut updated = original.clone();
    let description = change(&mut updated)?;

    save_rhythm(&tx, &updated)?;
    push_undo(&tx, kind, Snapshot::Rhythm(original), &description, now, undo_limit)?;
    tx.commit()?;

    tracing::debug!(id = %updated.id, action = kind.as_str(), "rhythm updated");
    Ok(updated)
}

/// Record a completion at `now` and schedule the next occurrence after it.
pub fn mark_done<Tz: TimeZone>(
    conn: &mut Connection,
    id: &str,
    now: &DateTime<Tz>,
    undo_limit: usize,
) -> Result<Rhythm> {
    let now_utc = now.with_timezone(&Utc);
    update_rhythm(conn, id, UndoKind::MarkDone, undo_limit, now_utc, |rhythm| {
        let next = next_occurrence(&rhythm.schedule, now)
            .with_context(|| format!("can't reschedule {:?}", rhythm.title))?;
        rhythm.next_occurrence = next.with_timezone(&Utc);
        rhythm.last_completed = Some(now_utc);
        Ok("Marked done".to_string())
    })
}

/// [`mark_done`] at the current local time.
pub fn mark_done_now(conn: &mut Connection, id: &str, undo_limit: usize) -> Result<Rhythm> {
    mark_done(conn, id, &Local::now(), undo_limit)
}

pub fn archive_rhythm(
    conn: &mut Connection,
    id: &str,
    now: DateTime<Utc>,
    undo_limit: usize,
) -> Result<Rhythm> {
    update_rhythm(conn, id, UndoKind::Archive, undo_limit, now, |rhythm| {
        if rhythm.archived {
            bail!("rhythm is already archived: {}", rhythm.title);
        }
        rhythm.archived = true;
        Ok("Archived".to_string())
    })
}

pub fn restore_rhythm(
    conn: &mut Connection,
    id: &str,
    now: DateTime<Utc>,
    undo_limit: usize,
) -> Result<Rhythm> {
    update_rhythm(conn, id, UndoKind::Restore, undo_limit, now, |rhythm| {
        if !rhythm.archived {
            bail!("rhythm is not archived: {}", rhythm.title);
        }
        rhythm.archived = false;
        Ok("Restored".to_string())
    })
}

pub fn delete_rhythm(
    conn: &mut Connection,
    id: &str,
    now: DateTime<Utc>,
    undo_limit: usize,
) -> Result<Rhythm> {
    let tx = conn.transaction()?;
    let rhythm = find_rhythm(&tx, id)?;
    delete_rhythm_row(&tx, &rhythm.id)?;
    push_undo(&tx, UndoKind::Delete, Snapshot::Rhythm(rhythm.clone()), "Deleted", now, undo_limit)?;
    tx.commit()?;

    tracing::info!(id = %rhythm.id, "rhythm deleted");
    Ok(rhythm)
}
