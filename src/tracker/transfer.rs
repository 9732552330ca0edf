//! JSON backup archives.
//!
//! An archive carries every marker and rhythm (archived ones included) plus
//! the app settings. Importing upserts by id, so re-importing the same file
//! is harmless.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use super::markers::{all_markers, get_marker, save_marker};
use super::rhythms::{all_rhythms, get_rhythm, save_rhythm};
use super::settings::{get_settings, merge_settings, save_settings};
use super::types::{AppSettings, Marker, Rhythm};

/// Archive format version written by this build.
pub const EXPORT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub markers: Vec<Marker>,
    pub rhythms: Vec<Rhythm>,
    pub settings: AppSettings,
}

/// Incoming archive, read after its version has been checked. Settings stay
/// untyped so a partial object only overrides the keys it names.
#[derive(Debug, Deserialize)]
struct ImportData {
    #[serde(default)]
    markers: Vec<Marker>,
    #[serde(default)]
    rhythms: Vec<Rhythm>,
    #[serde(default)]
    settings: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Marker,
    Rhythm,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportConflict {
    pub id: String,
    pub title: String,
    pub kind: RecordKind,
    pub reason: String,
}

/// What an import would change, computed without writing anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportPreview {
    pub new_markers: usize,
    pub new_rhythms: usize,
    pub updated_markers: usize,
    pub updated_rhythms: usize,
    pub conflicts: Vec<ImportConflict>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub markers: usize,
    pub rhythms: usize,
}

/// Snapshot the whole database and stamp the backup reminder.
pub fn export_data(conn: &Connection, now: DateTime<Utc>) -> Result<ExportData> {
    let mut settings = get_settings(conn)?;
    settings.last_backup_reminder = Some(now);
    save_settings(conn, &settings)?;

    let data = ExportData {
        version: EXPORT_VERSION,
        exported_at: now,
        markers: all_markers(conn)?,
        rhythms: all_rhythms(conn)?,
        settings,
    };
    tracing::info!(
        markers = data.markers.len(),
        rhythms = data.rhythms.len(),
        "exported data"
    );
    Ok(data)
}

/// [`export_data`] rendered as pretty-printed JSON.
pub fn export_json(conn: &Connection, now: DateTime<Utc>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&export_data(conn, now)?)?)
}

fn parse_archive(json: &str) -> Result<ImportData> {
    let value: serde_json::Value = serde_json::from_str(json).context("failed to parse import JSON")?;
    let version = value.get("version").and_then(serde_json::Value::as_u64);
    if version != Some(u64::from(EXPORT_VERSION)) {
        let found = version.map_or_else(|| "missing".to_string(), |v| v.to_string());
        bail!("unsupported data format (version {found})");
    }
    serde_json::from_value(value).context("failed to parse import JSON")
}

/// Compare an archive against the database.
///
/// A record counts as a conflict when the local copy was changed after the
/// incoming one: a later `last_touched` for markers, a later completion for
/// rhythms. Conflicting records are still counted as updates.
pub fn preview_import(conn: &Connection, json: &str) -> Result<ImportPreview> {
    let data = parse_archive(json)?;
    let mut preview = ImportPreview::default();

    for incoming in &data.markers {
        match get_marker(conn, &incoming.id)? {
            None => preview.new_markers += 1,
            Some(local) => {
                preview.updated_markers += 1;
                if local.last_touched > incoming.last_touched {
                    preview.conflicts.push(ImportConflict {
                        id: local.id,
                        title: local.title,
                        kind: RecordKind::Marker,
                        reason: "local copy was touched after the backup was made".into(),
                    });
                }
            }
        }
    }

    for incoming in &data.rhythms {
        match get_rhythm(conn, &incoming.id)? {
            None => preview.new_rhythms += 1,
            Some(local) => {
                preview.updated_rhythms += 1;
                if local.last_completed > incoming.last_completed {
                    preview.conflicts.push(ImportConflict {
                        id: local.id,
                        title: local.title,
                        kind: RecordKind::Rhythm,
                        reason: "local copy was completed after the backup was made".into(),
                    });
                }
            }
        }
    }

    Ok(preview)
}

/// Upsert every record in the archive and merge its settings, all in one
/// transaction.
pub fn import_data(conn: &mut Connection, json: &str) -> Result<ImportSummary> {
    let data = parse_archive(json)?;
    let tx = conn.transaction()?;

    for marker in &data.markers {
        save_marker(&tx, marker)?;
    }
    for rhythm in &data.rhythms {
        save_rhythm(&tx, rhythm)?;
    }
    if let Some(settings) = &data.settings {
        merge_settings(&tx, settings)?;
    }
    tx.commit()?;

    let summary = ImportSummary {
        markers: data.markers.len(),
        rhythms: data.rhythms.len(),
    };
    tracing::info!(markers = summary.markers, rhythms = summary.rhythms, "imported data");
    Ok(summary)
}
