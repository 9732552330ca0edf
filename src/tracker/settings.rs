use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::types::{AppSettings, BackupFrequency};

const SETTINGS_KEY: &str = "app";

/// Stored settings, or defaults when none are stored or the row is unreadable.
pub fn get_settings(conn: &Connection) -> Result<AppSettings> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![SETTINGS_KEY],
            |row| row.get(0),
        )
        .optional()?;

    let settings = match value {
        Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored settings are unreadable, using defaults");
            AppSettings::default()
        }),
        None => AppSettings::default(),
    };
    Ok(settings)
}

pub fn save_settings(conn: &Connection, settings: &AppSettings) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
        params![SETTINGS_KEY, serde_json::to_string(settings)?],
    )?;
    Ok(())
}

/// Overlay the fields present in `incoming` (a partial settings object) onto
/// the stored settings.
pub fn merge_settings(conn: &Connection, incoming: &serde_json::Value) -> Result<AppSettings> {
    let mut merged = serde_json::to_value(get_settings(conn)?)?;
    if let (Some(target), Some(source)) = (merged.as_object_mut(), incoming.as_object()) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }
    let settings: AppSettings = serde_json::from_value(merged)?;
    save_settings(conn, &settings)?;
    Ok(settings)
}

/// Whether it is time to remind the user to export a backup.
pub fn backup_reminder_due(settings: &AppSettings, now: DateTime<Utc>) -> bool {
    let interval = match settings.backup_reminder_frequency {
        BackupFrequency::Never => return false,
        BackupFrequency::Weekly => Duration::days(7),
        BackupFrequency::Monthly => Duration::days(30),
    };
    settings
        .last_backup_reminder
        .map_or(true, |last| now - last >= interval)
}
