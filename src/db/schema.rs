//! SQL DDL for all wilo tables.
//!
//! Defines the `markers`, `rhythms`, `undo_stack`, `settings`, and
//! `schema_meta` tables. All DDL uses `IF NOT EXISTS` for idempotent
//! initialization.

use rusqlite::Connection;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS markers (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    pointer TEXT NOT NULL DEFAULT '',
    next_step TEXT NOT NULL DEFAULT '',
    type TEXT NOT NULL DEFAULT 'other'
        CHECK(type IN ('book','bible','article','video','project','course','other')),
    tags TEXT NOT NULL DEFAULT '[]',
    group_name TEXT,
    meeting_note TEXT,
    pinned INTEGER NOT NULL DEFAULT 0,
    archived INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    last_touched TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_markers_last_touched ON markers(last_touched);
CREATE INDEX IF NOT EXISTS idx_markers_archived ON markers(archived);
CREATE INDEX IF NOT EXISTS idx_markers_pinned ON markers(pinned);

CREATE TABLE IF NOT EXISTS rhythms (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    schedule TEXT NOT NULL,
    next_occurrence TEXT NOT NULL,
    notification_enabled INTEGER NOT NULL DEFAULT 1,
    tags TEXT NOT NULL DEFAULT '[]',
    archived INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    last_completed TEXT
);

CREATE INDEX IF NOT EXISTS idx_rhythms_next_occurrence ON rhythms(next_occurrence);
CREATE INDEX IF NOT EXISTS idx_rhythms_archived ON rhythms(archived);

-- Snapshots of records taken before reversible actions
CREATE TABLE IF NOT EXISTS undo_stack (
    id TEXT PRIMARY KEY,
    action TEXT NOT NULL
        CHECK(action IN ('archive','restore','advance','mark_done','delete','edit','pin')),
    timestamp TEXT NOT NULL,
    snapshot TEXT NOT NULL,
    description TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_undo_timestamp ON undo_stack(timestamp);

CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        for expected in ["markers", "rhythms", "undo_stack", "settings", "schema_meta"] {
            assert!(tables.contains(&expected.to_string()), "missing table {expected}");
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap(); // second call should not error
    }

    #[test]
    fn marker_type_is_checked() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO markers (id, title, type, created_at, last_touched) \
             VALUES ('x', 'Bad', 'podcast', 'now', 'now')",
            [],
        );
        assert!(result.is_err());
    }
}
