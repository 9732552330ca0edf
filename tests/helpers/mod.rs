#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::Connection;
use wilo::db;
use wilo::tracker::markers::{create_from_text, MarkerOptions};
use wilo::tracker::types::Marker;

/// Undo stack size used by tests that don't care about trimming.
pub const UNDO_LIMIT: usize = 20;

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "foreign_keys", "ON").unwrap();
    db::schema::init_schema(&conn).unwrap();
    db::migrations::run_migrations(&mut conn).unwrap();
    conn
}

/// Thursday 2026-10-15 at the given UTC time.
pub fn thursday_at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 15, hour, minute, 0).unwrap()
}

/// Midday on Thursday 2026-10-15, the default clock for tests.
pub fn now() -> DateTime<Utc> {
    thursday_at(12, 0)
}

/// Add a marker from quick-add text with default options.
pub fn add_marker(conn: &Connection, text: &str) -> Marker {
    create_from_text(conn, text, &MarkerOptions::default(), now()).unwrap()
}
