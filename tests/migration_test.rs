mod helpers;

use wilo::db;
use wilo::db::migrations::{get_schema_version, run_migrations, CURRENT_SCHEMA_VERSION};
use wilo::tracker::settings::get_settings;
use wilo::tracker::types::BackupFrequency;

#[test]
fn fresh_db_migrates_to_current_version() {
    let conn = helpers::test_db();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn migrations_are_idempotent() {
    let mut conn = helpers::test_db();
    run_migrations(&mut conn).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn v1_db_gets_default_settings_row() {
    let mut conn = rusqlite::Connection::open_in_memory().unwrap();
    db::schema::init_schema(&conn).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), 1);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 0);

    run_migrations(&mut conn).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), 2);
    assert_eq!(
        get_settings(&conn).unwrap().backup_reminder_frequency,
        BackupFrequency::Monthly
    );
}

#[test]
fn reset_keeps_settings() {
    let conn = helpers::test_db();
    helpers::add_marker(&conn, "Dune page 1");
    db::clear_all_data(&conn).unwrap();

    let markers: i64 = conn
        .query_row("SELECT COUNT(*) FROM markers", [], |row| row.get(0))
        .unwrap();
    assert_eq!(markers, 0);
    let settings: i64 = conn
        .query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))
        .unwrap();
    assert_eq!(settings, 1);
}

#[test]
fn reopening_file_database_preserves_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wilo.db");
    {
        let conn = db::open_database(&path).unwrap();
        helpers::add_marker(&conn, "Dune page 1");
    }
    let conn = db::open_database(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM markers", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
