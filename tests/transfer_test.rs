mod helpers;

use chrono::Duration;
use helpers::{add_marker, now, test_db, UNDO_LIMIT};
use wilo::db;
use wilo::schedule::Schedule;
use wilo::tracker::markers::{advance_marker, all_markers, get_marker};
use wilo::tracker::rhythms::{all_rhythms, create_rhythm, NewRhythm};
use wilo::tracker::settings::get_settings;
use wilo::tracker::transfer::{export_json, import_data, preview_import, ImportSummary};

#[test]
fn backup_file_restores_into_fresh_database() {
    let dir = tempfile::tempdir().unwrap();
    let backup = dir.path().join("backup.json");

    let source = db::open_database(dir.path().join("source.db")).unwrap();
    add_marker(&source, "Dune page 12 next: finish chapter");
    add_marker(&source, "Lecture 1:15:00");
    create_rhythm(
        &source,
        NewRhythm {
            title: "Journal".into(),
            schedule: Schedule::weekly([1, 3]).unwrap(),
            tags: vec!["writing".into()],
            notification_enabled: false,
        },
        &now(),
    )
    .unwrap();
    std::fs::write(&backup, export_json(&source, now()).unwrap()).unwrap();

    let mut target = db::open_database(dir.path().join("target.db")).unwrap();
    let json = std::fs::read_to_string(&backup).unwrap();
    let summary = import_data(&mut target, &json).unwrap();

    assert_eq!(summary, ImportSummary { markers: 2, rhythms: 1 });
    assert_eq!(all_markers(&target).unwrap(), all_markers(&source).unwrap());
    assert_eq!(all_rhythms(&target).unwrap(), all_rhythms(&source).unwrap());
    assert_eq!(get_settings(&target).unwrap().last_backup_reminder, Some(now()));
}

#[test]
fn reimport_overwrites_local_changes() {
    let mut conn = test_db();
    let marker = add_marker(&conn, "Dune page 12");
    let json = export_json(&conn, now()).unwrap();

    advance_marker(&mut conn, &marker.id, 10, now() + Duration::hours(1), UNDO_LIMIT).unwrap();

    let preview = preview_import(&conn, &json).unwrap();
    assert_eq!(preview.new_markers, 0);
    assert_eq!(preview.updated_markers, 1);
    assert_eq!(preview.conflicts.len(), 1);

    import_data(&mut conn, &json).unwrap();
    assert_eq!(get_marker(&conn, &marker.id).unwrap().unwrap().pointer, "page 12");
}

#[test]
fn malformed_or_unknown_archives_change_nothing() {
    let mut conn = test_db();
    add_marker(&conn, "Keep me");

    assert!(import_data(&mut conn, "not json").is_err());
    assert!(import_data(&mut conn, r#"{"version": 7, "markers": []}"#).is_err());
    assert!(preview_import(&conn, r#"{"version": "1"}"#).is_err());
    assert_eq!(all_markers(&conn).unwrap().len(), 1);
}
