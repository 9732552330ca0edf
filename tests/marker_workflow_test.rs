mod helpers;

use chrono::Duration;
use helpers::{add_marker, now, test_db, UNDO_LIMIT};
use wilo::tracker::markers::{
    active_markers, advance_marker, archive_marker, archived_markers, delete_marker, edit_marker,
    find_marker, get_marker, toggle_pin, MarkerEdit,
};
use wilo::tracker::types::UndoKind;
use wilo::tracker::undo::{list_undo, undo_latest};

#[test]
fn advance_then_undo_restores_pointer() {
    let mut conn = test_db();
    let marker = add_marker(&conn, "Mere Christianity page 94 next: underline quote");

    let advanced = advance_marker(&mut conn, &marker.id, 5, now() + Duration::hours(1), UNDO_LIMIT).unwrap();
    assert_eq!(advanced.pointer, "page 99");

    let entry = undo_latest(&mut conn).unwrap().unwrap();
    assert_eq!(entry.action, UndoKind::Advance);
    assert_eq!(entry.description, "Advanced to page 99");

    let stored = get_marker(&conn, &marker.id).unwrap().unwrap();
    assert_eq!(stored, marker);
}

#[test]
fn undo_brings_back_deleted_marker() {
    let mut conn = test_db();
    let marker = add_marker(&conn, "Talk 34:22");
    delete_marker(&mut conn, &marker.id, now(), UNDO_LIMIT).unwrap();
    assert!(get_marker(&conn, &marker.id).unwrap().is_none());

    undo_latest(&mut conn).unwrap();
    assert_eq!(get_marker(&conn, &marker.id).unwrap(), Some(marker));
}

#[test]
fn undo_unarchives() {
    let mut conn = test_db();
    let marker = add_marker(&conn, "Course step 3");
    archive_marker(&mut conn, &marker.id, now(), UNDO_LIMIT).unwrap();
    assert_eq!(archived_markers(&conn).unwrap().len(), 1);

    undo_latest(&mut conn).unwrap();
    assert!(archived_markers(&conn).unwrap().is_empty());
    assert_eq!(active_markers(&conn).unwrap().len(), 1);
}

#[test]
fn undo_walks_back_through_history_newest_first() {
    let mut conn = test_db();
    let marker = add_marker(&conn, "Dune page 10");

    advance_marker(&mut conn, &marker.id, 1, now() + Duration::seconds(1), UNDO_LIMIT).unwrap();
    toggle_pin(&mut conn, &marker.id, now() + Duration::seconds(2), UNDO_LIMIT).unwrap();
    let edit = MarkerEdit {
        next_step: Some("finish part two".into()),
        ..Default::default()
    };
    edit_marker(&mut conn, &marker.id, edit, now() + Duration::seconds(3), UNDO_LIMIT).unwrap();

    let kinds: Vec<UndoKind> = list_undo(&conn).unwrap().iter().map(|e| e.action).collect();
    assert_eq!(kinds, vec![UndoKind::Edit, UndoKind::Pin, UndoKind::Advance]);

    undo_latest(&mut conn).unwrap();
    let current = get_marker(&conn, &marker.id).unwrap().unwrap();
    assert_eq!(current.next_step, "");
    assert!(current.pinned);

    undo_latest(&mut conn).unwrap();
    undo_latest(&mut conn).unwrap();
    assert_eq!(get_marker(&conn, &marker.id).unwrap().unwrap(), marker);
    assert!(undo_latest(&mut conn).unwrap().is_none());
}

#[test]
fn undo_history_is_capped() {
    let mut conn = test_db();
    let marker = add_marker(&conn, "Dune page 1");
    for i in 0..5 {
        advance_marker(&mut conn, &marker.id, 1, now() + Duration::seconds(i), 3).unwrap();
    }
    assert_eq!(list_undo(&conn).unwrap().len(), 3);
}

#[test]
fn failed_action_leaves_no_undo_entry() {
    let mut conn = test_db();
    let marker = add_marker(&conn, "Garden project");
    assert!(advance_marker(&mut conn, &marker.id, 1, now(), UNDO_LIMIT).is_err());
    assert!(list_undo(&conn).unwrap().is_empty());
}

#[test]
fn markers_can_be_found_by_prefix() {
    let conn = test_db();
    let marker = add_marker(&conn, "Dune page 1");
    let found = find_marker(&conn, &marker.id[..20]).unwrap();
    assert_eq!(found, marker);
}
