mod helpers;

use chrono::{Duration, TimeZone, Utc};
use helpers::{test_db, thursday_at, UNDO_LIMIT};
use wilo::schedule::Schedule;
use wilo::tracker::rhythms::{
    active_rhythms, archive_rhythm, create_rhythm, delete_rhythm, get_rhythm, mark_done,
    todays_rhythms, NewRhythm,
};
use wilo::tracker::types::{Rhythm, UndoKind};
use wilo::tracker::undo::undo_latest;

fn create(conn: &rusqlite::Connection, title: &str, schedule: Schedule) -> Rhythm {
    create_rhythm(
        conn,
        NewRhythm {
            title: title.into(),
            schedule,
            tags: vec![],
            notification_enabled: true,
        },
        &thursday_at(12, 0),
    )
    .unwrap()
}

#[test]
fn weekly_rhythm_on_creation_day_starts_next_week() {
    let conn = test_db();
    let rhythm = create(&conn, "Team sync notes", Schedule::weekly([4]).unwrap());
    assert_eq!(rhythm.next_occurrence, Utc.with_ymd_and_hms(2026, 10, 22, 9, 0, 0).unwrap());
}

#[test]
fn mark_done_reschedules_and_undo_reverts() {
    let mut conn = test_db();
    let rhythm = create(&conn, "Water plants", Schedule::every(3));
    assert_eq!(rhythm.next_occurrence, Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap());

    let done_at = Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();
    let done = mark_done(&mut conn, &rhythm.id, &done_at, UNDO_LIMIT).unwrap();
    assert_eq!(done.next_occurrence, Utc.with_ymd_and_hms(2026, 10, 21, 9, 0, 0).unwrap());
    assert_eq!(done.last_completed, Some(done_at));

    let entry = undo_latest(&mut conn).unwrap().unwrap();
    assert_eq!(entry.action, UndoKind::MarkDone);
    assert_eq!(get_rhythm(&conn, &rhythm.id).unwrap(), Some(rhythm));
}

#[test]
fn today_view_includes_overdue_rhythms() {
    let conn = test_db();
    create(&conn, "Daily stretch", Schedule::Daily);
    create(&conn, "Monthly review", Schedule::monthly(1).unwrap());

    // The daily rhythm comes due Friday morning; by Saturday it is overdue.
    let saturday = thursday_at(12, 0) + Duration::days(2);
    let due: Vec<String> = todays_rhythms(&conn, &saturday)
        .unwrap()
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(due, vec!["Daily stretch"]);
}

#[test]
fn archived_and_deleted_rhythms_leave_active_list() {
    let mut conn = test_db();
    let a = create(&conn, "A", Schedule::Daily);
    let b = create(&conn, "B", Schedule::every(2));

    archive_rhythm(&mut conn, &a.id, thursday_at(13, 0), UNDO_LIMIT).unwrap();
    delete_rhythm(&mut conn, &b.id, thursday_at(14, 0), UNDO_LIMIT).unwrap();
    assert!(active_rhythms(&conn).unwrap().is_empty());

    undo_latest(&mut conn).unwrap();
    let titles: Vec<String> = active_rhythms(&conn).unwrap().into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["B"]);
}

#[test]
fn invalid_schedule_is_rejected_on_create() {
    let conn = test_db();
    let result = create_rhythm(
        &conn,
        NewRhythm {
            title: "Broken".into(),
            schedule: Schedule::Monthly { day_of_month: None },
            tags: vec![],
            notification_enabled: true,
        },
        &thursday_at(12, 0),
    );
    assert!(result.is_err());
    assert!(active_rhythms(&conn).unwrap().is_empty());
}
