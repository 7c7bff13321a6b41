use teva_tui::database::{Database, DatabaseError};
use teva_tui::models::{Event, EventType, Priority, Task};

fn open_temp_db(dir: &tempfile::TempDir) -> Database {
    let path = dir.path().join("teva.db");
    Database::new(path.to_str().unwrap()).unwrap()
}

#[test]
fn task_roundtrip_preserves_fields() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_temp_db(&dir);

    let mut task = Task::new("Write report".to_string());
    task.priority = Priority::High;
    task.due_date = Some("2026-09-01".to_string());
    task.set_category("Work");
    let id = db.insert_task(&task).unwrap();

    let loaded = db.get_task(id).unwrap();
    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.title, "Write report");
    assert!(!loaded.completed);
    assert_eq!(loaded.priority, Priority::High);
    assert_eq!(loaded.due_date.as_deref(), Some("2026-09-01"));
    assert_eq!(loaded.category, "Work");
}

#[test]
fn tasks_come_back_in_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_temp_db(&dir);

    for title in ["first", "second", "third"] {
        db.insert_task(&Task::new(title.to_string())).unwrap();
    }

    let titles: Vec<String> = db
        .get_all_tasks()
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[test]
fn toggling_completion_persists_and_bumps_updated_at() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_temp_db(&dir);

    let id = db.insert_task(&Task::new("Laundry".to_string())).unwrap();
    db.set_task_completed(id, true).unwrap();
    assert!(db.get_task(id).unwrap().completed);

    db.set_task_completed(id, false).unwrap();
    assert!(!db.get_task(id).unwrap().completed);
}

#[test]
fn missing_ids_surface_as_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_temp_db(&dir);

    match db.get_task(99) {
        Err(DatabaseError::NotFound { kind, id }) => {
            assert_eq!(kind, "task");
            assert_eq!(id, 99);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(matches!(
        db.set_task_completed(99, true),
        Err(DatabaseError::NotFound { .. })
    ));
    assert!(matches!(
        db.get_event(42),
        Err(DatabaseError::NotFound { kind: "event", .. })
    ));
}

#[test]
fn deleted_tasks_are_gone() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_temp_db(&dir);

    let id = db.insert_task(&Task::new("Temp".to_string())).unwrap();
    db.delete_task(id).unwrap();
    assert!(matches!(
        db.get_task(id),
        Err(DatabaseError::NotFound { .. })
    ));
    assert!(db.get_all_tasks().unwrap().is_empty());
}

#[test]
fn events_come_back_sorted_by_date_then_time() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_temp_db(&dir);

    let mut late = Event::new(
        "Late".to_string(),
        "2026-09-02".to_string(),
        "09:00".to_string(),
    );
    late.event_type = EventType::Reminder;
    db.insert_event(&late).unwrap();
    db.insert_event(&Event::new(
        "Afternoon".to_string(),
        "2026-09-01".to_string(),
        "14:00".to_string(),
    ))
    .unwrap();
    db.insert_event(&Event::new(
        "Morning".to_string(),
        "2026-09-01".to_string(),
        "09:00".to_string(),
    ))
    .unwrap();

    let titles: Vec<String> = db
        .get_all_events()
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Morning", "Afternoon", "Late"]);
}

#[test]
fn unknown_stored_priority_is_a_corrupt_row() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_temp_db(&dir);

    db.conn()
        .execute(
            "INSERT INTO tasks (title, completed, priority, category, created_at, updated_at)
             VALUES ('bad', 0, 'urgent', 'General', '2026-01-01 00:00:00', '2026-01-01 00:00:00')",
            [],
        )
        .unwrap();

    assert!(matches!(
        db.get_all_tasks(),
        Err(DatabaseError::CorruptRow(_))
    ));
}

#[test]
fn reopening_the_same_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("teva.db");

    let db = Database::new(path.to_str().unwrap()).unwrap();
    let id = db.insert_task(&Task::new("Persist me".to_string())).unwrap();
    drop(db);

    let db = Database::new(path.to_str().unwrap()).unwrap();
    assert_eq!(db.get_task(id).unwrap().title, "Persist me");
}
