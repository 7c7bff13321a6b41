use chrono::NaiveDate;
use teva_tui::database::Database;
use teva_tui::models::{Event, EventType, Priority, Task};
use teva_tui::stats;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seed_task(db: &Database, title: &str, priority: Priority, category: &str, done: bool) {
    let mut task = Task::new(title.to_string());
    task.priority = priority;
    task.set_category(category);
    let id = db.insert_task(&task).unwrap();
    if done {
        db.set_task_completed(id, true).unwrap();
    }
}

fn seed_event(db: &Database, title: &str, date: &str, time: &str, kind: EventType) {
    let mut event = Event::new(title.to_string(), date.to_string(), time.to_string());
    event.event_type = kind;
    db.insert_event(&event).unwrap();
}

#[test]
fn stored_tasks_feed_the_completion_stats() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(dir.path().join("teva.db").to_str().unwrap()).unwrap();

    seed_task(&db, "Report", Priority::High, "Work", true);
    seed_task(&db, "Review", Priority::High, "Work", false);
    seed_task(&db, "Groceries", Priority::Low, "Home", true);

    let tasks = db.get_all_tasks().unwrap();
    let summary = stats::completion_summary(&tasks);
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.total, 3);
    assert!((summary.rate - 2.0 / 3.0 * 100.0).abs() < 1e-9);

    // categories in first-appearance order, only categories that occur
    let by_category = stats::stats_by_category(&tasks);
    let names: Vec<&str> = by_category.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(names, vec!["Work", "Home"]);
    assert_eq!(by_category[0].completed, 1);
    assert_eq!(by_category[0].total, 2);
    assert_eq!(by_category[1].rate, 100.0);

    // priorities always have three fixed entries
    let by_priority = stats::stats_by_priority(&tasks);
    let priorities: Vec<Priority> = by_priority.iter().map(|s| s.priority).collect();
    assert_eq!(
        priorities,
        vec![Priority::High, Priority::Medium, Priority::Low]
    );
    assert_eq!(by_priority[1].total, 0);
    assert_eq!(by_priority[1].rate, 0.0);
}

#[test]
fn stored_events_feed_the_day_agenda() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(dir.path().join("teva.db").to_str().unwrap()).unwrap();

    seed_event(&db, "Standup", "2026-09-01", "09:30", EventType::Meeting);
    seed_event(&db, "Early run", "2026-09-01", "06:00", EventType::Reminder);
    seed_event(&db, "Next day", "2026-09-02", "08:00", EventType::Task);

    let events = db.get_all_events().unwrap();
    let agenda = stats::events_on_date(&events, date(2026, 9, 1));
    let titles: Vec<&str> = agenda.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Early run", "Standup"]);

    assert!(stats::events_on_date(&events, date(2026, 9, 3)).is_empty());
}

#[test]
fn stored_events_feed_the_upcoming_window() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(dir.path().join("teva.db").to_str().unwrap()).unwrap();

    seed_event(&db, "Today", "2026-09-01", "10:00", EventType::Meeting);
    seed_event(&db, "Window edge", "2026-09-08", "09:00", EventType::Appointment);
    seed_event(&db, "Past window", "2026-09-09", "09:00", EventType::Meeting);
    seed_event(&db, "Yesterday", "2026-08-31", "09:00", EventType::Meeting);

    let events = db.get_all_events().unwrap();
    let upcoming = stats::upcoming_events(
        &events,
        date(2026, 9, 1),
        stats::DEFAULT_UPCOMING_WINDOW_DAYS,
        stats::DEFAULT_UPCOMING_LIMIT,
    );
    let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Today", "Window edge"]);
}
