//! Completion-rate and scheduling statistics over in-memory snapshots.
//!
//! Every function here is pure: no I/O, no mutation of inputs, safe to call
//! from any number of concurrent callers. Callers are responsible for
//! supplying a consistent snapshot (typically one `Database::get_all_*`
//! result set per invocation).

use chrono::{Days, NaiveDate};

use crate::models::{Event, Priority, Task};

/// Default forward-looking window for upcoming events, in days
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u64 = 7;
/// Default maximum number of upcoming events returned
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionSummary {
    pub completed: usize,
    pub total: usize,
    /// Percentage in [0, 100]
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStat {
    pub category: String,
    pub total: usize,
    pub completed: usize,
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityStat {
    pub priority: Priority,
    pub total: usize,
    pub completed: usize,
    pub rate: f64,
}

// Explicit zero guard: an empty set is 0% complete, not NaN.
fn rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}

/// Overall completion rate as a percentage in [0, 100].
/// Returns 0.0 for an empty collection.
pub fn overall_completion_rate(tasks: &[Task]) -> f64 {
    completion_summary(tasks).rate
}

/// Completed/total counts plus rate, as shown in the dashboard header
pub fn completion_summary(tasks: &[Task]) -> CompletionSummary {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    CompletionSummary {
        completed,
        total,
        rate: rate(completed, total),
    }
}

/// Per-category completion breakdown.
///
/// Categories are matched exactly (case-sensitive) and emitted in
/// first-appearance order of the input, never sorted. Only categories with
/// at least one task appear.
pub fn stats_by_category(tasks: &[Task]) -> Vec<CategoryStat> {
    let mut stats: Vec<CategoryStat> = Vec::new();
    for task in tasks {
        let index = match stats.iter().position(|s| s.category == task.category) {
            Some(index) => index,
            None => {
                stats.push(CategoryStat {
                    category: task.category.clone(),
                    total: 0,
                    completed: 0,
                    rate: 0.0,
                });
                stats.len() - 1
            }
        };
        stats[index].total += 1;
        if task.completed {
            stats[index].completed += 1;
        }
    }
    for entry in &mut stats {
        entry.rate = rate(entry.completed, entry.total);
    }
    stats
}

/// Per-priority completion breakdown.
///
/// Unlike the category breakdown, this always emits exactly three entries
/// in the fixed order High, Medium, Low, including empty buckets.
pub fn stats_by_priority(tasks: &[Task]) -> Vec<PriorityStat> {
    Priority::ORDERED
        .iter()
        .map(|&priority| {
            let total = tasks.iter().filter(|t| t.priority == priority).count();
            let completed = tasks
                .iter()
                .filter(|t| t.priority == priority && t.completed)
                .count();
            PriorityStat {
                priority,
                total,
                completed,
                rate: rate(completed, total),
            }
        })
        .collect()
}

/// Events falling on exactly `date`, sorted ascending by time.
///
/// The sort is lexicographic over the zero-padded HH:MM strings and stable,
/// so same-time events keep their input order. Returns an empty vec when
/// nothing matches.
pub fn events_on_date(events: &[Event], date: NaiveDate) -> Vec<Event> {
    let target = date.format("%Y-%m-%d").to_string();
    let mut matches: Vec<Event> = events
        .iter()
        .filter(|event| event.date == target)
        .cloned()
        .collect();
    matches.sort_by(|a, b| a.time.cmp(&b.time));
    matches
}

/// Events within `[reference_date, reference_date + window_days]`, inclusive
/// on both ends, sorted by date then time and truncated to `limit` after
/// sorting.
///
/// Events whose date string does not parse as YYYY-MM-DD are skipped.
pub fn upcoming_events(
    events: &[Event],
    reference_date: NaiveDate,
    window_days: u64,
    limit: usize,
) -> Vec<Event> {
    let window_end = reference_date
        .checked_add_days(Days::new(window_days))
        .unwrap_or(NaiveDate::MAX);

    let mut upcoming: Vec<(NaiveDate, Event)> = events
        .iter()
        .filter_map(|event| {
            let date = NaiveDate::parse_from_str(&event.date, "%Y-%m-%d").ok()?;
            (date >= reference_date && date <= window_end).then(|| (date, event.clone()))
        })
        .collect();

    upcoming.sort_by(|(date_a, a), (date_b, b)| date_a.cmp(date_b).then(a.time.cmp(&b.time)));
    upcoming.truncate(limit);
    upcoming.into_iter().map(|(_, event)| event).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;

    fn task(title: &str, completed: bool, priority: Priority, category: &str) -> Task {
        let mut task = Task::new(title.to_string());
        task.completed = completed;
        task.priority = priority;
        task.set_category(category);
        task
    }

    fn event(title: &str, date: &str, time: &str) -> Event {
        Event::new(title.to_string(), date.to_string(), time.to_string())
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date should parse")
    }

    #[test]
    fn overall_rate_is_zero_for_empty_collection() {
        // Explicit guard, not a NaN fallthrough
        assert_eq!(overall_completion_rate(&[]), 0.0);
    }

    #[test]
    fn overall_rate_two_of_three() {
        let tasks = vec![
            task("a", true, Priority::Medium, "General"),
            task("b", true, Priority::Medium, "General"),
            task("c", false, Priority::Medium, "General"),
        ];
        let summary = completion_summary(&tasks);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.total, 3);
        // 66.67 when rounded for display
        assert!((summary.rate - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!((summary.rate * 100.0).round() / 100.0, 66.67);
    }

    #[test]
    fn overall_rate_bounds() {
        let none_done = vec![
            task("a", false, Priority::Low, "General"),
            task("b", false, Priority::High, "General"),
        ];
        assert_eq!(overall_completion_rate(&none_done), 0.0);

        let all_done = vec![
            task("a", true, Priority::Low, "General"),
            task("b", true, Priority::High, "General"),
        ];
        assert_eq!(overall_completion_rate(&all_done), 100.0);
    }

    #[test]
    fn category_stats_first_appearance_order() {
        let tasks = vec![
            task("a", true, Priority::Medium, "Work"),
            task("b", false, Priority::Medium, "Home"),
            task("c", true, Priority::Medium, "Work"),
            task("d", false, Priority::Medium, "Errands"),
        ];
        let stats = stats_by_category(&tasks);
        let order: Vec<&str> = stats.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(order, vec!["Work", "Home", "Errands"]);
        assert_eq!(stats[0].total, 2);
        assert_eq!(stats[0].completed, 2);
        assert_eq!(stats[0].rate, 100.0);
        assert_eq!(stats[1].rate, 0.0);
    }

    #[test]
    fn category_stats_never_emit_empty_buckets() {
        assert!(stats_by_category(&[]).is_empty());
        let tasks = vec![task("a", false, Priority::Low, "Only")];
        let stats = stats_by_category(&tasks);
        assert_eq!(stats.len(), 1);
        assert!(stats.iter().all(|s| s.total >= 1));
    }

    #[test]
    fn category_stats_are_case_sensitive() {
        let tasks = vec![
            task("a", false, Priority::Low, "work"),
            task("b", false, Priority::Low, "Work"),
        ];
        assert_eq!(stats_by_category(&tasks).len(), 2);
    }

    #[test]
    fn partitions_count_every_task_exactly_once() {
        let tasks = vec![
            task("a", true, Priority::High, "Work"),
            task("b", false, Priority::Medium, "Home"),
            task("c", true, Priority::Low, "Work"),
            task("d", false, Priority::Low, "Errands"),
            task("e", true, Priority::Medium, "Home"),
        ];
        let by_category: usize = stats_by_category(&tasks).iter().map(|s| s.total).sum();
        let by_priority: usize = stats_by_priority(&tasks).iter().map(|s| s.total).sum();
        assert_eq!(by_category, tasks.len());
        assert_eq!(by_priority, tasks.len());
    }

    #[test]
    fn priority_stats_always_three_entries_in_fixed_order() {
        let stats = stats_by_priority(&[]);
        assert_eq!(stats.len(), 3);
        let order: Vec<Priority> = stats.iter().map(|s| s.priority).collect();
        assert_eq!(order, vec![Priority::High, Priority::Medium, Priority::Low]);
        assert!(stats.iter().all(|s| s.total == 0 && s.rate == 0.0));

        let tasks = vec![task("a", true, Priority::Low, "General")];
        let stats = stats_by_priority(&tasks);
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[2].total, 1);
        assert_eq!(stats[2].rate, 100.0);
    }

    #[test]
    fn events_on_date_sorts_by_time() {
        let events = vec![
            event("standup", "2024-06-01", "14:30"),
            event("other day", "2024-06-02", "08:00"),
            event("breakfast", "2024-06-01", "09:00"),
        ];
        let matches = events_on_date(&events, date("2024-06-01"));
        let times: Vec<&str> = matches.iter().map(|e| e.time.as_str()).collect();
        assert_eq!(times, vec!["09:00", "14:30"]);
    }

    #[test]
    fn events_on_date_tie_keeps_input_order() {
        let mut first = event("first", "2024-06-01", "09:00");
        first.event_type = EventType::Reminder;
        let second = event("second", "2024-06-01", "09:00");
        let matches = events_on_date(&[first, second], date("2024-06-01"));
        assert_eq!(matches[0].title, "first");
        assert_eq!(matches[1].title, "second");
    }

    #[test]
    fn events_on_date_empty_when_no_match() {
        let events = vec![event("a", "2024-06-01", "09:00")];
        assert!(events_on_date(&events, date("2024-07-01")).is_empty());
    }

    #[test]
    fn upcoming_window_is_inclusive_and_excludes_beyond() {
        let today = date("2024-06-01");
        let events = vec![
            event("ten days out", "2024-06-11", "09:00"),
            event("three days out", "2024-06-04", "09:00"),
            event("window edge", "2024-06-08", "09:00"),
            event("today", "2024-06-01", "09:00"),
            event("yesterday", "2024-05-31", "09:00"),
        ];
        let upcoming =
            upcoming_events(&events, today, DEFAULT_UPCOMING_WINDOW_DAYS, DEFAULT_UPCOMING_LIMIT);
        let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["today", "three days out", "window edge"]);
    }

    #[test]
    fn upcoming_sorts_date_then_time_and_truncates_after_sorting() {
        let today = date("2024-06-01");
        let events = vec![
            event("d2 late", "2024-06-02", "18:00"),
            event("d3", "2024-06-03", "08:00"),
            event("d1", "2024-06-01", "12:00"),
            event("d2 early", "2024-06-02", "07:00"),
        ];
        let upcoming = upcoming_events(&events, today, 7, 3);
        let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
        // "d3" is dropped by the limit only after the full sort
        assert_eq!(titles, vec!["d1", "d2 early", "d2 late"]);
    }

    #[test]
    fn upcoming_empty_when_nothing_qualifies() {
        let events = vec![event("far", "2030-01-01", "09:00")];
        assert!(upcoming_events(&events, date("2024-06-01"), 7, 5).is_empty());
    }

    #[test]
    fn engine_never_mutates_inputs() {
        let events = vec![
            event("b", "2024-06-02", "10:00"),
            event("a", "2024-06-01", "09:00"),
        ];
        let before: Vec<String> = events.iter().map(|e| e.title.clone()).collect();
        let first = upcoming_events(&events, date("2024-06-01"), 7, 5);
        let second = upcoming_events(&events, date("2024-06-01"), 7, 5);
        let after: Vec<String> = events.iter().map(|e| e.title.clone()).collect();
        assert_eq!(before, after);
        let titles = |v: &[Event]| v.iter().map(|e| e.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(&first), titles(&second));
    }
}
