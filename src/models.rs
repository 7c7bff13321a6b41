use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category applied when a task is created with an empty category field
pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Unknown priority: {0} (expected high, medium or low)")]
    UnknownPriority(String),
    #[error("Unknown event type: {0} (expected meeting, appointment, task or reminder)")]
    UnknownEventType(String),
    #[error("Invalid time: {0} (expected zero-padded 24-hour HH:MM)")]
    InvalidTime(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Fixed display/iteration order used by the priority breakdown
    pub const ORDERED: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ModelError> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ModelError::UnknownPriority(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Meeting,
    Appointment,
    Task,
    Reminder,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Meeting,
        EventType::Appointment,
        EventType::Task,
        EventType::Reminder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Meeting => "meeting",
            EventType::Appointment => "appointment",
            EventType::Task => "task",
            EventType::Reminder => "reminder",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ModelError> {
        match s.trim().to_lowercase().as_str() {
            "meeting" => Ok(EventType::Meeting),
            "appointment" => Ok(EventType::Appointment),
            "task" => Ok(EventType::Task),
            "reminder" => Ok(EventType::Reminder),
            _ => Err(ModelError::UnknownEventType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<i64>,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<String>, // ISO 8601: YYYY-MM-DD
    pub category: String,         // never empty, falls back to DEFAULT_CATEGORY
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Option<i64>,
    pub title: String,
    pub date: String, // YYYY-MM-DD
    pub time: String, // zero-padded HH:MM, compared lexicographically
    pub description: Option<String>,
    pub event_type: EventType,
    pub created_at: String,
}

impl Task {
    pub fn new(title: String) -> Self {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self {
            id: None,
            title,
            completed: false,
            priority: Priority::Medium,
            due_date: None,
            category: DEFAULT_CATEGORY.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Set the category, falling back to the default when blank
    pub fn set_category(&mut self, category: &str) {
        let trimmed = category.trim();
        self.category = if trimmed.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            trimmed.to_string()
        };
    }
}

impl Event {
    pub fn new(title: String, date: String, time: String) -> Self {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self {
            id: None,
            title,
            date,
            time,
            description: None,
            event_type: EventType::Meeting,
            created_at: now,
        }
    }
}

/// Validate a zero-padded 24-hour HH:MM string.
/// Zero-padding is required because event times are sorted lexicographically,
/// and "9:00" would sort after "14:30".
pub fn validate_time(time: &str) -> Result<(), ModelError> {
    let bytes = time.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && [bytes[0], bytes[1], bytes[3], bytes[4]]
            .iter()
            .all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(ModelError::InvalidTime(time.to_string()));
    }
    let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    if hour > 23 || minute > 59 {
        return Err(ModelError::InvalidTime(time.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_parse_roundtrip() {
        for priority in Priority::ORDERED {
            assert_eq!(
                Priority::parse(priority.as_str()).expect("known priority should parse"),
                priority
            );
        }
        assert!(Priority::parse("urgent").is_err());
    }

    #[test]
    fn event_type_parse_roundtrip() {
        for event_type in EventType::ALL {
            assert_eq!(
                EventType::parse(event_type.as_str()).expect("known type should parse"),
                event_type
            );
        }
        assert!(EventType::parse("party").is_err());
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(
            Priority::parse(" High ").expect("padded input should parse"),
            Priority::High
        );
        assert_eq!(
            EventType::parse("REMINDER").expect("uppercase input should parse"),
            EventType::Reminder
        );
    }

    #[test]
    fn new_task_applies_defaults() {
        let task = Task::new("Write report".to_string());
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn blank_category_falls_back_to_default() {
        let mut task = Task::new("Write report".to_string());
        task.set_category("Work");
        assert_eq!(task.category, "Work");
        task.set_category("   ");
        assert_eq!(task.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn validate_time_requires_zero_padding() {
        assert!(validate_time("09:00").is_ok());
        assert!(validate_time("23:59").is_ok());
        assert!(validate_time("9:00").is_err());
        assert!(validate_time("24:00").is_err());
        assert!(validate_time("12:60").is_err());
        assert!(validate_time("12.30").is_err());
    }
}
