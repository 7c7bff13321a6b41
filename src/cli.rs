use clap::{Parser, Subcommand};
use log::info;
use thiserror::Error;

use crate::database::{Database, DatabaseError};
use crate::models::{validate_time, Event, EventType, ModelError, Priority, Task};
use crate::stats;
use crate::utils::{current_date, parse_date};

#[derive(Parser)]
#[command(name = "teva")]
#[command(about = "Tasks and events with completion-rate statistics in the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Quickly add a new task
    AddTask {
        /// Task title
        title: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Priority (high, medium, low)
        #[arg(long)]
        priority: Option<String>,
        /// Category label (defaults to General)
        #[arg(long)]
        category: Option<String>,
    },
    /// Quickly add a new event
    AddEvent {
        /// Event title
        title: String,
        /// Event date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Event time (zero-padded 24-hour HH:MM)
        #[arg(long)]
        time: String,
        /// Event kind (meeting, appointment, task, reminder)
        #[arg(long)]
        kind: Option<String>,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },
    /// Toggle a task's completed flag
    ToggleTask {
        /// Task ID
        id: i64,
    },
    /// Remove a task
    RemoveTask {
        /// Task ID
        id: i64,
    },
    /// Remove an event
    RemoveEvent {
        /// Event ID
        id: i64,
    },
    /// Print completion statistics (overall, by category, by priority)
    Stats,
    /// List events on a given day, sorted by time
    Agenda {
        /// Date to list (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List upcoming events within a forward-looking window
    Upcoming {
        /// Window size in days
        #[arg(long)]
        days: Option<u64>,
        /// Maximum number of events
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Dump all tasks and events as JSON to stdout
    Export,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ModelError),
    #[error("Failed to serialize: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Handle the add-task command
pub fn handle_add_task(
    title: String,
    due: Option<String>,
    priority: Option<String>,
    category: Option<String>,
    db: &Database,
) -> Result<(), CliError> {
    // Parse due date if provided
    let due_date = if let Some(due_str) = due {
        parse_date(&due_str).map_err(|e| {
            CliError::DateParseError(format!("Invalid date format '{}': {}", due_str, e))
        })?;
        Some(due_str)
    } else {
        None
    };

    // Start from defaults, then apply overrides
    let mut task = Task::new(title);
    task.due_date = due_date;
    if let Some(priority_str) = priority {
        task.priority = Priority::parse(&priority_str)?;
    }
    if let Some(category_str) = category {
        task.set_category(&category_str);
    }

    // Insert into database
    let id = db.insert_task(&task)?;
    info!("task created id={}", id);
    println!("Task created successfully (ID: {})", id);

    Ok(())
}

/// Handle the add-event command
pub fn handle_add_event(
    title: String,
    date: String,
    time: String,
    kind: Option<String>,
    description: Option<String>,
    db: &Database,
) -> Result<(), CliError> {
    parse_date(&date)
        .map_err(|e| CliError::DateParseError(format!("Invalid date format '{}': {}", date, e)))?;
    validate_time(&time)?;

    let mut event = Event::new(title, date, time);
    if let Some(kind_str) = kind {
        event.event_type = EventType::parse(&kind_str)?;
    }
    event.description = description;

    let id = db.insert_event(&event)?;
    info!("event created id={}", id);
    println!("Event created successfully (ID: {})", id);

    Ok(())
}

/// Handle the toggle-task command
pub fn handle_toggle_task(id: i64, db: &Database) -> Result<(), CliError> {
    let task = db.get_task(id)?;
    let now_completed = !task.completed;
    db.set_task_completed(id, now_completed)?;
    info!("task toggled id={} completed={}", id, now_completed);
    println!(
        "Task {} marked as {}",
        id,
        if now_completed { "done" } else { "pending" }
    );
    Ok(())
}

/// Handle the remove-task command
pub fn handle_remove_task(id: i64, db: &Database) -> Result<(), CliError> {
    // Confirm the task exists so a bad ID gets a clear error
    db.get_task(id)?;
    db.delete_task(id)?;
    info!("task removed id={}", id);
    println!("Task {} removed", id);
    Ok(())
}

/// Handle the remove-event command
pub fn handle_remove_event(id: i64, db: &Database) -> Result<(), CliError> {
    db.get_event(id)?;
    db.delete_event(id)?;
    info!("event removed id={}", id);
    println!("Event {} removed", id);
    Ok(())
}

/// Handle the stats command
pub fn handle_stats(db: &Database) -> Result<(), CliError> {
    let tasks = db.get_all_tasks()?;

    let summary = stats::completion_summary(&tasks);
    println!(
        "Overall: {}/{} completed ({:.1}%)",
        summary.completed, summary.total, summary.rate
    );

    println!("\nBy category:");
    let by_category = stats::stats_by_category(&tasks);
    if by_category.is_empty() {
        println!("  (no tasks)");
    }
    for stat in by_category {
        println!(
            "  {}: {}/{} ({:.1}%)",
            stat.category, stat.completed, stat.total, stat.rate
        );
    }

    println!("\nBy priority:");
    for stat in stats::stats_by_priority(&tasks) {
        println!(
            "  {}: {}/{} ({:.1}%)",
            stat.priority.as_str(),
            stat.completed,
            stat.total,
            stat.rate
        );
    }

    Ok(())
}

/// Handle the agenda command
pub fn handle_agenda(date: Option<String>, db: &Database) -> Result<(), CliError> {
    let target = match date {
        Some(date_str) => parse_date(&date_str).map_err(|e| {
            CliError::DateParseError(format!("Invalid date format '{}': {}", date_str, e))
        })?,
        None => current_date(),
    };

    let events = db.get_all_events()?;
    let matches = stats::events_on_date(&events, target);

    println!("Events on {}:", target.format("%Y-%m-%d"));
    if matches.is_empty() {
        println!("  (none)");
    }
    for event in matches {
        println!(
            "  {} {} [{}] {}",
            event.time,
            event.title,
            event.event_type.as_str(),
            event.description.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

/// Handle the upcoming command
pub fn handle_upcoming(
    days: Option<u64>,
    limit: Option<usize>,
    default_days: u64,
    default_limit: usize,
    db: &Database,
) -> Result<(), CliError> {
    let window_days = days.unwrap_or(default_days);
    let limit = limit.unwrap_or(default_limit);

    let events = db.get_all_events()?;
    let upcoming = stats::upcoming_events(&events, current_date(), window_days, limit);

    println!("Upcoming events (next {} days):", window_days);
    if upcoming.is_empty() {
        println!("  (none)");
    }
    for event in upcoming {
        println!(
            "  {} {} {} [{}]",
            event.date,
            event.time,
            event.title,
            event.event_type.as_str()
        );
    }

    Ok(())
}

/// Handle the export command: JSON dump of the full store
pub fn handle_export(db: &Database) -> Result<(), CliError> {
    let tasks = db.get_all_tasks()?;
    let events = db.get_all_events()?;

    let export = serde_json::json!({
        "tasks": tasks,
        "events": events,
    });
    println!("{}", serde_json::to_string_pretty(&export)?);

    Ok(())
}
