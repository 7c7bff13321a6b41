use rusqlite::Connection;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{Event, EventType, ModelError, Priority, Task};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
    #[error("Corrupt row: {0}")]
    CorruptRow(#[from] ModelError),
    #[error("No such {kind} with ID {id}")]
    NotFound { kind: &'static str, id: i64 },
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection and initialize the schema
    pub fn new(path: &str) -> Result<Self, DatabaseError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::DirectoryError(e.to_string()))?;
            }
        }

        // Open or create the database
        let conn = Connection::open(&db_path)?;

        let db = Database { conn };
        db.initialize_schema()?;

        Ok(db)
    }

    /// Initialize the database schema (tables and indexes)
    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        // Create tasks table
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL,
                completed       INTEGER DEFAULT 0,
                priority        TEXT DEFAULT 'medium',
                due_date        TEXT,
                category        TEXT NOT NULL DEFAULT 'General',
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            )",
            [],
        )?;

        // Create events table
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS events (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL,
                date            TEXT NOT NULL,
                time            TEXT NOT NULL,
                description     TEXT,
                event_type      TEXT DEFAULT 'meeting',
                created_at      TEXT NOT NULL
            )",
            [],
        )?;

        // Create indexes
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_tasks_due_date ON tasks(due_date)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_tasks_category ON tasks(category)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_events_date ON events(date)",
            [],
        )?;

        Ok(())
    }

    /// Get a reference to the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Insert a task into the database and return its ID
    pub fn insert_task(&self, task: &Task) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO tasks (title, completed, priority, due_date, category, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                task.title,
                if task.completed { 1 } else { 0 },
                task.priority.as_str(),
                task.due_date,
                task.category,
                task.created_at,
                task.updated_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert an event into the database and return its ID
    pub fn insert_event(&self, event: &Event) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO events (title, date, time, description, event_type, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                event.title,
                event.date,
                event.time,
                event.description,
                event.event_type.as_str(),
                event.created_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Helper function to map a row to a Task.
    /// An unrecognized stored priority is surfaced as a CorruptRow error,
    /// never coerced into a default.
    fn row_to_task(row: &rusqlite::Row) -> Result<Task, DatabaseError> {
        let priority_str: String = row.get(3)?;
        Ok(Task {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            completed: row.get::<_, i64>(2)? != 0,
            priority: Priority::parse(&priority_str)?,
            due_date: row.get(4)?,
            category: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    /// Helper function to map a row to an Event
    fn row_to_event(row: &rusqlite::Row) -> Result<Event, DatabaseError> {
        let type_str: String = row.get(5)?;
        Ok(Event {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            date: row.get(2)?,
            time: row.get(3)?,
            description: row.get(4)?,
            event_type: EventType::parse(&type_str)?,
            created_at: row.get(6)?,
        })
    }

    /// Get all tasks ordered by creation (insertion) order.
    /// One result set is one snapshot for the statistics engine.
    pub fn get_all_tasks(&self) -> Result<Vec<Task>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, completed, priority, due_date, category, created_at, updated_at
             FROM tasks ORDER BY id ASC",
        )?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(Self::row_to_task(row)?);
        }
        Ok(tasks)
    }

    /// Get a single task by ID
    pub fn get_task(&self, id: i64) -> Result<Task, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, completed, priority, due_date, category, created_at, updated_at
             FROM tasks WHERE id = ?1",
        )?;
        let mut rows = stmt.query(rusqlite::params![id])?;
        match rows.next()? {
            Some(row) => Self::row_to_task(row),
            None => Err(DatabaseError::NotFound { kind: "task", id }),
        }
    }

    /// Set a task's completed flag (the only mutation tasks support)
    pub fn set_task_completed(&self, id: i64, completed: bool) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE tasks SET completed = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![
                if completed { 1 } else { 0 },
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                id
            ],
        )?;
        tx.commit()?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { kind: "task", id });
        }
        Ok(())
    }

    /// Delete a task by ID
    pub fn delete_task(&self, id: i64) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM tasks WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(())
    }

    /// Get all events ordered by date, then time (both stored zero-padded)
    pub fn get_all_events(&self) -> Result<Vec<Event>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, date, time, description, event_type, created_at
             FROM events ORDER BY date ASC, time ASC",
        )?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(Self::row_to_event(row)?);
        }
        Ok(events)
    }

    /// Get a single event by ID
    pub fn get_event(&self, id: i64) -> Result<Event, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, date, time, description, event_type, created_at
             FROM events WHERE id = ?1",
        )?;
        let mut rows = stmt.query(rusqlite::params![id])?;
        match rows.next()? {
            Some(row) => Self::row_to_event(row),
            None => Err(DatabaseError::NotFound { kind: "event", id }),
        }
    }

    /// Delete an event by ID
    pub fn delete_event(&self, id: i64) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM events WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(())
    }
}
