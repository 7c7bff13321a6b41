use crate::database::DatabaseError;
use crate::models::{Event, EventType, Priority, Task, validate_time};
use crate::stats;
use crate::tui::widgets::editor::Editor;
use crate::utils::{current_date, parse_date};
use crate::{Config, Database};
use chrono::{Days, NaiveDate};
use ratatui::widgets::ListState;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Tasks,
    Schedule,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Dashboard, Tab::Tasks, Tab::Schedule];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Tasks => "Tasks",
            Tab::Schedule => "Schedule",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Dashboard => 0,
            Tab::Tasks => 1,
            Tab::Schedule => 2,
        }
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Create,
    Help,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Priority,
    DueDate,
    Category,
}

impl TaskField {
    pub fn next(&self) -> TaskField {
        match self {
            TaskField::Title => TaskField::Priority,
            TaskField::Priority => TaskField::DueDate,
            TaskField::DueDate => TaskField::Category,
            TaskField::Category => TaskField::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Title,
    Date,
    Time,
    Kind,
    Description,
}

impl EventField {
    pub fn next(&self) -> EventField {
        match self {
            EventField::Title => EventField::Date,
            EventField::Date => EventField::Time,
            EventField::Time => EventField::Kind,
            EventField::Kind => EventField::Description,
            EventField::Description => EventField::Title,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    pub current_field: TaskField,
    pub title: Editor,
    pub priority_index: usize, // index into Priority::ORDERED
    pub due_date: Editor,
    pub category: Editor,
}

impl TaskForm {
    pub fn new() -> Self {
        Self {
            current_field: TaskField::Title,
            title: Editor::new(),
            priority_index: Priority::ORDERED
                .iter()
                .position(|&p| p == Priority::Medium)
                .unwrap_or(0),
            due_date: Editor::new(),
            category: Editor::new(),
        }
    }

    pub fn active_editor(&mut self) -> Option<&mut Editor> {
        match self.current_field {
            TaskField::Title => Some(&mut self.title),
            TaskField::DueDate => Some(&mut self.due_date),
            TaskField::Category => Some(&mut self.category),
            TaskField::Priority => None,
        }
    }

    pub fn cycle_priority(&mut self, forward: bool) {
        let len = Priority::ORDERED.len();
        self.priority_index = if forward {
            (self.priority_index + 1) % len
        } else {
            (self.priority_index + len - 1) % len
        };
    }
}

#[derive(Debug, Clone)]
pub struct EventForm {
    pub current_field: EventField,
    pub title: Editor,
    pub date: Editor,
    pub time: Editor,
    pub kind_index: usize, // index into EventType::ALL
    pub description: Editor,
}

impl EventForm {
    /// New event form with the date prefilled from the schedule view.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            current_field: EventField::Title,
            title: Editor::new(),
            date: Editor::from_string(date.format("%Y-%m-%d").to_string()),
            time: Editor::new(),
            kind_index: 0,
            description: Editor::new(),
        }
    }

    pub fn active_editor(&mut self) -> Option<&mut Editor> {
        match self.current_field {
            EventField::Title => Some(&mut self.title),
            EventField::Date => Some(&mut self.date),
            EventField::Time => Some(&mut self.time),
            EventField::Description => Some(&mut self.description),
            EventField::Kind => None,
        }
    }

    pub fn cycle_kind(&mut self, forward: bool) {
        let len = EventType::ALL.len();
        self.kind_index = if forward {
            (self.kind_index + 1) % len
        } else {
            (self.kind_index + len - 1) % len
        };
    }
}

#[derive(Debug, Clone)]
pub enum CreateForm {
    Task(TaskForm),
    Event(EventForm),
}

#[derive(Debug, Clone)]
pub enum DeleteTarget {
    Task(Task),
    Event(Event),
}

pub struct App {
    pub config: Config,
    pub database: Database,

    pub tasks: Vec<Task>,
    pub events: Vec<Event>,

    pub current_tab: Tab,
    pub mode: Mode,
    pub selected_index: usize,
    pub list_state: ListState,
    pub selected_date: NaiveDate,

    pub create_form: Option<CreateForm>,
    pub delete_target: Option<DeleteTarget>,
    pub delete_selection: usize,

    pub status_message: Option<String>,
    status_message_time: Option<Instant>,
}

impl App {
    pub fn new(config: Config, database: Database) -> Result<Self, DatabaseError> {
        let mut app = Self {
            config,
            database,
            tasks: Vec::new(),
            events: Vec::new(),
            current_tab: Tab::Dashboard,
            mode: Mode::View,
            selected_index: 0,
            list_state: ListState::default(),
            selected_date: current_date(),
            create_form: None,
            delete_target: None,
            delete_selection: 0,
            status_message: None,
            status_message_time: None,
        };
        app.load_data()?;
        app.sync_list_state();
        Ok(app)
    }

    pub fn load_data(&mut self) -> Result<(), DatabaseError> {
        self.tasks = self.database.get_all_tasks()?;
        self.events = self.database.get_all_events()?;
        self.clamp_selection();
        Ok(())
    }

    /// Events on the currently selected day, in time order. This is the
    /// list the schedule tab selection indexes into.
    pub fn day_events(&self) -> Vec<Event> {
        stats::events_on_date(&self.events, self.selected_date)
    }

    fn visible_len(&self) -> usize {
        match self.current_tab {
            Tab::Dashboard => 0,
            Tab::Tasks => self.tasks.len(),
            Tab::Schedule => self.day_events().len(),
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        match self.current_tab {
            Tab::Tasks => self.tasks.get(self.selected_index),
            _ => None,
        }
    }

    pub fn selected_event(&self) -> Option<Event> {
        match self.current_tab {
            Tab::Schedule => self.day_events().get(self.selected_index).cloned(),
            _ => None,
        }
    }

    pub fn sync_list_state(&mut self) {
        self.list_state.select(Some(self.selected_index));
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
        self.sync_list_state();
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.sync_list_state();
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index < self.visible_len().saturating_sub(1) {
            self.selected_index += 1;
            self.sync_list_state();
        }
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.selected_index = 0;
        self.clamp_selection();
    }

    pub fn prev_day(&mut self) {
        if let Some(date) = self.selected_date.checked_sub_days(Days::new(1)) {
            self.selected_date = date;
            self.selected_index = 0;
            self.clamp_selection();
        }
    }

    pub fn next_day(&mut self) {
        if let Some(date) = self.selected_date.checked_add_days(Days::new(1)) {
            self.selected_date = date;
            self.selected_index = 0;
            self.clamp_selection();
        }
    }

    pub fn goto_today(&mut self) {
        self.selected_date = current_date();
        self.selected_index = 0;
        self.clamp_selection();
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
        self.status_message_time = None;
    }

    /// Status messages fade out after a few seconds.
    pub fn check_status_message_timeout(&mut self) {
        const TIMEOUT_SECS: u64 = 3;
        if let Some(time) = self.status_message_time
            && time.elapsed().as_secs() >= TIMEOUT_SECS
        {
            self.clear_status_message();
        }
    }

    /// Open the create form matching the current tab. The dashboard has
    /// nothing to create, so `new` is a no-op there.
    pub fn open_create_form(&mut self) {
        let form = match self.current_tab {
            Tab::Tasks => CreateForm::Task(TaskForm::new()),
            Tab::Schedule => CreateForm::Event(EventForm::new(self.selected_date)),
            Tab::Dashboard => return,
        };
        self.create_form = Some(form);
        self.mode = Mode::Create;
    }

    pub fn cancel_create_form(&mut self) {
        self.create_form = None;
        self.mode = Mode::View;
    }

    /// Validate and persist the open create form. On validation failure
    /// the form stays open and the problem is shown in the status bar.
    pub fn submit_create_form(&mut self) -> Result<(), DatabaseError> {
        let Some(form) = self.create_form.clone() else {
            return Ok(());
        };
        match form {
            CreateForm::Task(form) => self.submit_task_form(&form),
            CreateForm::Event(form) => self.submit_event_form(&form),
        }
    }

    fn submit_task_form(&mut self, form: &TaskForm) -> Result<(), DatabaseError> {
        let title = form.title.as_str().trim().to_string();
        if title.is_empty() {
            self.set_status_message("Title cannot be empty".to_string());
            return Ok(());
        }

        let due = form.due_date.as_str().trim();
        let due_date = if due.is_empty() {
            None
        } else {
            if parse_date(due).is_err() {
                self.set_status_message(format!("Invalid due date '{due}', expected YYYY-MM-DD"));
                return Ok(());
            }
            Some(due.to_string())
        };

        let mut task = Task::new(title);
        task.priority = Priority::ORDERED[form.priority_index];
        task.due_date = due_date;
        task.set_category(form.category.as_str());

        self.database.insert_task(&task)?;
        self.load_data()?;
        self.set_status_message(format!("Added task '{}'", task.title));
        self.cancel_create_form();
        Ok(())
    }

    fn submit_event_form(&mut self, form: &EventForm) -> Result<(), DatabaseError> {
        let title = form.title.as_str().trim().to_string();
        if title.is_empty() {
            self.set_status_message("Title cannot be empty".to_string());
            return Ok(());
        }

        let date = form.date.as_str().trim();
        if parse_date(date).is_err() {
            self.set_status_message(format!("Invalid date '{date}', expected YYYY-MM-DD"));
            return Ok(());
        }
        let time = form.time.as_str().trim();
        if validate_time(time).is_err() {
            self.set_status_message(format!("Invalid time '{time}', expected HH:MM"));
            return Ok(());
        }

        let mut event = Event::new(title, date.to_string(), time.to_string());
        event.event_type = EventType::ALL[form.kind_index];
        let description = form.description.as_str().trim();
        if !description.is_empty() {
            event.description = Some(description.to_string());
        }

        self.database.insert_event(&event)?;
        self.load_data()?;
        self.set_status_message(format!("Added event '{}'", event.title));
        self.cancel_create_form();
        Ok(())
    }

    pub fn toggle_selected_task(&mut self) -> Result<(), DatabaseError> {
        let Some(task) = self.selected_task() else {
            return Ok(());
        };
        let Some(id) = task.id else {
            return Ok(());
        };
        let done = !task.completed;
        self.database.set_task_completed(id, done)?;
        self.load_data()?;
        self.set_status_message(if done {
            "Task marked done".to_string()
        } else {
            "Task marked not done".to_string()
        });
        Ok(())
    }

    /// Ask for confirmation before deleting the selected item.
    pub fn request_delete(&mut self) {
        let target = match self.current_tab {
            Tab::Tasks => self.selected_task().cloned().map(DeleteTarget::Task),
            Tab::Schedule => self.selected_event().map(DeleteTarget::Event),
            Tab::Dashboard => None,
        };
        if let Some(target) = target {
            self.delete_target = Some(target);
            self.delete_selection = 0;
            self.mode = Mode::ConfirmDelete;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.delete_target = None;
        self.delete_selection = 0;
        self.mode = Mode::View;
    }

    pub fn confirm_delete(&mut self) -> Result<(), DatabaseError> {
        // selection 0 is Delete, 1 is Cancel
        if self.delete_selection != 0 {
            self.cancel_delete();
            return Ok(());
        }
        if let Some(target) = self.delete_target.take() {
            match target {
                DeleteTarget::Task(task) => {
                    if let Some(id) = task.id {
                        self.database.delete_task(id)?;
                        self.set_status_message(format!("Deleted task '{}'", task.title));
                    }
                }
                DeleteTarget::Event(event) => {
                    if let Some(id) = event.id {
                        self.database.delete_event(id)?;
                        self.set_status_message(format!("Deleted event '{}'", event.title));
                    }
                }
            }
            self.load_data()?;
        }
        self.cancel_delete();
        Ok(())
    }
}
