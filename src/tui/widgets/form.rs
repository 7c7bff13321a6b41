use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Config;
use crate::models::{EventType, Priority};
use crate::tui::app::{EventField, EventForm, TaskField, TaskForm};
use crate::tui::widgets::color::{contrast_text_color, parse_color};
use crate::tui::widgets::editor::Editor;

struct FieldStyles {
    active: Style,
    inactive: Style,
}

fn field_styles(config: &Config) -> FieldStyles {
    let theme = config.get_active_theme();
    let highlight_bg = parse_color(&theme.highlight_bg);
    let highlight_fg = if theme.highlight_fg.is_empty() {
        contrast_text_color(highlight_bg)
    } else {
        parse_color(&theme.highlight_fg)
    };
    FieldStyles {
        active: Style::default().bg(highlight_bg).fg(highlight_fg),
        inactive: Style::default()
            .fg(parse_color(&theme.fg))
            .add_modifier(Modifier::DIM),
    }
}

fn render_text_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    editor: &Editor,
    active: bool,
    styles: &FieldStyles,
) {
    let style = if active { styles.active } else { styles.inactive };
    let paragraph = Paragraph::new(editor.as_str().to_string())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(paragraph, area);

    if active {
        // place the terminal cursor inside the field, clamped to its width
        let cursor_x = area.x + 1 + (editor.cursor() as u16).min(area.width.saturating_sub(3));
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn render_choice_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    active: bool,
    styles: &FieldStyles,
) {
    let style = if active { styles.active } else { styles.inactive };
    let paragraph = Paragraph::new(format!("\u{2039} {value} \u{203a}"))
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(paragraph, area);
}

/// New-task form: title, cycled priority, due date and category fields.
pub fn render_task_form(f: &mut Frame, area: Rect, form: &TaskForm, config: &Config) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let styles = field_styles(config);

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    render_text_field(
        f,
        fields[0],
        "Title",
        &form.title,
        form.current_field == TaskField::Title,
        &styles,
    );
    render_choice_field(
        f,
        fields[1],
        "Priority (\u{2190}/\u{2192} to change)",
        Priority::ORDERED[form.priority_index].as_str(),
        form.current_field == TaskField::Priority,
        &styles,
    );
    render_text_field(
        f,
        fields[2],
        "Due Date (YYYY-MM-DD, optional)",
        &form.due_date,
        form.current_field == TaskField::DueDate,
        &styles,
    );
    render_text_field(
        f,
        fields[3],
        "Category (blank for General)",
        &form.category,
        form.current_field == TaskField::Category,
        &styles,
    );
}

/// New-event form: title, date, time, cycled type and description fields.
pub fn render_event_form(f: &mut Frame, area: Rect, form: &EventForm, config: &Config) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let styles = field_styles(config);

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    render_text_field(
        f,
        fields[0],
        "Title",
        &form.title,
        form.current_field == EventField::Title,
        &styles,
    );
    render_text_field(
        f,
        fields[1],
        "Date (YYYY-MM-DD)",
        &form.date,
        form.current_field == EventField::Date,
        &styles,
    );
    render_text_field(
        f,
        fields[2],
        "Time (HH:MM)",
        &form.time,
        form.current_field == EventField::Time,
        &styles,
    );
    render_choice_field(
        f,
        fields[3],
        "Type (\u{2190}/\u{2192} to change)",
        EventType::ALL[form.kind_index].as_str(),
        form.current_field == EventField::Kind,
        &styles,
    );
    render_text_field(
        f,
        fields[4],
        "Description (optional)",
        &form.description,
        form.current_field == EventField::Description,
        &styles,
    );
}
