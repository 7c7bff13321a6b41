use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Scrollbar, ScrollbarOrientation, ScrollbarState,
    StatefulWidget,
};

use crate::Config;
use crate::models::{Priority, Task};
use crate::tui::widgets::color::{contrast_text_color, parse_color};

fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "!!",
        Priority::Medium => "! ",
        Priority::Low => ". ",
    }
}

/// One task per row: completion mark, priority marker, title, category
/// and due date. Long rows are truncated to the inner width.
fn task_row(task: &Task, max_width: usize) -> String {
    let mark = if task.completed { "\u{2713}" } else { "\u{25cb}" };
    let due = task
        .due_date
        .as_ref()
        .map(|d| format!(" due {d}"))
        .unwrap_or_default();

    let mut row = format!(
        "{} {} {} [{}]{}",
        mark,
        priority_marker(task.priority),
        task.title,
        task.category,
        due
    );
    if row.chars().count() > max_width {
        row = row.chars().take(max_width.saturating_sub(3)).collect();
        row.push_str("...");
    }
    row
}

pub fn render_task_list(
    f: &mut Frame,
    area: Rect,
    tasks: &[Task],
    list_state: &mut ListState,
    config: &Config,
) {
    // 2 for borders, 2 for padding
    let max_width = area.width.saturating_sub(4) as usize;

    let theme = config.get_active_theme();
    let highlight_bg = parse_color(&theme.highlight_bg);
    let highlight_fg = if theme.highlight_fg.is_empty() {
        contrast_text_color(highlight_bg)
    } else {
        parse_color(&theme.highlight_fg)
    };

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| ListItem::new(task_row(task, max_width)))
        .collect();

    // Reserve the rightmost column for the scrollbar.
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let list_area = columns[0];
    let scrollbar_area = columns[1];

    let done = tasks.iter().filter(|t| t.completed).count();
    let title = format!("Tasks ({} done of {})", done, tasks.len());
    let total_items = items.len();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(parse_color(&theme.fg)))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    StatefulWidget::render(list, list_area, f.buffer_mut(), list_state);

    let visible_items = list_area.height.saturating_sub(2) as usize;
    if total_items > visible_items && scrollbar_area.width > 0 && list_area.height > 2 {
        let inner = Rect::new(
            scrollbar_area.x,
            list_area.y + 1,
            scrollbar_area.width,
            list_area.height.saturating_sub(2),
        );
        if inner.height > 0 {
            let selected = list_state.selected().unwrap_or(0);
            let position = if selected < visible_items {
                0
            } else {
                selected.saturating_sub(visible_items - 1)
            };

            let mut scrollbar_state = ScrollbarState::new(total_items)
                .viewport_content_length(visible_items)
                .position(position);
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("\u{2191}"))
                .end_symbol(Some("\u{2193}"))
                .track_symbol(Some("\u{2502}"))
                .thumb_symbol("\u{2588}");
            f.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_show_status_and_metadata() {
        let mut task = Task::new("Write report".to_string());
        task.priority = Priority::High;
        task.due_date = Some("2026-09-01".to_string());
        task.set_category("Work");
        let row = task_row(&task, 80);
        assert_eq!(row, "\u{25cb} !! Write report [Work] due 2026-09-01");

        task.completed = true;
        assert!(task_row(&task, 80).starts_with('\u{2713}'));
    }

    #[test]
    fn long_rows_are_truncated() {
        let task = Task::new("A very long title that cannot possibly fit".to_string());
        let row = task_row(&task, 20);
        assert_eq!(row.chars().count(), 20);
        assert!(row.ends_with("..."));
    }
}
