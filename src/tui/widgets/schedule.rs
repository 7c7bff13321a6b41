use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget};

use crate::Config;
use crate::models::Event;
use crate::stats::{events_on_date, upcoming_events};
use crate::tui::widgets::color::{contrast_text_color, parse_color};
use crate::utils::current_date;

fn event_row(event: &Event, max_width: usize) -> String {
    let description = event
        .description
        .as_ref()
        .map(|d| format!(" - {d}"))
        .unwrap_or_default();
    let mut row = format!(
        "{} {} ({}){}",
        event.time,
        event.title,
        event.event_type.as_str(),
        description
    );
    if row.chars().count() > max_width {
        row = row.chars().take(max_width.saturating_sub(3)).collect();
        row.push_str("...");
    }
    row
}

/// Day agenda on the left, upcoming events on the right. The agenda
/// follows the selected date; upcoming is always anchored to today.
pub fn render_schedule(
    f: &mut Frame,
    area: Rect,
    events: &[Event],
    selected_date: NaiveDate,
    list_state: &mut ListState,
    config: &Config,
) {
    let theme = config.get_active_theme();
    let fg = parse_color(&theme.fg);
    let highlight_bg = parse_color(&theme.highlight_bg);
    let highlight_fg = if theme.highlight_fg.is_empty() {
        contrast_text_color(highlight_bg)
    } else {
        parse_color(&theme.highlight_fg)
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let max_width = columns[0].width.saturating_sub(4) as usize;
    let day_events = events_on_date(events, selected_date);
    let items: Vec<ListItem> = if day_events.is_empty() {
        vec![ListItem::new("No events on this day")]
    } else {
        day_events
            .iter()
            .map(|e| ListItem::new(event_row(e, max_width)))
            .collect()
    };

    let today_suffix = if selected_date == current_date() {
        " (today)"
    } else {
        ""
    };
    let agenda = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Agenda {}{}", selected_date, today_suffix)),
        )
        .style(Style::default().fg(fg))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));
    StatefulWidget::render(agenda, columns[0], f.buffer_mut(), list_state);

    let max_width = columns[1].width.saturating_sub(4) as usize;
    let upcoming = upcoming_events(
        events,
        current_date(),
        config.upcoming_window_days,
        config.upcoming_limit,
    );
    let upcoming_items: Vec<ListItem> = if upcoming.is_empty() {
        vec![ListItem::new("Nothing coming up")]
    } else {
        upcoming
            .iter()
            .map(|e| {
                let mut row = format!("{} {}", e.date, event_row(e, max_width));
                if row.chars().count() > max_width {
                    row = row.chars().take(max_width.saturating_sub(3)).collect();
                    row.push_str("...");
                }
                ListItem::new(row)
            })
            .collect()
    };
    let panel = List::new(upcoming_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Next {} days", config.upcoming_window_days)),
        )
        .style(Style::default().fg(fg));
    f.render_widget(panel, columns[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;

    #[test]
    fn rows_include_time_title_and_type() {
        let event = Event::new(
            "Standup".to_string(),
            "2026-09-01".to_string(),
            "09:30".to_string(),
        );
        assert_eq!(event_row(&event, 80), "09:30 Standup (meeting)");
    }

    #[test]
    fn rows_append_description_when_present() {
        let mut event = Event::new(
            "Dentist".to_string(),
            "2026-09-02".to_string(),
            "14:00".to_string(),
        );
        event.event_type = EventType::Appointment;
        event.description = Some("bring insurance card".to_string());
        let row = event_row(&event, 80);
        assert!(row.contains("(appointment)"));
        assert!(row.ends_with("- bring insurance card"));
    }
}
