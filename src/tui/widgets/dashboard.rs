use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::Config;
use crate::models::Task;
use crate::stats::{completion_summary, stats_by_category, stats_by_priority};
use crate::tui::widgets::color::parse_color;

const BAR_WIDTH: usize = 20;

/// Completion overview: an overall progress gauge on top, category and
/// priority breakdowns side by side below it.
pub fn render_dashboard(f: &mut Frame, area: Rect, tasks: &[Task], config: &Config) {
    let theme = config.get_active_theme();
    let fg = parse_color(&theme.fg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let summary = completion_summary(tasks);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Completion"))
        .gauge_style(Style::default().fg(highlight_bg))
        .ratio((summary.rate / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "{} of {} done ({:.1}%)",
            summary.completed, summary.total, summary.rate
        ));
    f.render_widget(gauge, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let category_lines: Vec<Line> = {
        let stats = stats_by_category(tasks);
        if stats.is_empty() {
            vec![Line::from("No tasks yet")]
        } else {
            stats
                .iter()
                .map(|s| {
                    Line::from(format!(
                        "{:<12} {} {}/{}",
                        s.category,
                        progress_bar(s.rate),
                        s.completed,
                        s.total
                    ))
                })
                .collect()
        }
    };
    let categories = Paragraph::new(category_lines)
        .block(Block::default().borders(Borders::ALL).title("By category"))
        .style(Style::default().fg(fg));
    f.render_widget(categories, columns[0]);

    let priority_lines: Vec<Line> = stats_by_priority(tasks)
        .iter()
        .map(|s| {
            Line::from(format!(
                "{:<8} {} {}/{}",
                s.priority.as_str(),
                progress_bar(s.rate),
                s.completed,
                s.total
            ))
        })
        .collect();
    let priorities = Paragraph::new(priority_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("By priority")
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .style(Style::default().fg(fg));
    f.render_widget(priorities, columns[1]);
}

/// Fixed-width textual bar for a rate in [0, 100].
fn progress_bar(rate: f64) -> String {
    let filled = ((rate / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let mut bar = String::with_capacity(BAR_WIDTH + 2);
    bar.push('[');
    for _ in 0..filled {
        bar.push('\u{2588}');
    }
    for _ in filled..BAR_WIDTH {
        bar.push('\u{2591}');
    }
    bar.push(']');
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_filling_matches_rate() {
        assert_eq!(progress_bar(0.0), format!("[{}]", "\u{2591}".repeat(20)));
        assert_eq!(progress_bar(100.0), format!("[{}]", "\u{2588}".repeat(20)));
        let half = progress_bar(50.0);
        assert_eq!(half.matches('\u{2588}').count(), 10);
    }

    #[test]
    fn bar_clamps_out_of_range_rates() {
        assert_eq!(progress_bar(140.0).matches('\u{2588}').count(), 20);
    }
}
