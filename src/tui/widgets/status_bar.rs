use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::Config;
use crate::tui::widgets::color::{contrast_text_color, parse_color};

const SEPARATOR: &str = " \u{2022} ";
const ELLIPSIS: &str = "...";

/// One-line footer. Shows a highlighted status message when one is set,
/// otherwise as many key hints as fit in the available width.
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&String>,
    key_hints: &[String],
    config: &Config,
) {
    let theme = config.get_active_theme();
    let fg = parse_color(&theme.fg);
    let bg = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let max_width = area.width as usize;

    let (content, style) = if let Some(msg) = message {
        let msg_fg = contrast_text_color(highlight_bg);
        (
            truncate_with_ellipsis(msg, max_width),
            Style::default()
                .fg(msg_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            fit_hints(key_hints, max_width),
            Style::default().fg(fg).bg(bg),
        )
    };

    f.render_widget(Paragraph::new(content).style(style), area);
}

/// Join hints with bullet separators, dropping trailing hints that do not
/// fit and marking the cut with an ellipsis.
fn fit_hints(hints: &[String], max_width: usize) -> String {
    let mut out = String::new();
    for (i, hint) in hints.iter().enumerate() {
        let added = if i == 0 {
            hint.chars().count()
        } else {
            SEPARATOR.chars().count() + hint.chars().count()
        };
        if out.chars().count() + added > max_width {
            if out.is_empty() {
                return truncate_with_ellipsis(hint, max_width);
            }
            if out.chars().count() + ELLIPSIS.len() <= max_width {
                out.push_str(ELLIPSIS);
            }
            return out;
        }
        if i > 0 {
            out.push_str(SEPARATOR);
        }
        out.push_str(hint);
    }
    out
}

fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let keep = max_width.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_are_joined_until_full() {
        let hints = vec!["q quit".to_string(), "n new".to_string()];
        assert_eq!(fit_hints(&hints, 80), "q quit \u{2022} n new");
    }

    #[test]
    fn overflowing_hints_get_an_ellipsis() {
        let hints = vec!["q quit".to_string(), "n new".to_string(), "d del".to_string()];
        let out = fit_hints(&hints, 18);
        assert!(out.starts_with("q quit"));
        assert!(out.ends_with("..."));
    }

    #[test]
    fn long_messages_truncate() {
        assert_eq!(truncate_with_ellipsis("hello world", 8), "hello...");
        assert_eq!(truncate_with_ellipsis("short", 8), "short");
    }
}
