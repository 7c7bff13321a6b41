use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs;

use crate::Config;
use crate::tui::app::Tab;
use crate::tui::widgets::color::{contrast_text_color, parse_color};

pub fn render_tabs(f: &mut Frame, area: Rect, current_tab: Tab, config: &Config) {
    let theme = config.get_active_theme();
    let fg = parse_color(&theme.fg);
    let bg = parse_color(&theme.bg);
    let tab_bg = parse_color(&theme.tab_bg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    // Text colors are picked from the backgrounds so themes stay readable
    // no matter how the terminal renders gray.
    let tab_fg = contrast_text_color(tab_bg);
    let highlight_fg = contrast_text_color(highlight_bg);

    let boxed = |label: &str| {
        Line::from(vec![
            Span::styled("  ", Style::default().bg(tab_bg)),
            Span::styled(label.to_string(), Style::default().fg(tab_fg).bg(tab_bg)),
            Span::styled("  ", Style::default().bg(tab_bg)),
        ])
    };

    let titles: Vec<Line> = Tab::ALL.iter().map(|tab| boxed(tab.title())).collect();

    let tabs = Tabs::new(titles)
        .select(current_tab.index())
        .style(Style::default().fg(fg).bg(bg))
        .highlight_style(
            Style::default()
                .fg(highlight_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .divider("  ")
        .padding("", "");

    f.render_widget(tabs, area);
}
