use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::Config;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::popup_area;
use crate::utils::format_key_binding_for_display as key;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let theme = config.get_active_theme();
    let fg = parse_color(&theme.fg);
    let bg = parse_color(&theme.bg);

    let popup = popup_area(area, 60, 70);
    // clear whatever is underneath so the popup is opaque
    f.render_widget(Clear, popup);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg).bg(bg)),
        )
        .style(Style::default().fg(fg).bg(bg))
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup);
}

fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Navigation:\n");
    text.push_str(&format!(
        "  {} / {}: Switch tabs\n",
        key(&kb.tab_left),
        key(&kb.tab_right)
    ));
    text.push_str(&format!(
        "  {} / {} / {}: Jump to Dashboard / Tasks / Schedule\n",
        key(&kb.tab_1),
        key(&kb.tab_2),
        key(&kb.tab_3)
    ));
    text.push_str(&format!(
        "  {} / {}: Move selection up/down\n",
        key(&kb.list_up),
        key(&kb.list_down)
    ));
    text.push('\n');

    text.push_str("Tasks:\n");
    text.push_str(&format!("  {}: New task\n", key(&kb.new)));
    text.push_str(&format!(
        "  {}: Toggle done\n",
        key(&kb.toggle_task_done)
    ));
    text.push_str(&format!("  {}: Delete selected task\n", key(&kb.delete)));
    text.push('\n');

    text.push_str("Schedule:\n");
    text.push_str(&format!("  {}: New event\n", key(&kb.new)));
    text.push_str(&format!(
        "  {} / {}: Previous / next day\n",
        key(&kb.prev_day),
        key(&kb.next_day)
    ));
    text.push_str(&format!("  {}: Jump to today\n", key(&kb.today)));
    text.push_str(&format!("  {}: Delete selected event\n", key(&kb.delete)));
    text.push('\n');

    text.push_str("Forms:\n");
    text.push_str("  Tab: Next field\n");
    text.push_str(&format!("  {}: Save\n", key(&kb.save)));
    text.push_str("  Esc: Cancel\n");
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Toggle this help\n", key(&kb.help)));
    text.push_str(&format!("  {}: Quit\n", key(&kb.quit)));

    text
}
