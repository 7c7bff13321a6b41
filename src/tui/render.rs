use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::tui::app::{App, CreateForm, Mode, Tab};
use crate::tui::layout::Layout;
use crate::tui::widgets::{
    color::parse_color,
    confirm_delete::render_confirm_delete,
    dashboard::render_dashboard,
    form::{render_event_form, render_task_form},
    help::render_help,
    schedule::render_schedule,
    status_bar::render_status_bar,
    tabs::render_tabs,
    task_list::render_task_list,
};
use crate::utils::format_key_binding_for_display as key;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let theme = app.config.get_active_theme();
    let fg = parse_color(&theme.fg);
    let bg = parse_color(&theme.bg);
    let outer = Block::default()
        .borders(Borders::ALL)
        .title("TEVA")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(fg).bg(bg));
    f.render_widget(outer, f.area());

    render_tabs(f, layout.tabs_area, app.current_tab, &app.config);

    match app.mode {
        Mode::Create => {
            match app.create_form.clone() {
                Some(CreateForm::Task(form)) => {
                    render_task_form(f, layout.main_area, &form, &app.config);
                }
                Some(CreateForm::Event(form)) => {
                    render_event_form(f, layout.main_area, &form, &app.config);
                }
                // create mode without a form should not happen
                None => render_main(f, app, layout),
            }
        }
        _ => render_main(f, app, layout),
    }

    // overlays go on top of the normal content
    if app.mode == Mode::Help {
        render_help(f, f.area(), &app.config);
    }
    if let Some(target) = app.delete_target.clone() {
        render_confirm_delete(f, f.area(), &target, app.delete_selection, &app.config);
    }

    let key_hints = get_key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status_message.as_ref(),
        &key_hints,
        &app.config,
    );
}

fn render_main(f: &mut Frame, app: &mut App, layout: &Layout) {
    match app.current_tab {
        Tab::Dashboard => render_dashboard(f, layout.main_area, &app.tasks, &app.config),
        Tab::Tasks => {
            let config = app.config.clone();
            render_task_list(f, layout.main_area, &app.tasks, &mut app.list_state, &config);
        }
        Tab::Schedule => {
            let config = app.config.clone();
            let events = app.events.clone();
            let selected_date = app.selected_date;
            render_schedule(
                f,
                layout.main_area,
                &events,
                selected_date,
                &mut app.list_state,
                &config,
            );
        }
    }
}

fn get_key_hints(app: &App) -> Vec<String> {
    let kb = &app.config.key_bindings;
    match app.mode {
        Mode::Help => vec![format!("Esc or {}: Close help", key(&kb.help))],
        Mode::ConfirmDelete => vec![
            "\u{2191}/\u{2193}: Choose".to_string(),
            "Enter: Confirm".to_string(),
            "Esc: Cancel".to_string(),
        ],
        Mode::Create => vec![
            "Tab: Next field".to_string(),
            format!("{} or Enter: Save", key(&kb.save)),
            "Esc: Cancel".to_string(),
        ],
        Mode::View => {
            let mut hints = vec![format!("{}: Quit", key(&kb.quit))];
            match app.current_tab {
                Tab::Dashboard => {
                    hints.push(format!(
                        "{}/{}: Switch tab",
                        key(&kb.tab_left),
                        key(&kb.tab_right)
                    ));
                }
                Tab::Tasks => {
                    hints.push(format!("{}: New task", key(&kb.new)));
                    hints.push(format!("{}: Toggle done", key(&kb.toggle_task_done)));
                    hints.push(format!("{}: Delete", key(&kb.delete)));
                    hints.push(format!(
                        "{}/{}: Move",
                        key(&kb.list_up),
                        key(&kb.list_down)
                    ));
                }
                Tab::Schedule => {
                    hints.push(format!("{}: New event", key(&kb.new)));
                    hints.push(format!(
                        "{}/{}: Day",
                        key(&kb.prev_day),
                        key(&kb.next_day)
                    ));
                    hints.push(format!("{}: Today", key(&kb.today)));
                    hints.push(format!("{}: Delete", key(&kb.delete)));
                }
            }
            hints.push(format!("{}: Help", key(&kb.help)));
            hints
        }
    }
}
