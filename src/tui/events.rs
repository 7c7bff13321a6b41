use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use std::io;

use crate::tui::app::{App, CreateForm, Mode, Tab};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::widgets::confirm_delete::DELETE_OPTIONS;
use crate::utils::{ParsedKeyBinding, has_primary_modifier, parse_key_binding};

/// Restores the terminal even when the event loop panics. A terminal
/// left in raw mode or the alternate screen is unusable for the user.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Explicit restore on normal exit. Drop becomes a no-op afterwards.
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check the size before entering the alternate screen so the error
    // message lands in the normal terminal.
    let (width, height) = terminal_size().map_err(TuiError::IoError)?;
    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal too small: {}x{}, need at least {}x{}. Please resize the window.",
            width, height, min_width, min_height
        )));
    }

    let mut guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.check_status_message_timeout();

        let size = terminal.size()?;
        let terminal_rect = Rect::new(0, 0, size.width, size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(terminal_rect);
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        if event::poll(std::time::Duration::from_millis(16))? {
            match event::read()? {
                // Press only, Windows also reports Release
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if handle_key_event(&mut app, key_event)? {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    // next draw picks up the new size
                }
                _ => {}
            }
        }
    }

    guard.restore()?;
    Ok(())
}

fn binding(raw: &str) -> Result<ParsedKeyBinding, TuiError> {
    parse_key_binding(raw).map_err(TuiError::KeyBindingError)
}

fn matches_key_event(key_event: KeyEvent, binding: &ParsedKeyBinding) -> bool {
    // Ctrl on Windows/Linux, Option on macOS
    if binding.requires_ctrl != has_primary_modifier(key_event.modifiers) {
        return false;
    }
    binding.key_code == key_event.code
}

/// Returns true when the app should quit.
fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match app.mode {
        Mode::Help => handle_help_mode(app, key_event),
        Mode::ConfirmDelete => handle_confirm_delete_mode(app, key_event),
        Mode::Create => handle_create_mode(app, key_event),
        Mode::View => handle_view_mode(app, key_event),
    }
}

fn handle_help_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let help = binding(&app.config.key_bindings.help)?;
    if key_event.code == KeyCode::Esc || matches_key_event(key_event, &help) {
        app.mode = Mode::View;
    }
    Ok(false)
}

fn handle_confirm_delete_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let select = binding(&app.config.key_bindings.select)?;
    if matches_key_event(key_event, &select) {
        if let Err(e) = app.confirm_delete() {
            app.set_status_message(format!("Delete failed: {}", e));
            app.cancel_delete();
        }
        return Ok(false);
    }
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.delete_selection = if app.delete_selection == 0 {
                DELETE_OPTIONS.len() - 1
            } else {
                app.delete_selection - 1
            };
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.delete_selection = (app.delete_selection + 1) % DELETE_OPTIONS.len();
        }
        KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
    Ok(false)
}

fn handle_create_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let save = binding(&app.config.key_bindings.save)?;

    if key_event.code == KeyCode::Esc {
        app.cancel_create_form();
        return Ok(false);
    }
    if matches_key_event(key_event, &save) || key_event.code == KeyCode::Enter {
        if let Err(e) = app.submit_create_form() {
            app.set_status_message(format!("Save failed: {}", e));
        }
        return Ok(false);
    }

    let Some(form) = app.create_form.as_mut() else {
        return Ok(false);
    };

    match key_event.code {
        KeyCode::Tab => match form {
            CreateForm::Task(f) => f.current_field = f.current_field.next(),
            CreateForm::Event(f) => f.current_field = f.current_field.next(),
        },
        KeyCode::Left | KeyCode::Right => {
            let forward = key_event.code == KeyCode::Right;
            match form {
                CreateForm::Task(f) => {
                    if let Some(editor) = f.active_editor() {
                        if forward {
                            editor.move_cursor_right();
                        } else {
                            editor.move_cursor_left();
                        }
                    } else {
                        f.cycle_priority(forward);
                    }
                }
                CreateForm::Event(f) => {
                    if let Some(editor) = f.active_editor() {
                        if forward {
                            editor.move_cursor_right();
                        } else {
                            editor.move_cursor_left();
                        }
                    } else {
                        f.cycle_kind(forward);
                    }
                }
            }
        }
        KeyCode::Home | KeyCode::End => {
            let editor = match form {
                CreateForm::Task(f) => f.active_editor(),
                CreateForm::Event(f) => f.active_editor(),
            };
            if let Some(editor) = editor {
                if key_event.code == KeyCode::Home {
                    editor.move_cursor_home();
                } else {
                    editor.move_cursor_end();
                }
            }
        }
        KeyCode::Backspace => {
            let editor = match form {
                CreateForm::Task(f) => f.active_editor(),
                CreateForm::Event(f) => f.active_editor(),
            };
            if let Some(editor) = editor {
                editor.delete_char();
            }
        }
        KeyCode::Char(ch) if !has_primary_modifier(key_event.modifiers) => {
            let editor = match form {
                CreateForm::Task(f) => f.active_editor(),
                CreateForm::Event(f) => f.active_editor(),
            };
            if let Some(editor) = editor {
                editor.insert_char(ch);
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_view_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let kb = app.config.key_bindings.clone();

    if matches_key_event(key_event, &binding(&kb.quit)?) {
        return Ok(true);
    }
    if matches_key_event(key_event, &binding(&kb.help)?) {
        app.mode = Mode::Help;
        return Ok(false);
    }

    // tab switching
    if matches_key_event(key_event, &binding(&kb.tab_left)?) {
        app.switch_tab(app.current_tab.prev());
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.tab_right)?) {
        app.switch_tab(app.current_tab.next());
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.tab_1)?) {
        app.switch_tab(Tab::Dashboard);
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.tab_2)?) {
        app.switch_tab(Tab::Tasks);
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.tab_3)?) {
        app.switch_tab(Tab::Schedule);
        return Ok(false);
    }

    if matches_key_event(key_event, &binding(&kb.list_up)?) {
        app.move_selection_up();
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.list_down)?) {
        app.move_selection_down();
        return Ok(false);
    }

    if matches_key_event(key_event, &binding(&kb.new)?) {
        app.open_create_form();
        return Ok(false);
    }
    if matches_key_event(key_event, &binding(&kb.delete)?) {
        app.request_delete();
        return Ok(false);
    }

    if app.current_tab == Tab::Tasks
        && matches_key_event(key_event, &binding(&kb.toggle_task_done)?)
    {
        if let Err(e) = app.toggle_selected_task() {
            app.set_status_message(format!("Update failed: {}", e));
        }
        return Ok(false);
    }

    if app.current_tab == Tab::Schedule {
        if matches_key_event(key_event, &binding(&kb.prev_day)?) {
            app.prev_day();
            return Ok(false);
        }
        if matches_key_event(key_event, &binding(&kb.next_day)?) {
            app.next_day();
            return Ok(false);
        }
        if matches_key_event(key_event, &binding(&kb.today)?) {
            app.goto_today();
            return Ok(false);
        }
    }

    Ok(false)
}
