use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::time::Duration;

use crate::tui::app::{App, Mode, Tab};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::render::render;
use crate::utils::{has_primary_modifier, parse_key_binding};

/// Guard that ensures terminal state is restored even on panic. If the
/// terminal is left in raw mode or the alternate screen, the user's shell
/// is unusable afterwards.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manually restore terminal state (called on normal exit)
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
        // Ignore errors in drop - we're already in a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

/// True when the key event matches a configured binding string.
fn binding_matches(binding: &str, key: &KeyEvent) -> bool {
    match parse_key_binding(binding) {
        Ok(parsed) => {
            parsed.key_code == key.code
                && parsed.requires_ctrl == has_primary_modifier(key.modifiers)
        }
        Err(_) => false,
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering the alternate screen so the error
    // message lands in the normal terminal.
    let (width, height) = terminal_size().map_err(TuiError::IoError)?;

    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width, min_height
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    while !app.should_quit {
        app.tick();

        terminal.draw(|f| {
            let layout = Layout::calculate(f.area());
            render(f, &mut app, &layout);
        })?;

        // Short poll timeout keeps the focus countdown moving
        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key);
                }
            }
        }
    }

    guard.restore()?;
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    match app.ui.mode {
        Mode::Help => handle_help_key(app, key),
        Mode::Create => handle_form_key(app, key),
        Mode::ConfirmDelete => handle_confirm_delete_key(app, key),
        Mode::View => handle_view_key(app, key),
    }
}

fn handle_help_key(app: &mut App, key: KeyEvent) {
    let bindings = app.config.key_bindings.clone();
    if key.code == KeyCode::Esc
        || binding_matches(&bindings.help, &key)
        || binding_matches(&bindings.quit, &key)
    {
        app.ui.mode = Mode::View;
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.form.as_mut() {
                form.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.form.as_mut() {
                form.prev_field();
            }
        }
        KeyCode::Enter => {
            // Enter walks the fields and submits from the last one
            let submit = app.form.as_ref().is_some_and(|f| f.on_last_field());
            if submit {
                app.submit_form();
            } else if let Some(form) = app.form.as_mut() {
                form.next_field();
            }
        }
        _ => {
            if let Some(form) = app.form.as_mut() {
                form.current_input().handle_key(&key);
            }
        }
    }
}

fn handle_confirm_delete_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('n') => app.cancel_delete(),
        KeyCode::Char('y') => app.confirm_delete(),
        KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
            app.delete_selection = 1 - app.delete_selection;
        }
        KeyCode::Enter => {
            if app.delete_selection == 0 {
                app.confirm_delete();
            } else {
                app.cancel_delete();
            }
        }
        _ => {}
    }
}

fn handle_view_key(app: &mut App, key: KeyEvent) {
    let bindings = app.config.key_bindings.clone();

    // Global keys
    if binding_matches(&bindings.quit, &key) {
        app.should_quit = true;
        return;
    }
    if binding_matches(&bindings.help, &key) {
        app.ui.mode = Mode::Help;
        return;
    }
    if binding_matches(&bindings.tab_left, &key) {
        app.switch_tab(app.ui.current_tab.prev());
        return;
    }
    if binding_matches(&bindings.tab_right, &key) {
        app.switch_tab(app.ui.current_tab.next());
        return;
    }
    match key.code {
        KeyCode::Char('1') => return app.switch_tab(Tab::Home),
        KeyCode::Char('2') => return app.switch_tab(Tab::Tasks),
        KeyCode::Char('3') => return app.switch_tab(Tab::Planner),
        KeyCode::Char('4') => return app.switch_tab(Tab::Glow),
        KeyCode::Char('5') => return app.switch_tab(Tab::Studio),
        _ => {}
    }

    if binding_matches(&bindings.list_down, &key) || key.code == KeyCode::Down {
        app.select_next();
        return;
    }
    if binding_matches(&bindings.list_up, &key) || key.code == KeyCode::Up {
        app.select_prev();
        return;
    }
    if binding_matches(&bindings.new, &key) {
        app.open_form();
        return;
    }
    if binding_matches(&bindings.delete, &key) {
        app.request_delete();
        return;
    }

    // Tab-specific keys
    match app.ui.current_tab {
        Tab::Tasks => {
            if binding_matches(&bindings.toggle_done, &key) {
                app.toggle_selected_task();
            } else if binding_matches(&bindings.toggle_list, &key) {
                app.toggle_task_view();
            }
        }
        Tab::Planner => {
            if binding_matches(&bindings.prev_day, &key) {
                app.shift_planner_date(-1);
            } else if binding_matches(&bindings.next_day, &key) {
                app.shift_planner_date(1);
            }
        }
        Tab::Glow => {
            if binding_matches(&bindings.increment, &key) {
                app.bump_selected_habit(1);
            } else if binding_matches(&bindings.decrement, &key) {
                app.bump_selected_habit(-1);
            } else if binding_matches(&bindings.focus_timer, &key) {
                app.toggle_focus_timer();
            } else if binding_matches(&bindings.break_timer, &key) {
                app.toggle_break_timer();
            }
        }
        Tab::Studio => {
            if binding_matches(&bindings.cycle_section, &key) {
                app.cycle_studio_section();
            } else if binding_matches(&bindings.toggle_done, &key)
                || binding_matches(&bindings.select, &key)
            {
                app.cycle_selected_status();
            }
        }
        Tab::Home => {}
    }
}
