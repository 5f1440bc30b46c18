use ratatui::Frame;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::tui::app::{App, Mode, Tab};
use crate::tui::layout::Layout;
use crate::tui::widgets::{
    color::parse_color,
    confirm_delete::render_confirm_delete,
    form::render_form,
    habits::render_glow,
    help::render_help,
    home::render_home,
    schedule::render_schedule,
    status_bar::render_status_bar,
    studio::render_studio,
    tabs::render_tabs,
    task_list::render_task_list,
};

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    // Outer border with the app name centered in the top edge
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title(" glowplan ")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    render_tabs(f, layout.tabs_area, app.ui.current_tab, &app.config);

    // Main pane: the create form replaces the tab content while open
    if app.ui.mode == Mode::Create {
        if let Some(ref form) = app.form {
            render_form(f, layout.main_area, form, &app.config);
        }
    } else {
        match app.ui.current_tab {
            Tab::Home => render_home(f, layout.main_area, app),
            Tab::Tasks => {
                let tasks = app.visible_tasks();
                render_task_list(
                    f,
                    layout.main_area,
                    &tasks,
                    app.ui.task_view,
                    app.ui.selected_index,
                    &app.config,
                );
            }
            Tab::Planner => render_schedule(
                f,
                layout.main_area,
                &app.ui.planner_date,
                app.data.events.data(),
                app.ui.selected_index,
                &app.config,
            ),
            Tab::Glow => render_glow(f, layout.main_area, app),
            Tab::Studio => render_studio(f, layout.main_area, app),
        }
    }

    // Overlays render after normal content
    if app.ui.mode == Mode::Help {
        render_help(f, f.area(), &app.config);
    }

    if app.ui.mode == Mode::ConfirmDelete {
        if let Some((ref label, _)) = app.pending_delete {
            let label = label.clone();
            render_confirm_delete(f, f.area(), &label, app.delete_selection, &app.config);
        }
    }

    let key_hints = get_key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_ref(),
        &key_hints,
        &app.config,
    );
}

fn get_key_hints(app: &App) -> Vec<String> {
    let b = &app.config.key_bindings;
    match app.ui.mode {
        Mode::Help => vec![format!("Esc or {}: Close help", b.help)],
        Mode::Create => vec![
            "Enter: Next/Save".to_string(),
            "Tab: Next field".to_string(),
            "Esc: Cancel".to_string(),
        ],
        Mode::ConfirmDelete => vec![
            "Enter: Apply".to_string(),
            "Left/Right: Choose".to_string(),
            "Esc: Cancel".to_string(),
        ],
        Mode::View => {
            let mut hints = vec![
                format!("{}: Quit", b.quit),
                "1-5: Tabs".to_string(),
            ];
            match app.ui.current_tab {
                Tab::Home => {}
                Tab::Tasks => {
                    hints.push(format!("{}: New", b.new));
                    hints.push(format!("{}: Done", b.toggle_done));
                    hints.push(format!("{}: Today/Master", b.toggle_list));
                    hints.push(format!("{}: Delete", b.delete));
                }
                Tab::Planner => {
                    hints.push(format!("{}: New", b.new));
                    hints.push(format!("{}/{}: Day", b.prev_day, b.next_day));
                    hints.push(format!("{}: Delete", b.delete));
                }
                Tab::Glow => {
                    hints.push(format!("{}/{}: Habit", b.increment, b.decrement));
                    hints.push(format!("{}: Focus", b.focus_timer));
                    hints.push(format!("{}: Break", b.break_timer));
                }
                Tab::Studio => {
                    hints.push(format!("{}: Section", b.cycle_section));
                    hints.push(format!("{}: Status", b.toggle_done));
                    hints.push(format!("{}: New idea", b.new));
                    hints.push(format!("{}: Delete", b.delete));
                }
            }
            hints.push(format!("{}: Help", b.help));
            hints
        }
    }
}
