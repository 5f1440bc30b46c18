use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::Config;
use crate::models::Task;
use crate::tui::app::TaskListView;
use crate::tui::widgets::color::parse_color;

fn priority_color(priority: &str) -> Color {
    match priority {
        "high" => Color::LightRed,
        "medium" => Color::LightYellow,
        "low" => Color::LightBlue,
        _ => Color::Gray,
    }
}

pub fn render_task_list(
    f: &mut Frame,
    area: Rect,
    tasks: &[&Task],
    view: TaskListView,
    selected: usize,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let muted = parse_color(&active_theme.muted);
    let highlight_bg = parse_color(&active_theme.highlight_bg);

    let done_count = tasks.iter().filter(|t| t.done).count();
    let title = match view {
        TaskListView::Daily => format!(" To-Do — Today ({}/{} done) ", done_count, tasks.len()),
        TaskListView::Master => format!(" To-Do — Master List ({} tasks) ", tasks.len()),
    };

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let check = if task.done { "[x] " } else { "[ ] " };
            let title_style = if task.done {
                Style::default().fg(muted).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(fg_color).add_modifier(Modifier::BOLD)
            };
            ListItem::new(Line::from(vec![
                Span::styled(check, Style::default().fg(muted)),
                Span::styled(task.title.clone(), title_style),
                Span::styled(format!("  {}", task.category), Style::default().fg(muted)),
                Span::styled(
                    format!("  {}", task.priority),
                    Style::default().fg(priority_color(&task.priority)),
                ),
            ]))
        })
        .collect();

    let empty = items.is_empty();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().fg(fg_color)),
        )
        .highlight_style(Style::default().bg(highlight_bg).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !empty {
        state.select(Some(selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}
