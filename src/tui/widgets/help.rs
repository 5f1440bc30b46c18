use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::widgets::color::parse_color;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let muted = parse_color(&active_theme.muted);

    let b = &config.key_bindings;
    let entries: Vec<(String, &str)> = vec![
        ("1-5 / Left / Right".to_string(), "Switch tab"),
        (format!("{} / {}", b.list_up, b.list_down), "Move selection"),
        (b.new.clone(), "New item (task, event, idea)"),
        (b.delete.clone(), "Delete selected item"),
        (b.toggle_done.clone(), "Tasks: toggle done · Studio: cycle status"),
        (b.toggle_list.clone(), "Tasks: Today / Master list"),
        (format!("{} / {}", b.prev_day, b.next_day), "Planner: previous / next day"),
        (format!("{} / {}", b.increment, b.decrement), "Glow: habit up / down"),
        (b.focus_timer.clone(), "Glow: start/cancel focus timer"),
        (b.break_timer.clone(), "Glow: start/cancel break"),
        (b.quit.clone(), "Quit"),
        (b.help.clone(), "Toggle this help"),
    ];

    let width = (area.width.saturating_sub(4)).min(60);
    let height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let popup = Rect::new(x, y, width, height);

    let mut lines: Vec<Line> = Vec::new();
    for (keys, action) in entries {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<20}", keys),
                Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(action, Style::default().fg(muted)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Esc to close",
        Style::default().fg(muted),
    )));

    f.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::default().fg(fg_color).bg(bg_color)),
    );
    f.render_widget(paragraph, popup);
}
