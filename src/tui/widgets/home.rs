use chrono::Datelike;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::App;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::habits::progress_bar;
use crate::utils::{current_date_string, friendly_date};
use crate::{glow, tui::widgets::color::habit_accent};

const QUOTES: [&str; 4] = [
    "Today is a new opportunity to grow, glow and achieve your goals.",
    "Discipline is the bridge between goals and accomplishment.",
    "Invest in yourself. You can afford it.",
    "Make yourself a priority today.",
];

/// Quote of the day, rotated by day of month so it changes daily.
fn quote_of_the_day() -> &'static str {
    let day = chrono::Local::now().day() as usize;
    QUOTES[day % QUOTES.len()]
}

pub fn render_home(f: &mut Frame, area: Rect, app: &App) {
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let muted = parse_color(&active_theme.muted);
    let accent = parse_color(&active_theme.accent);

    let today = current_date_string();
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(
            friendly_date(&today).to_uppercase(),
            Style::default().fg(muted).add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "Good morning 🌸",
        Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!("\"{}\"", quote_of_the_day()),
        Style::default().fg(accent).add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::from(""));

    // Daily glow summary
    let rows = app.data.habits.data();
    lines.push(Line::from(vec![
        Span::styled("Daily Glow  ", Style::default().fg(fg_color).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("{}", app.glow_score_today()),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" / 100", Style::default().fg(muted)),
    ]));
    for key in ["water", "sleep", "steps"] {
        if let Some(def) = glow::habit_def(key) {
            let value = glow::value_for(rows, key);
            let target = rows
                .iter()
                .find(|h| h.habit_key == key)
                .map(|h| h.target)
                .unwrap_or(def.target);
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", def.name), Style::default().fg(muted)),
                Span::styled(progress_bar(glow::progress(value, target), 12), Style::default().fg(habit_accent(key))),
                Span::styled(format!(" {}/{}", value, target), Style::default().fg(muted)),
            ]));
        }
    }
    lines.push(Line::from(""));

    // Up next: first three of today's events
    lines.push(Line::from(Span::styled(
        "Up Next",
        Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
    )));
    let events = app.data.today_events.data();
    if events.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Nothing scheduled today",
            Style::default().fg(muted),
        )));
    }
    for event in events.iter().take(3) {
        let mut spans = vec![
            Span::styled("  ▍", Style::default().fg(parse_color(&event.color))),
            Span::styled(format!("{:<9}", event.time), Style::default().fg(fg_color)),
            Span::styled(event.title.clone(), Style::default().fg(fg_color)),
        ];
        if let Some(ref location) = event.location {
            spans.push(Span::styled(
                format!("  @ {}", location),
                Style::default().fg(muted),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));

    // Top priorities: first three open daily tasks
    lines.push(Line::from(Span::styled(
        "Top Priorities",
        Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
    )));
    let open_tasks: Vec<_> = app
        .data
        .daily_tasks
        .data()
        .iter()
        .filter(|t| !t.done)
        .take(3)
        .collect();
    if open_tasks.is_empty() {
        lines.push(Line::from(Span::styled(
            "  All clear — nothing open today",
            Style::default().fg(muted),
        )));
    }
    for task in open_tasks {
        lines.push(Line::from(vec![
            Span::styled("  ○ ", Style::default().fg(accent)),
            Span::styled(task.title.clone(), Style::default().fg(fg_color)),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Home ")
            .style(Style::default().fg(fg_color)),
    );
    f.render_widget(paragraph, area);
}
