use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::Config;
use crate::models::Event;
use crate::tui::widgets::color::parse_color;
use crate::utils::friendly_date;

pub fn render_schedule(
    f: &mut Frame,
    area: Rect,
    date: &str,
    events: &[Event],
    selected: usize,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let muted = parse_color(&active_theme.muted);
    let highlight_bg = parse_color(&active_theme.highlight_bg);

    let title = format!(" Planner — {} ", friendly_date(date));

    let items: Vec<ListItem> = events
        .iter()
        .map(|event| {
            let stripe = Span::styled("▍", Style::default().fg(parse_color(&event.color)));
            let mut spans = vec![
                stripe,
                Span::styled(
                    format!("{:<9}", event.time),
                    Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(event.title.clone(), Style::default().fg(fg_color)),
            ];
            if let Some(ref location) = event.location {
                spans.push(Span::styled(
                    format!("  @ {}", location),
                    Style::default().fg(muted),
                ));
            }
            if let Some(ref duration) = event.duration {
                spans.push(Span::styled(
                    format!("  ({})", duration),
                    Style::default().fg(muted),
                ));
            }
            ListItem::new(Line::from(spans))
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
