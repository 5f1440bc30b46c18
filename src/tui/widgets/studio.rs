use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::tui::app::{App, StudioSection};
use crate::tui::widgets::color::parse_color;

fn status_color(status: &str) -> Color {
    match status {
        "Idea" => Color::Gray,
        "Filming" => Color::LightBlue,
        "Editing" => Color::LightYellow,
        "Posted" | "Done" | "Confirmed" => Color::LightGreen,
        "To Edit" => Color::LightRed,
        "Negotiating" => Color::LightMagenta,
        "Pitched" => Color::Yellow,
        _ => Color::Gray,
    }
}

pub fn render_studio(f: &mut Frame, area: Rect, app: &App) {
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let muted = parse_color(&active_theme.muted);
    let highlight_bg = parse_color(&active_theme.highlight_bg);

    let section = app.ui.studio_section;
    let sections = [
        StudioSection::Ideas,
        StudioSection::Editing,
        StudioSection::Brands,
    ];
    let header: String = sections
        .iter()
        .map(|s| {
            if *s == section {
                format!("[{}]", s.title())
            } else {
                format!(" {} ", s.title())
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    let title = format!(" Creator Studio — {} ", header);

    let items: Vec<ListItem> = match section {
        StudioSection::Ideas => app
            .data
            .ideas
            .data()
            .iter()
            .map(|idea| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<12}", idea.status),
                        Style::default().fg(status_color(&idea.status)),
                    ),
                    Span::styled(
                        idea.title.clone(),
                        Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {} · {}", idea.category, idea.platform),
                        Style::default().fg(muted),
                    ),
                ]))
            })
            .collect(),
        StudioSection::Editing => app
            .data
            .editing
            .data()
            .iter()
            .map(|task| {
                let mut spans = vec![
                    Span::styled(
                        format!("{:<12}", task.status),
                        Style::default().fg(status_color(&task.status)),
                    ),
                    Span::styled(
                        task.title.clone(),
                        Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}", task.platform), Style::default().fg(muted)),
                ];
                if let Some(ref deadline) = task.deadline {
                    spans.push(Span::styled(
                        format!("  due {}", deadline),
                        Style::default().fg(Color::LightRed),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect(),
        StudioSection::Brands => app
            .data
            .brand_deals
            .data()
            .iter()
            .map(|deal| {
                let amount = deal.amount.clone().unwrap_or_else(|| "-".to_string());
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<12}", deal.status),
                        Style::default().fg(status_color(&deal.status)),
                    ),
                    Span::styled(
                        deal.name.clone(),
                        Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {} · {}", deal.platform, amount),
                        Style::default().fg(muted),
                    ),
                ]))
            })
            .collect(),
    };

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
        state.select(Some(app.ui.selected_index));
    }
    f.render_stateful_widget(list, area, &mut state);
}
