use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

pub fn render_confirm_delete(
    f: &mut Frame,
    area: Rect,
    label: &str,
    selection: usize,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    // Centered popup
    let width = (area.width.saturating_sub(4)).min(46);
    let height = 6;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let popup = Rect::new(x, y, width, height);

    let selected = Style::default()
        .fg(highlight_fg)
        .bg(highlight_bg)
        .add_modifier(Modifier::BOLD);
    let unselected = Style::default().fg(fg_color);

    let mut title = label.to_string();
    let max_title = width.saturating_sub(14) as usize;
    if title.chars().count() > max_title {
        title = title.chars().take(max_title.saturating_sub(3)).collect::<String>() + "...";
    }

    let lines = vec![
        Line::from(Span::styled(
            format!("Delete \"{}\"?", title),
            Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " Delete ",
                if selection == 0 { selected } else { unselected },
            ),
            Span::raw("   "),
            Span::styled(
                " Cancel ",
                if selection == 1 { selected } else { unselected },
            ),
        ]),
    ];

    f.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm ")
                .style(Style::default().fg(fg_color).bg(bg_color)),
        );
    f.render_widget(paragraph, popup);
}
