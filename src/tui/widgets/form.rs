use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Config;
use crate::tui::app::CreateForm;
use crate::tui::widgets::color::parse_color;

pub fn render_form(f: &mut Frame, area: Rect, form: &CreateForm, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let muted = parse_color(&active_theme.muted);
    let accent = parse_color(&active_theme.accent);

    let mut lines: Vec<Line> = Vec::new();
    for (index, field) in form.fields.iter().enumerate() {
        let active = index == form.current;
        let label_style = if active {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(muted)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<26}", field.label), label_style),
            Span::styled(field.input.value().to_string(), Style::default().fg(fg_color)),
        ]));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Enter: next/save · Tab: next field · Esc: cancel",
        Style::default().fg(muted),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", form.title))
            .style(Style::default().fg(fg_color)),
    );
    f.render_widget(paragraph, area);

    // Place the hardware cursor inside the active field
    let field = &form.fields[form.current];
    let x = area.x + 1 + 26 + field.input.cursor() as u16;
    let y = area.y + 1 + (form.current as u16) * 2;
    if x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1) {
        f.set_cursor_position(Position::new(x, y));
    }
}
