use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::glow;
use crate::tui::app::{App, TimerKind};
use crate::tui::widgets::color::{habit_accent, parse_color};

/// Text progress bar: filled/empty blocks for a clamped fraction.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = String::with_capacity(width);
    for i in 0..width {
        bar.push(if i < filled { '█' } else { '░' });
    }
    bar
}

fn format_countdown(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn render_glow(f: &mut Frame, area: Rect, app: &App) {
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let muted = parse_color(&active_theme.muted);
    let accent = parse_color(&active_theme.accent);
    let highlight_bg = parse_color(&active_theme.highlight_bg);

    let rows = app.data.habits.data();
    let score = app.glow_score_today();

    let mut lines: Vec<Line> = Vec::new();

    // Focus timer block
    let (countdown, caption) = match app.timer {
        Some(timer) => {
            let label = match timer.kind {
                TimerKind::Focus => "focusing",
                TimerKind::Break => "on a break",
            };
            (format_countdown(timer.remaining().as_secs()), label)
        }
        None => ("25:00".to_string(), "idle"),
    };
    lines.push(Line::from(vec![
        Span::styled("Deep Focus  ", Style::default().fg(fg_color).add_modifier(Modifier::BOLD)),
        Span::styled(countdown, Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  ({})", caption), Style::default().fg(muted)),
        Span::styled(
            format!("  ·  {} min focused today", app.focus_minutes_today()),
            Style::default().fg(muted),
        ),
    ]));
    lines.push(Line::from(""));

    // Glow score
    lines.push(Line::from(vec![
        Span::styled("Glow Score  ", Style::default().fg(fg_color).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("{}", score),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" / 100", Style::default().fg(muted)),
    ]));
    lines.push(Line::from(""));

    // One card per tracked habit
    for (index, def) in glow::HABIT_DEFS.iter().enumerate() {
        let value = glow::value_for(rows, def.key);
        let target = rows
            .iter()
            .find(|h| h.habit_key == def.key)
            .map(|h| h.target)
            .unwrap_or(def.target);
        let fraction = glow::progress(value, target);
        let complete = glow::is_complete(value, target);
        let color = habit_accent(def.key);

        let selected = index == app.ui.selected_index;
        let marker = if selected { "> " } else { "  " };
        let name_style = if selected {
            Style::default().bg(highlight_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(fg_color).add_modifier(Modifier::BOLD)
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(accent)),
            Span::styled(format!("{:<16}", def.name), name_style),
            Span::styled(progress_bar(fraction, 20), Style::default().fg(color)),
            Span::styled(
                format!("  {}/{} {}", value, target, def.unit),
                Style::default().fg(muted),
            ),
            Span::styled(
                if complete { "  done" } else { "" },
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Glow Tracker ")
            .style(Style::default().fg(fg_color)),
    );
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_full_at_one_and_empty_at_zero() {
        assert_eq!(progress_bar(1.0, 4), "████");
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(0.5, 4), "██░░");
    }

    #[test]
    fn bar_clamps_out_of_range_fractions() {
        assert_eq!(progress_bar(3.0, 4), "████");
        assert_eq!(progress_bar(-1.0, 4), "░░░░");
    }

    #[test]
    fn countdown_formats_as_minutes_seconds() {
        assert_eq!(format_countdown(1500), "25:00");
        assert_eq!(format_countdown(61), "01:01");
        assert_eq!(format_countdown(0), "00:00");
    }
}
