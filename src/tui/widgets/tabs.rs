use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs;

use crate::Config;
use crate::tui::app::Tab;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

pub fn render_tabs(f: &mut Frame, area: Rect, current_tab: Tab, config: &Config) {
    let active_theme = config.get_active_theme();
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let muted = parse_color(&active_theme.muted);

    let titles: Vec<Line> = ["Home", "Tasks", "Planner", "Glow", "Studio"]
        .iter()
        .map(|title| {
            Line::from(vec![
                Span::styled(" ", Style::default()),
                Span::styled(*title, Style::default().fg(muted)),
                Span::styled(" ", Style::default()),
            ])
        })
        .collect();

    let highlight_fg = get_contrast_text_color(highlight_bg);

    let tabs = Tabs::new(titles)
        .select(current_tab.index())
        .style(Style::default().fg(fg_color).bg(bg_color))
        .highlight_style(
            Style::default()
                .fg(highlight_fg)
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" ")
        .padding("", "");

    f.render_widget(tabs, area);
}
