use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub tabs_area: Rect,
    pub main_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    pub const MIN_WIDTH: u16 = 44;
    pub const MIN_HEIGHT: u16 = 14;

    pub fn calculate(size: Rect) -> Self {
        // Calculate inner area (accounting for outer border: 1 char on each side)
        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        // Split vertically: tabs (1 line), content, status (1 line)
        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tabs
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Status
            ])
            .split(inner_area);

        Self {
            inner_area,
            tabs_area: vertical[0],
            main_area: vertical[1],
            status_area: vertical[2],
        }
    }
}
