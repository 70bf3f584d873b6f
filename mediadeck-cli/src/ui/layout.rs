use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main application layout
pub struct AppLayout {
    pub header: Rect,
    pub action_bar: Rect,
    pub list: Rect,
    pub status: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, action_bar_visible: bool) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(if action_bar_visible { 1 } else { 0 }),
                Constraint::Min(5),    // Folder list
                Constraint::Length(1), // Notice line
                Constraint::Length(1), // Footer
            ])
            .split(area);

        Self {
            header: chunks[0],
            action_bar: chunks[1],
            list: chunks[2],
            status: chunks[3],
            footer: chunks[4],
        }
    }
}

/// Centered dialog rectangle clamped to the available area
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
