use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::AppState;

use super::progress::{spinner, truncate_left};
use super::theme::Theme;

/// Header widget showing title, media root and server status
pub struct Header<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let title = "MEDIADECK";
        let title_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);
        buf.set_string(area.x + 1, area.y, title, title_style);
        buf.set_string(
            area.x + 11,
            area.y,
            "─",
            Style::default().fg(self.theme.border),
        );

        // Status (right-aligned)
        let (status, status_style) = match &self.state.session {
            None => (
                format!(
                    "{} {} Dateien",
                    spinner(self.state.spinner_frame),
                    self.state.progress.media_files
                ),
                Style::default().fg(self.theme.yellow),
            ),
            Some(session) => {
                let server = session.server_status();
                (
                    format!(
                        "{} Ordner, {} Dateien  ● {}",
                        session.tree().len(),
                        session.tree().total_files(),
                        server.label()
                    ),
                    Style::default().fg(self.theme.server_color(server)),
                )
            }
        };
        let status_width = status.chars().count() as u16;
        let status_x = (area.x + area.width).saturating_sub(status_width + 2);
        buf.set_string(status_x, area.y, &status, status_style);

        // Root path fills whatever is left in between
        let path_x = area.x + 13;
        let max_path_len = status_x.saturating_sub(path_x + 2) as usize;
        let path = self.state.root_path.to_string_lossy();
        buf.set_string(
            path_x,
            area.y,
            truncate_left(&path, max_path_len),
            Style::default().fg(self.theme.fg),
        );
    }
}
