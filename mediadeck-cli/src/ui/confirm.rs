use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use super::layout::centered_box;
use super::theme::Theme;

/// Bulk delete confirmation dialog
pub struct ConfirmDeleteView<'a> {
    prompt: &'a str,
    theme: &'a Theme,
}

impl<'a> ConfirmDeleteView<'a> {
    pub fn new(prompt: &'a str, theme: &'a Theme) -> Self {
        Self { prompt, theme }
    }
}

impl Widget for ConfirmDeleteView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = centered_box(44, 7, area);
        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" Löschen? ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.red))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);
        if inner.height < 2 {
            return;
        }

        let text_style = Style::default().fg(self.theme.fg);
        let prompt_style = Style::default()
            .fg(self.theme.yellow)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default()
            .fg(self.theme.green)
            .add_modifier(Modifier::BOLD);

        buf.set_string(inner.x, inner.y, self.prompt, prompt_style);

        let hints_y = inner.y + inner.height.saturating_sub(1);
        buf.set_string(inner.x, hints_y, "[y]", key_style);
        buf.set_string(inner.x + 4, hints_y, "Ja, löschen", text_style);
        buf.set_string(inner.x + 18, hints_y, "[n]", key_style);
        buf.set_string(inner.x + 22, hints_y, "Abbrechen", text_style);
    }
}
