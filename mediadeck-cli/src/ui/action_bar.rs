use mediadeck_core::SelectionCounts;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::theme::Theme;

/// Bulk action bar: selection counter and the keys that act on it
pub struct ActionBar<'a> {
    counts: SelectionCounts,
    theme: &'a Theme,
}

impl<'a> ActionBar<'a> {
    pub fn new(counts: SelectionCounts, theme: &'a Theme) -> Self {
        Self { counts, theme }
    }
}

impl Widget for ActionBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 20 {
            return;
        }

        buf.set_style(area, Style::default().bg(self.theme.bg_surface));

        let counter = self.counts.label_lines().join(" · ");
        let counter_style = Style::default()
            .fg(if self.counts.is_empty() {
                self.theme.fg_dim
            } else {
                self.theme.purple
            })
            .bg(self.theme.bg_surface)
            .add_modifier(Modifier::BOLD);
        buf.set_string(area.x + 1, area.y, &counter, counter_style);

        let hints = "a Alle  n Keine  i Umkehren  d Löschen";
        let hints_width = hints.chars().count() as u16;
        let counter_end = area.x + 1 + counter.chars().count() as u16;
        let hints_x = (area.x + area.width).saturating_sub(hints_width + 1);
        if hints_x > counter_end + 2 {
            buf.set_string(
                hints_x,
                area.y,
                hints,
                Style::default()
                    .fg(self.theme.fg_muted)
                    .bg(self.theme.bg_surface),
            );
        }
    }
}
