use mediadeck_core::Notice;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::AppMode;

use super::progress::truncate_right;
use super::theme::Theme;

/// Footer widget showing keyboard hints for the current mode
pub struct Footer<'a> {
    mode: AppMode,
    deleting: bool,
    theme: &'a Theme,
}

impl<'a> Footer<'a> {
    pub fn new(mode: AppMode, theme: &'a Theme) -> Self {
        Self {
            mode,
            deleting: false,
            theme,
        }
    }

    pub fn with_delete_in_progress(mut self, deleting: bool) -> Self {
        self.deleting = deleting;
        self
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let hints: &[(&str, &str)] = match self.mode {
            AppMode::Scanning => &[("q", "Beenden")],
            AppMode::Browsing => &[
                ("↑↓", "Navigieren"),
                ("Enter", "Öffnen"),
                ("Space", "Markieren"),
                ("d", "Löschen"),
                ("t", "Werkzeuge"),
                ("?", "Hilfe"),
                ("q", "Beenden"),
            ],
            AppMode::Help => &[("Esc", "Hilfe schließen"), ("q", "Beenden")],
            AppMode::ConfirmDelete => &[("y", "Ja"), ("n", "Abbrechen")],
            AppMode::Tools => &[
                ("s", "Starten"),
                ("x", "Stoppen"),
                ("r", "Aktualisieren"),
                ("Esc", "Schließen"),
            ],
        };

        let key_style = Style::default()
            .fg(self.theme.fg)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(self.theme.fg_dim);
        let sep_style = Style::default().fg(self.theme.border);

        let mut x = area.x + 1;
        for (i, (key, desc)) in hints.iter().enumerate() {
            buf.set_string(x, area.y, *key, key_style);
            x += key.chars().count() as u16 + 1;

            buf.set_string(x, area.y, *desc, desc_style);
            x += desc.chars().count() as u16;

            if i < hints.len() - 1 {
                buf.set_string(x, area.y, "  │  ", sep_style);
                x += 5;
            }

            if x >= area.x + area.width - 5 {
                break;
            }
        }

        if self.deleting {
            let text = "Löschen läuft...";
            let text_x = (area.x + area.width).saturating_sub(text.chars().count() as u16 + 1);
            if text_x > x + 2 {
                buf.set_string(
                    text_x,
                    area.y,
                    text,
                    Style::default()
                        .fg(self.theme.yellow)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }
    }
}

/// One-line notice from the last user action
pub struct NoticeLine<'a> {
    notice: Option<&'a Notice>,
    theme: &'a Theme,
}

impl<'a> NoticeLine<'a> {
    pub fn new(notice: Option<&'a Notice>, theme: &'a Theme) -> Self {
        Self { notice, theme }
    }
}

impl Widget for NoticeLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(notice) = self.notice else {
            return;
        };
        if area.width < 4 || area.height < 1 {
            return;
        }
        buf.set_string(
            area.x + 1,
            area.y,
            truncate_right(&notice.text, area.width as usize - 2),
            Style::default().fg(self.theme.notice_color(notice.level)),
        );
    }
}
