use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use super::layout::centered_box;
use super::theme::Theme;

const KEY_COLUMN: u16 = 12;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("↑ k", "Nach oben"),
            ("↓ j", "Nach unten"),
            ("PgUp/PgDn", "Seite hoch/runter"),
            ("Home g", "Zum Anfang"),
            ("End G", "Zum Ende"),
        ],
    ),
    (
        "Ordner",
        &[
            ("→ l", "Ordner öffnen"),
            ("← h", "Ordner schließen"),
            ("Enter Tab", "Öffnen/Schließen"),
        ],
    ),
    (
        "Auswahl",
        &[
            ("Space", "Markieren"),
            ("a", "Alle auswählen"),
            ("n", "Auswahl aufheben"),
            ("i", "Auswahl umkehren"),
            ("d Del", "Ausgewählte löschen"),
        ],
    ),
    (
        "Sonstiges",
        &[
            ("t", "Werkzeuge (Cache)"),
            ("?", "Diese Hilfe"),
            ("q Ctrl+C", "Beenden"),
        ],
    ),
];

/// Key reference overlay
pub struct HelpView<'a> {
    theme: &'a Theme,
}

impl<'a> HelpView<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_area = centered_box(48, 26, area);
        Clear.render(help_area, buf);

        let block = Block::default()
            .title(" Hilfe ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.blue))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));
        let inner = block.inner(help_area);
        block.render(help_area, buf);

        let heading = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default()
            .fg(self.theme.yellow)
            .add_modifier(Modifier::BOLD);
        let text = Style::default().fg(self.theme.fg);

        let bottom = inner.y + inner.height;
        let mut y = inner.y;
        for (title, keys) in SECTIONS {
            if y >= bottom {
                break;
            }
            buf.set_string(inner.x, y, *title, heading);
            y += 1;
            for (key, desc) in keys.iter() {
                if y >= bottom {
                    return;
                }
                buf.set_string(inner.x, y, *key, key_style);
                buf.set_string(inner.x + KEY_COLUMN, y, *desc, text);
                y += 1;
            }
            y += 1;
        }
    }
}
