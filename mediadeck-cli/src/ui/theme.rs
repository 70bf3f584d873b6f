use ratatui::style::Color;

use mediadeck_core::{NoticeLevel, ServerStatus};

/// Dark theme on the Catppuccin Macchiato palette
pub struct Theme {
    pub bg: Color,
    pub bg_surface: Color,
    /// Rows with a checked checkbox
    pub bg_highlight: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub fg_muted: Color,

    pub blue: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
    pub purple: Color,
    /// Video badge
    pub teal: Color,

    pub border: Color,
    /// Cursor bar
    pub selection_bg: Color,
    pub selection_fg: Color,
}

const BASE: Color = Color::Rgb(36, 39, 58);
const SURFACE0: Color = Color::Rgb(54, 58, 79);
const SURFACE1: Color = Color::Rgb(73, 77, 100);
const SURFACE2: Color = Color::Rgb(91, 96, 120);
const OVERLAY0: Color = Color::Rgb(110, 115, 141);
const SUBTEXT0: Color = Color::Rgb(165, 173, 203);
const TEXT: Color = Color::Rgb(202, 211, 245);
const BLUE: Color = Color::Rgb(138, 173, 244);
const GREEN: Color = Color::Rgb(166, 218, 149);
const YELLOW: Color = Color::Rgb(238, 212, 159);
const RED: Color = Color::Rgb(237, 135, 150);
const MAUVE: Color = Color::Rgb(198, 160, 246);
const TEAL: Color = Color::Rgb(139, 213, 202);

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: BASE,
            bg_surface: SURFACE0,
            bg_highlight: SURFACE1,
            fg: TEXT,
            fg_dim: SUBTEXT0,
            fg_muted: OVERLAY0,
            blue: BLUE,
            green: GREEN,
            yellow: YELLOW,
            red: RED,
            purple: MAUVE,
            teal: TEAL,
            border: SURFACE2,
            selection_bg: BLUE,
            selection_fg: BASE,
        }
    }
}

impl Theme {
    pub fn notice_color(&self, level: NoticeLevel) -> Color {
        match level {
            NoticeLevel::Info => self.blue,
            NoticeLevel::Success => self.green,
            NoticeLevel::Error => self.red,
        }
    }

    pub fn server_color(&self, status: ServerStatus) -> Color {
        match status {
            ServerStatus::Unknown => self.fg_muted,
            ServerStatus::Online => self.green,
            ServerStatus::Offline => self.red,
        }
    }

    /// Checkbox color for checked/unchecked rows
    pub fn check_color(&self, checked: bool) -> Color {
        if checked { self.purple } else { self.fg_muted }
    }
}
