use mediadeck_core::ScanProgress;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Padding, Widget},
};

use super::theme::Theme;

/// Braille spinner characters
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn spinner(frame: usize) -> char {
    SPINNER[frame % SPINNER.len()]
}

/// Progress widget shown while the media root is scanned
pub struct ProgressView<'a> {
    progress: &'a ScanProgress,
    spinner_frame: usize,
    theme: &'a Theme,
}

impl<'a> ProgressView<'a> {
    pub fn new(progress: &'a ScanProgress, spinner_frame: usize, theme: &'a Theme) -> Self {
        Self {
            progress,
            spinner_frame,
            theme,
        }
    }
}

impl Widget for ProgressView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width < 20 {
            return;
        }

        let spinner_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);
        buf.set_string(
            inner.x,
            inner.y,
            spinner(self.spinner_frame).to_string(),
            spinner_style,
        );
        buf.set_string(
            inner.x + 2,
            inner.y,
            "Medien werden gesucht...",
            Style::default().fg(self.theme.fg),
        );

        if let Some(path) = &self.progress.current_path {
            let path_str = path.to_string_lossy();
            buf.set_string(
                inner.x,
                inner.y + 1,
                truncate_left(&path_str, inner.width.saturating_sub(2) as usize),
                Style::default().fg(self.theme.fg_dim),
            );
        }

        let stats = format!(
            "{} Dateien  {} Ordner  {} Fehler",
            self.progress.media_files, self.progress.dirs_scanned, self.progress.errors,
        );
        buf.set_string(
            inner.x,
            inner.y + 2,
            &stats,
            Style::default().fg(self.theme.fg_muted),
        );
    }
}

/// Keep the end of a string that is too long, prefixed with `...`
pub fn truncate_left(text: &str, max_len: usize) -> String {
    let count = text.chars().count();
    if count <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let tail: String = text.chars().skip(count - keep).collect();
    format!("...{}", tail)
}

/// Keep the start of a string that is too long, suffixed with `…`
pub fn truncate_right(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let head: String = text.chars().take(max_len.saturating_sub(1)).collect();
    format!("{}…", head)
}
