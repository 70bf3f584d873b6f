use mediadeck_core::{CacheStats, JobState, JobSupervisor, StartOutcome};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, Padding, Widget},
};

use super::layout::centered_box;
use super::progress::truncate_right;
use super::theme::Theme;

/// Cache tools overlay: rebuild job status and thumbnail statistics
pub struct ToolsView<'a> {
    job: &'a JobSupervisor,
    stats: &'a CacheStats,
    theme: &'a Theme,
}

impl<'a> ToolsView<'a> {
    pub fn new(job: &'a JobSupervisor, stats: &'a CacheStats, theme: &'a Theme) -> Self {
        Self { job, stats, theme }
    }

    fn outcome_style(&self, outcome: &StartOutcome) -> Style {
        let color = match outcome {
            StartOutcome::Pending => self.theme.yellow,
            StartOutcome::Started(_) => self.theme.green,
            StartOutcome::Failed(_) => self.theme.red,
        };
        Style::default().fg(color)
    }

    fn status_style(&self) -> Style {
        let color = match self.job.state() {
            JobState::NotStarted => self.theme.fg_muted,
            JobState::Running => self.theme.yellow,
            JobState::Completed => self.theme.green,
            JobState::Error => self.theme.red,
        };
        Style::default().fg(color)
    }
}

impl Widget for ToolsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let tools_area = centered_box(56, 22, area);
        Clear.render(tools_area, buf);

        let block = Block::default()
            .title(" Werkzeuge ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.purple))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::horizontal(1));

        let inner = block.inner(tools_area);
        block.render(tools_area, buf);
        if inner.height < 4 || inner.width < 20 {
            return;
        }

        let width = inner.width as usize;
        let bottom = inner.y + inner.height;
        let section_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);

        let mut y = inner.y;
        let line = |y: &mut u16, text: &str, style: Style, buf: &mut Buffer| {
            if *y < bottom {
                buf.set_string(inner.x, *y, truncate_right(text, width), style);
                *y += 1;
            }
        };

        line(&mut y, "Cache-Rebuild", section_style, buf);
        if let Some(outcome) = self.job.start_outcome() {
            line(&mut y, &outcome.text(), self.outcome_style(outcome), buf);
        }
        for text in self.job.status_lines() {
            line(&mut y, &text, self.status_style(), buf);
        }

        if self.job.state() != JobState::NotStarted && y < bottom {
            let percent = (self.job.status().ratio() * 100.0).round() as u16;
            Gauge::default()
                .gauge_style(
                    Style::default()
                        .fg(self.theme.green)
                        .bg(self.theme.bg_highlight),
                )
                .percent(percent.min(100))
                .render(Rect::new(inner.x, y, inner.width, 1), buf);
            y += 1;
        }

        y += 1;
        line(&mut y, "Thumbnail-Cache", section_style, buf);
        let stats_style = match self.stats {
            CacheStats::Failed(_) => Style::default().fg(self.theme.red),
            _ => Style::default().fg(self.theme.fg),
        };
        for text in self.stats.lines() {
            line(&mut y, &text, stats_style, buf);
        }

        let key_style = Style::default()
            .fg(self.theme.yellow)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(self.theme.fg_dim);
        let hints = [
            ("s", "Starten"),
            ("x", "Stoppen"),
            ("r", "Aktualisieren"),
            ("Esc", "Schließen"),
        ];
        let hints_y = bottom - 1;
        let mut x = inner.x;
        for (key, desc) in hints {
            buf.set_string(x, hints_y, key, key_style);
            x += key.len() as u16 + 1;
            buf.set_string(x, hints_y, desc, desc_style);
            x += desc.chars().count() as u16 + 2;
        }
    }
}
