use mediadeck_core::{Accordion, FolderEntry, FolderTree, MediaItem};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::app::Row;

use super::progress::truncate_right;
use super::theme::Theme;

const ITEM_INDENT: &str = "      ";
const VIDEO_BADGE: &str = " VIDEO ";

/// Folder cards with the items of the open folder inlined below it
pub struct FolderListView<'a> {
    tree: &'a FolderTree,
    accordion: &'a Accordion,
    rows: &'a [Row],
    selected_index: usize,
    scroll_offset: usize,
    theme: &'a Theme,
}

impl<'a> FolderListView<'a> {
    pub fn new(
        tree: &'a FolderTree,
        accordion: &'a Accordion,
        rows: &'a [Row],
        selected_index: usize,
        scroll_offset: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            tree,
            accordion,
            rows,
            selected_index,
            scroll_offset,
            theme,
        }
    }

    fn row_style(&self, is_cursor: bool, checked: bool) -> Style {
        if is_cursor {
            Style::default()
                .bg(self.theme.selection_bg)
                .fg(self.theme.selection_fg)
        } else if checked {
            Style::default()
                .bg(self.theme.bg_highlight)
                .fg(self.theme.fg)
        } else {
            Style::default().bg(self.theme.bg).fg(self.theme.fg)
        }
    }

    /// Foreground for decorations, flattened onto the cursor bar
    fn accent(&self, base: Style, is_cursor: bool, color: Color) -> Style {
        if is_cursor { base } else { base.fg(color) }
    }

    fn render_folder(
        &self,
        folder: &FolderEntry,
        is_cursor: bool,
        area: Rect,
        y: u16,
        buf: &mut Buffer,
    ) {
        let row_style = self.row_style(is_cursor, folder.selected);
        let expanded = self.accordion.is_expanded(folder.id);
        let mut x = area.x + 1;

        let marker = if expanded { "▼ " } else { "▶ " };
        buf.set_string(x, y, marker, self.accent(row_style, is_cursor, self.theme.border));
        x += 2;

        let checkbox = if folder.selected { "[x] " } else { "[ ] " };
        buf.set_string(
            x,
            y,
            checkbox,
            self.accent(row_style, is_cursor, self.theme.check_color(folder.selected)),
        );
        x += 4;

        let icon = if expanded { "📂" } else { "📁" };
        buf.set_string(x, y, icon, self.accent(row_style, is_cursor, self.theme.yellow));
        x += 3;

        let count = format!("{} Dateien", folder.file_count());
        let count_width = count.chars().count() as u16;
        let count_x = (area.x + area.width).saturating_sub(count_width + 1);
        buf.set_string(
            count_x,
            y,
            &count,
            self.accent(row_style, is_cursor, self.theme.fg_dim),
        );

        let max_name_len = count_x.saturating_sub(x + 1) as usize;
        let name_style = if expanded {
            row_style.add_modifier(Modifier::BOLD)
        } else {
            row_style
        };
        buf.set_string(x, y, truncate_right(&folder.path, max_name_len), name_style);
    }

    fn render_item(
        &self,
        item: &MediaItem,
        is_cursor: bool,
        area: Rect,
        y: u16,
        buf: &mut Buffer,
    ) {
        let row_style = self.row_style(is_cursor, item.selected);
        let mut x = area.x + 1;

        buf.set_string(x, y, ITEM_INDENT, row_style);
        x += ITEM_INDENT.len() as u16;

        let checkbox = if item.selected { "[x] " } else { "[ ] " };
        buf.set_string(
            x,
            y,
            checkbox,
            self.accent(row_style, is_cursor, self.theme.check_color(item.selected)),
        );
        x += 4;

        let mut right = area.x + area.width;
        if item.is_video {
            right = right.saturating_sub(VIDEO_BADGE.len() as u16 + 1);
            buf.set_string(
                right,
                y,
                VIDEO_BADGE,
                Style::default()
                    .bg(self.theme.teal)
                    .fg(self.theme.bg)
                    .add_modifier(Modifier::BOLD),
            );
        }

        let max_name_len = right.saturating_sub(x + 1) as usize;
        buf.set_string(
            x,
            y,
            truncate_right(&item.name, max_name_len),
            self.accent(row_style, is_cursor, self.theme.fg_dim),
        );
    }
}

impl Widget for FolderListView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 30 {
            return;
        }

        if self.rows.is_empty() {
            buf.set_string(
                area.x + 2,
                area.y + (area.height - 1).min(1),
                "Keine Medien gefunden.",
                Style::default().fg(self.theme.fg_muted),
            );
            return;
        }

        for (i, row) in self
            .rows
            .iter()
            .skip(self.scroll_offset)
            .take(area.height as usize)
            .enumerate()
        {
            let y = area.y + i as u16;
            let is_cursor = i + self.scroll_offset == self.selected_index;

            let Some(folder) = self.tree.get(row.folder()) else {
                continue;
            };

            // Clear the row
            let checked = match row {
                Row::Folder(_) => folder.selected,
                Row::Item(_, index) => folder
                    .items()
                    .get(*index)
                    .is_some_and(|item| item.selected),
            };
            let row_style = self.row_style(is_cursor, checked);
            for x in 0..area.width {
                buf.set_string(area.x + x, y, " ", row_style);
            }

            match row {
                Row::Folder(_) => self.render_folder(folder, is_cursor, area, y, buf),
                Row::Item(_, index) => {
                    if let Some(item) = folder.items().get(*index) {
                        self.render_item(item, is_cursor, area, y, buf);
                    }
                }
            }
        }
    }
}
