use std::path::PathBuf;

use mediadeck_core::{AccordionChange, DeleteRequest, FolderId, ScanProgress, Session};

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Scanning the media root
    Scanning,
    /// Browsing folders
    Browsing,
    /// Showing help overlay
    Help,
    /// Showing delete confirmation dialog
    ConfirmDelete,
    /// Showing cache tools overlay
    Tools,
}

/// One line of the folder list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Folder(FolderId),
    /// Item index inside an expanded folder
    Item(FolderId, usize),
}

impl Row {
    pub fn folder(self) -> FolderId {
        match self {
            Row::Folder(id) | Row::Item(id, _) => id,
        }
    }
}

/// Application state
pub struct AppState {
    /// Current mode
    pub mode: AppMode,
    /// Media root being browsed
    pub root_path: PathBuf,
    /// Folder model and server connection (None while scanning)
    pub session: Option<Session>,
    /// Current scan progress
    pub progress: ScanProgress,
    /// Cursor position in the row list
    pub selected_index: usize,
    /// Scroll offset for the folder list
    pub scroll_offset: usize,
    /// Visible area height (set by UI)
    pub visible_height: usize,
    /// Whether app should quit
    pub should_quit: bool,
    /// Spinner frame for animation
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            mode: AppMode::Scanning,
            root_path,
            session: None,
            progress: ScanProgress::default(),
            selected_index: 0,
            scroll_offset: 0,
            visible_height: 20,
            should_quit: false,
            spinner_frame: 0,
        }
    }

    /// Start browsing once the scan is done
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
        self.mode = AppMode::Browsing;
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// Update scan progress
    pub fn update_progress(&mut self, progress: ScanProgress) {
        self.progress = progress;
    }

    /// Advance spinner animation
    pub fn tick_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 10;
    }

    /// Apply finished network calls
    pub fn pump(&mut self) {
        let applied = self.session.as_mut().map_or(0, Session::pump);
        if applied > 0 {
            self.clamp_cursor();
            if self.mode == AppMode::ConfirmDelete
                && self.session.as_ref().and_then(Session::delete_prompt).is_none()
            {
                self.mode = AppMode::Browsing;
            }
        }
    }

    /// Rows in display order: every folder, followed by the items of the open one
    pub fn rows(&self) -> Vec<Row> {
        let Some(session) = &self.session else {
            return Vec::new();
        };
        let accordion = session.accordion();
        let mut rows = Vec::with_capacity(session.tree().len());
        for folder in session.tree().iter() {
            rows.push(Row::Folder(folder.id));
            if accordion.is_expanded(folder.id) {
                rows.extend((0..folder.items().len()).map(|i| Row::Item(folder.id, i)));
            }
        }
        rows
    }

    /// Row under the cursor
    pub fn selected_row(&self) -> Option<Row> {
        self.rows().get(self.selected_index).copied()
    }

    /// Ensure the given index is visible within the scroll viewport
    fn ensure_visible_for(selected: &mut usize, scroll: &mut usize, visible_height: usize) {
        if *selected < *scroll {
            *scroll = *selected;
        } else if *selected >= *scroll + visible_height {
            *scroll = *selected - visible_height + 1;
        }
    }

    fn ensure_visible(&mut self) {
        Self::ensure_visible_for(
            &mut self.selected_index,
            &mut self.scroll_offset,
            self.visible_height.max(1),
        );
    }

    fn clamp_cursor(&mut self) {
        let count = self.rows().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
        if self.scroll_offset > self.selected_index {
            self.scroll_offset = self.selected_index;
        }
        self.ensure_visible();
    }

    /// Put a folder's row at the top of the viewport
    fn scroll_to_folder(&mut self, id: FolderId) {
        if let Some(index) = self.rows().iter().position(|r| *r == Row::Folder(id)) {
            self.selected_index = index;
            self.scroll_offset = index;
        }
    }

    /// Move cursor up
    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
        self.ensure_visible();
    }

    /// Move cursor down
    pub fn move_down(&mut self) {
        let count = self.rows().len();
        if self.selected_index < count.saturating_sub(1) {
            self.selected_index += 1;
        }
        self.ensure_visible();
    }

    /// Move cursor up by a page
    pub fn page_up(&mut self) {
        let page_size = self.visible_height.saturating_sub(2);
        self.selected_index = self.selected_index.saturating_sub(page_size);
        self.ensure_visible();
    }

    /// Move cursor down by a page
    pub fn page_down(&mut self) {
        let count = self.rows().len();
        let page_size = self.visible_height.saturating_sub(2);
        self.selected_index = (self.selected_index + page_size).min(count.saturating_sub(1));
        self.ensure_visible();
    }

    /// Go to first row
    pub fn go_to_first(&mut self) {
        self.selected_index = 0;
        self.ensure_visible();
    }

    /// Go to last row
    pub fn go_to_last(&mut self) {
        self.selected_index = self.rows().len().saturating_sub(1);
        self.ensure_visible();
    }

    /// Expand or collapse the folder under the cursor
    pub fn toggle_expand(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        match row {
            Row::Folder(id) => {
                let change = self.session.as_mut().and_then(|s| s.toggle_folder(id));
                match change {
                    Some(AccordionChange::Opened(_)) => self.scroll_to_folder(id),
                    Some(AccordionChange::Closed(_)) => self.clamp_cursor(),
                    None => {}
                }
            }
            Row::Item(..) => self.collapse_selected(),
        }
    }

    /// Expand the folder under the cursor
    pub fn expand_selected(&mut self) {
        if let Some(Row::Folder(id)) = self.selected_row()
            && let Some(session) = &mut self.session
            && session.expand_folder(id).is_some()
        {
            self.scroll_to_folder(id);
        }
    }

    /// Collapse the folder under the cursor, or the folder owning the item
    pub fn collapse_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let id = row.folder();
        if let Some(session) = &mut self.session
            && session.collapse_folder(id)
        {
            if let Some(index) = self.rows().iter().position(|r| *r == Row::Folder(id)) {
                self.selected_index = index;
            }
            self.clamp_cursor();
        }
    }

    /// Toggle the checkbox under the cursor
    pub fn toggle_check(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let Some(session) = &mut self.session else {
            return;
        };
        match row {
            Row::Folder(id) => session.toggle_folder_selected(id),
            Row::Item(id, index) => session.toggle_item_selected(id, index),
        }
    }

    pub fn select_all(&mut self) {
        if let Some(session) = &mut self.session {
            session.select_all();
        }
    }

    pub fn select_none(&mut self) {
        if let Some(session) = &mut self.session {
            session.select_none();
        }
    }

    pub fn invert_selection(&mut self) {
        if let Some(session) = &mut self.session {
            session.invert_selection();
        }
    }

    /// Request delete - shows confirmation dialog when something is checked
    pub fn request_delete(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };
        if let DeleteRequest::Confirm { .. } = session.request_delete() {
            self.mode = AppMode::ConfirmDelete;
        }
    }

    /// Send the delete request; the dialog closes right away
    pub fn confirm_delete(&mut self) {
        if let Some(session) = &mut self.session {
            session.confirm_delete();
        }
        self.mode = AppMode::Browsing;
    }

    pub fn cancel_delete(&mut self) {
        if let Some(session) = &mut self.session {
            session.cancel_delete();
        }
        self.mode = AppMode::Browsing;
    }

    /// Question shown in the confirmation dialog
    pub fn delete_prompt(&self) -> Option<String> {
        self.session.as_ref().and_then(Session::delete_prompt)
    }

    /// Show help overlay
    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
    }

    /// Hide help overlay
    pub fn hide_help(&mut self) {
        self.mode = AppMode::Browsing;
    }

    /// Open the tools overlay and load fresh statistics
    pub fn show_tools(&mut self) {
        if let Some(session) = &mut self.session {
            self.mode = AppMode::Tools;
            session.refresh_cache_stats();
        }
    }

    pub fn hide_tools(&mut self) {
        self.mode = AppMode::Browsing;
    }

    pub fn start_job(&mut self) {
        if let Some(session) = &mut self.session {
            session.start_job();
        }
    }

    pub fn stop_job(&mut self) {
        if let Some(session) = &mut self.session {
            session.stop_job();
        }
    }

    pub fn refresh_stats(&mut self) {
        if let Some(session) = &mut self.session {
            session.refresh_cache_stats();
        }
    }

    /// A new gesture replaces the previous notice
    pub fn dismiss_notice(&mut self) {
        if let Some(session) = &mut self.session {
            session.dismiss_notice();
        }
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use mediadeck_core::{ClientConfig, FolderListing, FolderTree, HttpMediaApi};
    use tokio::runtime::Runtime;

    fn state(rt: &Runtime) -> AppState {
        // Nothing listens here; failed notifications are only logged
        let config = ClientConfig {
            server_url: "http://127.0.0.1:9".to_string(),
            heartbeat: false,
            ..ClientConfig::default()
        };
        let api = HttpMediaApi::new(&config).unwrap();
        let tree = FolderTree::from_listings([
            FolderListing::new(".", vec!["root.png".to_string()]),
            FolderListing::new("gallery", vec!["a.jpg".to_string(), "b.mp4".to_string()]),
            FolderListing::new("trips", vec!["x.jpg".to_string()]),
        ]);
        let session = Session::new(tree, Arc::new(api), rt.handle().clone(), &config);

        let mut state = AppState::new(PathBuf::from("."));
        state.set_session(session);
        state
    }

    #[test]
    fn test_rows_follow_accordion() {
        let rt = Runtime::new().unwrap();
        let mut state = state(&rt);
        assert_eq!(state.rows().len(), 3);

        state.move_down();
        state.toggle_expand();
        let gallery = state.selected_row().unwrap().folder();
        assert_eq!(state.rows().len(), 5);
        assert_eq!(state.rows()[2], Row::Item(gallery, 0));
        assert_eq!(state.scroll_offset, 1);

        // Opening another folder closes the first one
        state.go_to_last();
        state.toggle_expand();
        assert_eq!(state.rows().len(), 4);
        assert_eq!(state.selected_row(), Some(Row::Folder(FolderId(2))));
    }

    #[test]
    fn test_collapse_from_item_moves_cursor_to_folder() {
        let rt = Runtime::new().unwrap();
        let mut state = state(&rt);
        state.move_down();
        state.expand_selected();
        state.move_down();
        state.move_down();
        assert_eq!(state.selected_row(), Some(Row::Item(FolderId(1), 1)));

        state.collapse_selected();
        assert_eq!(state.selected_row(), Some(Row::Folder(FolderId(1))));
        assert_eq!(state.rows().len(), 3);
    }

    #[test]
    fn test_check_and_delete_dialog() {
        let rt = Runtime::new().unwrap();
        let mut state = state(&rt);

        state.request_delete();
        assert_eq!(state.mode, AppMode::Browsing);
        assert!(state.session.as_ref().unwrap().notice().is_some());

        state.move_down();
        state.toggle_check();
        state.request_delete();
        assert_eq!(state.mode, AppMode::ConfirmDelete);
        assert_eq!(
            state.delete_prompt().as_deref(),
            Some("2 Datei(en) wirklich löschen?")
        );

        state.cancel_delete();
        assert_eq!(state.mode, AppMode::Browsing);
        assert!(state.delete_prompt().is_none());
    }
}
