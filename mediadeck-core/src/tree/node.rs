/// Path used for the media root folder
pub const ROOT_FOLDER: &str = ".";

/// Extensions treated as video (compared case-insensitively)
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "avi", "mkv", "webm", "m4v", "wmv", "flv", "mpg", "mpeg", "3gp",
];

/// Stable identifier for a folder in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FolderId(pub usize);

impl FolderId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Join a folder path and a file name the way the server expects it
pub fn join_path(folder: &str, name: &str) -> String {
    if folder == ROOT_FOLDER {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}

/// Check a path against the video extension set
pub fn is_video_path(path: &str) -> bool {
    let Some((_, ext)) = path.rsplit_once('.') else {
        return false;
    };
    VIDEO_EXTENSIONS
        .iter()
        .any(|video| video.eq_ignore_ascii_case(ext))
}

/// A concrete, selectable media file inside a materialized folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub name: String,
    pub filepath: String,
    /// Fixed at construction
    pub is_video: bool,
    pub selected: bool,
}

impl MediaItem {
    pub fn new(folder: &str, name: &str, selected: bool) -> Self {
        let filepath = join_path(folder, name);
        let is_video = is_video_path(&filepath);
        Self {
            name: name.to_string(),
            filepath,
            is_video,
            selected,
        }
    }
}

/// Rendering state of a folder's children
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderContent {
    /// Only the raw names are known; a folder-level selection covers all of them
    Deferred,
    /// Items have been built from the raw names
    Materialized(Vec<MediaItem>),
}

/// A folder card: one directory and its media files
#[derive(Debug, Clone)]
pub struct FolderEntry {
    pub id: FolderId,
    pub path: String,
    /// File names as listed at load time
    pub raw_files: Vec<String>,
    pub content: FolderContent,
    /// Folder-level checkbox
    pub selected: bool,
}

impl FolderEntry {
    pub fn new(id: FolderId, path: String, raw_files: Vec<String>) -> Self {
        Self {
            id,
            path,
            raw_files,
            content: FolderContent::Deferred,
            selected: false,
        }
    }

    pub fn is_materialized(&self) -> bool {
        matches!(self.content, FolderContent::Materialized(_))
    }

    /// Materialized items, empty while deferred
    pub fn items(&self) -> &[MediaItem] {
        match &self.content {
            FolderContent::Deferred => &[],
            FolderContent::Materialized(items) => items,
        }
    }

    /// Build the item list from `raw_files`. Returns false if it already existed.
    pub fn materialize(&mut self) -> bool {
        if let FolderContent::Materialized(_) = self.content {
            return false;
        }
        let items = self
            .raw_files
            .iter()
            .map(|name| MediaItem::new(&self.path, name, self.selected))
            .collect();
        self.content = FolderContent::Materialized(items);
        true
    }

    /// Folder checkbox; cascades to items when they exist
    pub fn set_selected(&mut self, checked: bool) {
        self.selected = checked;
        if let FolderContent::Materialized(items) = &mut self.content {
            for item in items {
                item.selected = checked;
            }
        }
    }

    /// Item checkbox; the folder flag is left alone
    pub fn set_item_selected(&mut self, index: usize, checked: bool) -> bool {
        match &mut self.content {
            FolderContent::Materialized(items) => match items.get_mut(index) {
                Some(item) => {
                    item.selected = checked;
                    true
                }
                None => false,
            },
            FolderContent::Deferred => false,
        }
    }

    /// Number of files in the logically selected set
    pub fn selected_file_count(&self) -> usize {
        match &self.content {
            FolderContent::Deferred if self.selected => self.raw_files.len(),
            FolderContent::Deferred => 0,
            FolderContent::Materialized(items) => items.iter().filter(|i| i.selected).count(),
        }
    }

    /// Paths in the logically selected set, in listing order
    pub fn selected_paths(&self) -> Vec<String> {
        match &self.content {
            FolderContent::Deferred if self.selected => self
                .raw_files
                .iter()
                .map(|name| join_path(&self.path, name))
                .collect(),
            FolderContent::Deferred => Vec::new(),
            FolderContent::Materialized(items) => items
                .iter()
                .filter(|i| i.selected)
                .map(|i| i.filepath.clone())
                .collect(),
        }
    }

    /// Number of files shown for the folder header
    pub fn file_count(&self) -> usize {
        match &self.content {
            FolderContent::Deferred => self.raw_files.len(),
            FolderContent::Materialized(items) => items.len(),
        }
    }

    /// Drop selected items, returning how many were removed
    pub fn remove_selected_items(&mut self) -> usize {
        let FolderContent::Materialized(items) = &mut self.content else {
            return 0;
        };
        let before = items.len();
        let removed: Vec<String> = items
            .iter()
            .filter(|i| i.selected)
            .map(|i| i.name.clone())
            .collect();
        items.retain(|i| !i.selected);
        self.raw_files.retain(|name| !removed.contains(name));
        before - items.len()
    }
}
