use super::node::{FolderContent, FolderEntry, FolderId};
use super::selection::SelectionCounts;

/// One folder as delivered by the media listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderListing {
    pub path: String,
    pub files: Vec<String>,
}

impl FolderListing {
    pub fn new(path: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            path: path.into(),
            files,
        }
    }
}

/// Folder cards in tree order
#[derive(Debug, Default)]
pub struct FolderTree {
    folders: Vec<FolderEntry>,
    next_id: usize,
}

impl FolderTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_listings(listings: impl IntoIterator<Item = FolderListing>) -> Self {
        let mut tree = Self::new();
        for listing in listings {
            tree.add_folder(listing.path, listing.files);
        }
        tree
    }

    /// Append a folder and return its ID
    pub fn add_folder(&mut self, path: String, raw_files: Vec<String>) -> FolderId {
        let id = FolderId(self.next_id);
        self.next_id += 1;
        self.folders.push(FolderEntry::new(id, path, raw_files));
        id
    }

    fn position(&self, id: FolderId) -> Option<usize> {
        self.folders.iter().position(|f| f.id == id)
    }

    /// Get a reference to a folder
    pub fn get(&self, id: FolderId) -> Option<&FolderEntry> {
        self.folders.iter().find(|f| f.id == id)
    }

    /// Get a mutable reference to a folder
    pub fn get_mut(&mut self, id: FolderId) -> Option<&mut FolderEntry> {
        self.folders.iter_mut().find(|f| f.id == id)
    }

    /// Look a folder up by its path
    pub fn find_by_path(&self, path: &str) -> Option<&FolderEntry> {
        self.folders.iter().find(|f| f.path == path)
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Iterator over folders in tree order
    pub fn iter(&self) -> impl Iterator<Item = &FolderEntry> {
        self.folders.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut FolderEntry> {
        self.folders.iter_mut()
    }

    /// Build the folder's items if that has not happened yet
    pub fn materialize(&mut self, id: FolderId) -> bool {
        self.get_mut(id).is_some_and(FolderEntry::materialize)
    }

    pub fn set_folder_selected(&mut self, id: FolderId, checked: bool) {
        if let Some(folder) = self.get_mut(id) {
            folder.set_selected(checked);
        }
    }

    pub fn set_item_selected(&mut self, id: FolderId, index: usize, checked: bool) {
        if let Some(folder) = self.get_mut(id) {
            folder.set_item_selected(index, checked);
        }
    }

    /// Check every folder and every existing item. Deferred folders stay deferred.
    pub fn select_all(&mut self) {
        for folder in &mut self.folders {
            folder.set_selected(true);
        }
    }

    pub fn select_none(&mut self) {
        for folder in &mut self.folders {
            folder.set_selected(false);
        }
    }

    /// Flip every folder flag and every existing item independently
    pub fn invert_selection(&mut self) {
        for folder in &mut self.folders {
            folder.selected = !folder.selected;
            if let FolderContent::Materialized(items) = &mut folder.content {
                for item in items {
                    item.selected = !item.selected;
                }
            }
        }
    }

    pub fn any_folder_selected(&self) -> bool {
        self.folders.iter().any(|f| f.selected)
    }

    /// Count selected folders and logically selected files
    pub fn selection_counts(&self) -> SelectionCounts {
        self.folders
            .iter()
            .fold(SelectionCounts::default(), |mut counts, folder| {
                if folder.selected {
                    counts.folders += 1;
                }
                counts.files += folder.selected_file_count();
                counts
            })
    }

    /// Paths of all logically selected files, folders in tree order
    pub fn selected_paths(&self) -> Vec<String> {
        self.folders
            .iter()
            .flat_map(FolderEntry::selected_paths)
            .collect()
    }

    /// Remove a folder and everything it owns
    pub fn remove_folder(&mut self, id: FolderId) -> Option<FolderEntry> {
        let index = self.position(id)?;
        Some(self.folders.remove(index))
    }

    /// Total number of files across all folders
    pub fn total_files(&self) -> usize {
        self.folders.iter().map(FolderEntry::file_count).sum()
    }
}
