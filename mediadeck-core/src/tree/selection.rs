/// Aggregate selection over the whole tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCounts {
    /// Folders whose checkbox is checked
    pub folders: usize,
    /// Files in the logically selected sets of all folders
    pub files: usize,
}

impl SelectionCounts {
    pub fn is_empty(&self) -> bool {
        self.folders == 0 && self.files == 0
    }

    /// Counter text for the action bar. Lines are separated by `<br>`.
    pub fn label(&self) -> String {
        match (self.folders, self.files) {
            (0, 0) => "0 ausgewählt".to_string(),
            (folders, 0) => format!("{} Ordner", folders),
            (0, files) => format!("{} Dateien", files),
            (folders, files) => format!("{} Ordner<br>{} Dateien", folders, files),
        }
    }

    /// Label split into display lines
    pub fn label_lines(&self) -> Vec<String> {
        self.label().split("<br>").map(str::to_string).collect()
    }
}
