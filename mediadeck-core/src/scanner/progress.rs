use std::path::PathBuf;

/// Progress update during a media scan
#[derive(Debug, Clone)]
pub enum ScanMessage {
    /// Progress update
    Progress(ScanProgress),
    /// Scan completed
    Completed,
    /// Scan was cancelled
    Cancelled,
}

/// Scanning progress statistics
#[derive(Debug, Clone, Default)]
pub struct ScanProgress {
    /// Media files accepted so far
    pub media_files: u64,
    /// Directories entered
    pub dirs_scanned: u64,
    /// Entries that could not be read
    pub errors: u64,
    /// Directory being scanned
    pub current_path: Option<PathBuf>,
}

impl ScanProgress {
    pub fn total_entries(&self) -> u64 {
        self.media_files + self.dirs_scanned
    }
}
