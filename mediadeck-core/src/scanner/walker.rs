use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, Sender};
use jwalk::WalkDir;

use super::progress::{ScanMessage, ScanProgress};
use crate::error::{MediadeckError, Result};
use crate::tree::{FolderListing, ROOT_FOLDER, is_video_path};

/// Default still-image extensions
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff", "heic",
];

/// Send a progress update every this many entries
const PROGRESS_EVERY: u64 = 256;

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Follow symbolic links
    pub follow_symlinks: bool,
    /// Maximum depth to scan (None = unlimited)
    pub max_depth: Option<usize>,
    /// Directory names that are never entered
    pub skip_dirs: Vec<String>,
    /// Lowercase image extensions; video extensions are always accepted
    pub image_extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            max_depth: None,
            skip_dirs: vec![".thumbs".to_string()],
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl ScanConfig {
    pub fn is_media_file(&self, name: &str) -> bool {
        if is_video_path(name) {
            return true;
        }
        name.rsplit_once('.').is_some_and(|(_, ext)| {
            self.image_extensions
                .iter()
                .any(|image| image.eq_ignore_ascii_case(ext))
        })
    }
}

/// Cancellation token for stopping scans
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Folder path relative to the media root, `/`-separated
fn relative_folder(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        ROOT_FOLDER.to_string()
    } else {
        parts.join("/")
    }
}

/// Collects the media listing below a root directory
pub struct Scanner {
    config: ScanConfig,
    cancel_token: CancellationToken,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Scan a media root in the background.
    ///
    /// Folders come back in depth-first order with file names sorted; folders
    /// without media are left out.
    pub fn scan(
        self,
        root_path: PathBuf,
    ) -> Result<(Receiver<ScanMessage>, std::thread::JoinHandle<Vec<FolderListing>>)> {
        if !root_path.exists() {
            return Err(MediadeckError::PathNotFound(root_path));
        }
        if !root_path.is_dir() {
            return Err(MediadeckError::NotADirectory(root_path));
        }

        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = std::thread::spawn(move || self.scan_sync(root_path, tx));
        Ok((rx, handle))
    }

    fn scan_sync(self, root_path: PathBuf, tx: Sender<ScanMessage>) -> Vec<FolderListing> {
        let root_path = root_path.canonicalize().unwrap_or(root_path);
        tracing::info!(root = %root_path.display(), "scanning media root");

        let mut folders: Vec<FolderListing> = Vec::new();
        let mut path_to_slot: HashMap<PathBuf, usize> = HashMap::new();
        let mut progress = ScanProgress::default();

        let skip_dirs = self.config.skip_dirs.clone();
        let walker = WalkDir::new(&root_path)
            .skip_hidden(false)
            .follow_links(self.config.follow_symlinks)
            .sort(true)
            .process_read_dir(move |_depth, _path, _read_dir_state, children| {
                children.retain(|entry| match entry {
                    Ok(e) if e.file_type().is_dir() => {
                        let name = e.file_name().to_string_lossy();
                        !skip_dirs.iter().any(|skip| *skip == name)
                    }
                    _ => true,
                });
            });

        let walker = if let Some(depth) = self.config.max_depth {
            walker.max_depth(depth)
        } else {
            walker
        };

        for entry_result in walker {
            if self.cancel_token.is_cancelled() {
                tracing::info!("media scan cancelled");
                let _ = tx.send(ScanMessage::Cancelled);
                return Self::finish(folders);
            }

            let entry = match entry_result {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    progress.errors += 1;
                    continue;
                }
            };

            let path = entry.path();

            if entry.file_type().is_dir() {
                path_to_slot.insert(path.clone(), folders.len());
                folders.push(FolderListing::new(
                    relative_folder(&root_path, &path),
                    Vec::new(),
                ));
                progress.dirs_scanned += 1;
                progress.current_path = Some(path);
            } else {
                let name = entry.file_name().to_string_lossy().into_owned();
                if !self.config.is_media_file(&name) {
                    continue;
                }
                let Some(&slot) = path.parent().and_then(|p| path_to_slot.get(p)) else {
                    continue;
                };
                folders[slot].files.push(name);
                progress.media_files += 1;
            }

            if progress.total_entries() % PROGRESS_EVERY == 0 {
                let _ = tx.send(ScanMessage::Progress(progress.clone()));
            }
        }

        let _ = tx.send(ScanMessage::Progress(progress.clone()));
        let _ = tx.send(ScanMessage::Completed);

        tracing::info!(
            folders = folders.len(),
            files = progress.media_files,
            errors = progress.errors,
            "media scan finished"
        );
        Self::finish(folders)
    }

    fn finish(folders: Vec<FolderListing>) -> Vec<FolderListing> {
        folders.into_iter().filter(|f| !f.files.is_empty()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn run(scanner: Scanner, root: &Path) -> (Vec<ScanMessage>, Vec<FolderListing>) {
        let (rx, handle) = scanner.scan(root.to_path_buf()).unwrap();
        let messages: Vec<ScanMessage> = rx.iter().collect();
        (messages, handle.join().unwrap())
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp = TempDir::new().unwrap();
        let (messages, listings) = run(Scanner::new(ScanConfig::default()), temp.path());
        assert!(listings.is_empty());
        assert!(matches!(messages.last(), Some(ScanMessage::Completed)));
    }

    #[test]
    fn test_scan_collects_media_per_folder() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("b.png"), "x").unwrap();
        fs::write(root.join("a.jpg"), "x").unwrap();
        fs::write(root.join("notes.txt"), "x").unwrap();
        fs::create_dir_all(root.join("gallery/.thumbs")).unwrap();
        fs::write(root.join("gallery/clip.MP4"), "x").unwrap();
        fs::write(root.join("gallery/.thumbs/clip.jpg"), "x").unwrap();
        fs::create_dir_all(root.join("trips/alps")).unwrap();
        fs::write(root.join("trips/alps/x.heic"), "x").unwrap();
        fs::create_dir(root.join("empty")).unwrap();

        let (_, listings) = run(Scanner::new(ScanConfig::default()), root);

        assert_eq!(
            listings,
            vec![
                FolderListing::new(".", vec!["a.jpg".to_string(), "b.png".to_string()]),
                FolderListing::new("gallery", vec!["clip.MP4".to_string()]),
                FolderListing::new("trips/alps", vec!["x.heic".to_string()]),
            ]
        );
    }

    #[test]
    fn test_scan_respects_max_depth() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("top.jpg"), "x").unwrap();
        fs::create_dir(temp.path().join("deep")).unwrap();
        fs::write(temp.path().join("deep/below.jpg"), "x").unwrap();

        let config = ScanConfig {
            max_depth: Some(1),
            ..ScanConfig::default()
        };
        let (_, listings) = run(Scanner::new(config), temp.path());
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].path, ".");
    }

    #[test]
    fn test_scan_cancelled() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.jpg"), "x").unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let scanner = Scanner::new(ScanConfig::default()).with_cancellation(token);
        let (messages, listings) = run(scanner, temp.path());

        assert!(listings.is_empty());
        assert!(matches!(messages.last(), Some(ScanMessage::Cancelled)));
    }

    #[test]
    fn test_scan_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let result = Scanner::new(ScanConfig::default()).scan(missing);
        assert!(matches!(result, Err(MediadeckError::PathNotFound(_))));
    }

    #[test]
    fn test_media_extensions() {
        let config = ScanConfig::default();
        assert!(config.is_media_file("IMG_1.JPG"));
        assert!(config.is_media_file("movie.mkv"));
        assert!(!config.is_media_file("readme.md"));
        assert!(!config.is_media_file("jpg"));
    }
}
