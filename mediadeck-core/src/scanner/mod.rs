mod progress;
mod walker;

pub use progress::{ScanMessage, ScanProgress};
pub use walker::{CancellationToken, DEFAULT_IMAGE_EXTENSIONS, ScanConfig, Scanner};
