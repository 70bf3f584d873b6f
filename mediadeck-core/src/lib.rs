pub mod accordion;
pub mod config;
pub mod delete;
pub mod error;
pub mod heartbeat;
pub mod job;
pub mod notice;
pub mod remote;
pub mod scanner;
pub mod session;
pub mod tree;

pub use accordion::{Accordion, AccordionChange, FolderOpened};
pub use config::ClientConfig;
pub use delete::{DeletePhase, DeleteRequest, DeletionCoordinator};
pub use error::{ClientError, ClientResult, MediadeckError, Result};
pub use heartbeat::ServerStatus;
pub use job::{CacheStats, JobState, JobStatus, JobSupervisor, StartOutcome};
pub use notice::{Notice, NoticeLevel};
pub use remote::{HttpMediaApi, MediaApi};
pub use scanner::{CancellationToken, ScanConfig, ScanMessage, ScanProgress, Scanner};
pub use session::{Completion, Session};
pub use tree::{FolderEntry, FolderId, FolderListing, FolderTree, MediaItem, SelectionCounts};
