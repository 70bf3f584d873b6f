mod stats;
mod status;
mod supervisor;

pub use stats::CacheStats;
pub use status::{JobState, JobStatus};
pub use supervisor::{JobEvent, JobSupervisor, StartOutcome};
