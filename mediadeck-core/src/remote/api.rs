use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClientResult;
use crate::job::JobState;

/// Generic `{ success, data?, error? }` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Best-effort acknowledgement, payload is not inspected
pub type Acknowledgement = Envelope<serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteFilesRequest {
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFilesResponse {
    #[serde(default)]
    pub success: bool,
    pub deleted_count: Option<u64>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenFolderRequest {
    pub folder_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartJobData {
    pub job_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobStatusData {
    pub status: JobState,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub processed_folders: u64,
    #[serde(default)]
    pub total_folders: u64,
    #[serde(default)]
    pub updated_folders: u64,
    #[serde(default)]
    pub valid_folders: u64,
    pub current_folder: Option<String>,
    /// Elapsed seconds
    #[serde(default)]
    pub duration: f64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopJobData {
    #[serde(default)]
    pub stopped: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CacheStatsData {
    #[serde(default)]
    pub thumbs_directories: u64,
    #[serde(default)]
    pub thumbnail_files: u64,
    #[serde(default)]
    pub total_size_formatted: String,
}

/// File-management endpoints of the media server
#[async_trait]
pub trait MediaApi: Send + Sync {
    /// `POST /delete-files`
    async fn delete_files(&self, paths: Vec<String>) -> ClientResult<DeleteFilesResponse>;

    /// `POST /tools/folder/open`
    async fn open_folder(&self, folder_path: String) -> ClientResult<Acknowledgement>;

    /// `POST /tools/cache/start`
    async fn start_cache_job(&self) -> ClientResult<Envelope<StartJobData>>;

    /// `GET /tools/cache/status`
    async fn cache_job_status(&self) -> ClientResult<Envelope<JobStatusData>>;

    /// `POST /tools/cache/stop`
    async fn stop_cache_job(&self) -> ClientResult<Envelope<StopJobData>>;

    /// `GET /tools/cache-stats`
    async fn cache_stats(&self) -> ClientResult<Envelope<CacheStatsData>>;

    /// `GET /ping`
    async fn ping(&self) -> ClientResult<()>;
}
