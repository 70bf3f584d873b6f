//! Scripted in-memory `MediaApi` for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::api::{
    Acknowledgement, CacheStatsData, DeleteFilesResponse, Envelope, JobStatusData, MediaApi,
    StartJobData, StopJobData,
};
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    DeleteFiles(Vec<String>),
    OpenFolder(String),
    StartCacheJob,
    CacheJobStatus,
    StopCacheJob,
    CacheStats,
    Ping,
}

#[derive(Default)]
struct Script {
    delete: VecDeque<ClientResult<DeleteFilesResponse>>,
    open: VecDeque<ClientResult<Acknowledgement>>,
    start: VecDeque<ClientResult<Envelope<StartJobData>>>,
    status: VecDeque<ClientResult<Envelope<JobStatusData>>>,
    stop: VecDeque<ClientResult<Envelope<StopJobData>>>,
    stats: VecDeque<ClientResult<Envelope<CacheStatsData>>>,
    ping: VecDeque<ClientResult<()>>,
    calls: Vec<ApiCall>,
}

/// Answers calls from per-endpoint queues and records every call.
///
/// An endpoint without a queued answer fails with a transport error, except
/// `ping`, which succeeds.
#[derive(Default)]
pub struct FakeApi {
    script: Mutex<Script>,
}

fn unscripted<T>() -> ClientResult<T> {
    Err(ClientError::Transport("no scripted response".to_string()))
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn with<R>(&self, f: impl FnOnce(&mut Script) -> R) -> R {
        let mut script = self.script.lock().unwrap();
        f(&mut script)
    }

    pub fn push_delete(&self, response: ClientResult<DeleteFilesResponse>) {
        self.with(|s| s.delete.push_back(response));
    }

    pub fn push_start(&self, response: ClientResult<Envelope<StartJobData>>) {
        self.with(|s| s.start.push_back(response));
    }

    pub fn push_status(&self, response: ClientResult<Envelope<JobStatusData>>) {
        self.with(|s| s.status.push_back(response));
    }

    pub fn push_stop(&self, response: ClientResult<Envelope<StopJobData>>) {
        self.with(|s| s.stop.push_back(response));
    }

    pub fn push_stats(&self, response: ClientResult<Envelope<CacheStatsData>>) {
        self.with(|s| s.stats.push_back(response));
    }

    pub fn push_ping(&self, response: ClientResult<()>) {
        self.with(|s| s.ping.push_back(response));
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.with(|s| s.calls.clone())
    }

    pub fn count(&self, pred: impl Fn(&ApiCall) -> bool) -> usize {
        self.with(|s| s.calls.iter().filter(|c| pred(c)).count())
    }
}

#[async_trait]
impl MediaApi for FakeApi {
    async fn delete_files(&self, paths: Vec<String>) -> ClientResult<DeleteFilesResponse> {
        self.with(|s| {
            s.calls.push(ApiCall::DeleteFiles(paths));
            s.delete.pop_front().unwrap_or_else(unscripted)
        })
    }

    async fn open_folder(&self, folder_path: String) -> ClientResult<Acknowledgement> {
        self.with(|s| {
            s.calls.push(ApiCall::OpenFolder(folder_path));
            s.open.pop_front().unwrap_or_else(unscripted)
        })
    }

    async fn start_cache_job(&self) -> ClientResult<Envelope<StartJobData>> {
        self.with(|s| {
            s.calls.push(ApiCall::StartCacheJob);
            s.start.pop_front().unwrap_or_else(unscripted)
        })
    }

    async fn cache_job_status(&self) -> ClientResult<Envelope<JobStatusData>> {
        self.with(|s| {
            s.calls.push(ApiCall::CacheJobStatus);
            s.status.pop_front().unwrap_or_else(unscripted)
        })
    }

    async fn stop_cache_job(&self) -> ClientResult<Envelope<StopJobData>> {
        self.with(|s| {
            s.calls.push(ApiCall::StopCacheJob);
            s.stop.pop_front().unwrap_or_else(unscripted)
        })
    }

    async fn cache_stats(&self) -> ClientResult<Envelope<CacheStatsData>> {
        self.with(|s| {
            s.calls.push(ApiCall::CacheStats);
            s.stats.pop_front().unwrap_or_else(unscripted)
        })
    }

    async fn ping(&self) -> ClientResult<()> {
        self.with(|s| {
            s.calls.push(ApiCall::Ping);
            s.ping.pop_front().unwrap_or(Ok(()))
        })
    }
}
