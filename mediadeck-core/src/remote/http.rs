use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::api::{
    Acknowledgement, CacheStatsData, DeleteFilesRequest, DeleteFilesResponse, Envelope,
    JobStatusData, MediaApi, OpenFolderRequest, StartJobData, StopJobData,
};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, MediadeckError, Result};

/// `MediaApi` over HTTP/JSON
#[derive(Clone, Debug)]
pub struct HttpMediaApi {
    client: Client,
    base_url: String,
}

impl HttpMediaApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| MediadeckError::Client(e.to_string()))?;

        tracing::info!(base_url = %config.server_url, "created media API client");

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an endpoint path
    pub fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and decode its JSON body.
    ///
    /// The body is decoded even for error statuses because the server reports
    /// application errors as `{ success: false, error }`.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(err) if status.is_success() => Err(err.into()),
            Err(_) => Err(ClientError::Status {
                status: status.as_u16(),
                body,
            }),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.build_url(path);
        tracing::debug!(%url, "GET");
        self.execute(self.client.get(&url)).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.build_url(path);
        tracing::debug!(%url, "POST");
        self.execute(self.client.post(&url)).await
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.build_url(path);
        tracing::debug!(%url, "POST");
        self.execute(self.client.post(&url).json(body)).await
    }
}

#[async_trait]
impl MediaApi for HttpMediaApi {
    async fn delete_files(&self, paths: Vec<String>) -> ClientResult<DeleteFilesResponse> {
        self.post_json("/delete-files", &DeleteFilesRequest { paths })
            .await
    }

    async fn open_folder(&self, folder_path: String) -> ClientResult<Acknowledgement> {
        self.post_json("/tools/folder/open", &OpenFolderRequest { folder_path })
            .await
    }

    async fn start_cache_job(&self) -> ClientResult<Envelope<StartJobData>> {
        self.post("/tools/cache/start").await
    }

    async fn cache_job_status(&self) -> ClientResult<Envelope<JobStatusData>> {
        self.get("/tools/cache/status").await
    }

    async fn stop_cache_job(&self) -> ClientResult<Envelope<StopJobData>> {
        self.post("/tools/cache/stop").await
    }

    async fn cache_stats(&self) -> ClientResult<Envelope<CacheStatsData>> {
        self.get("/tools/cache-stats").await
    }

    /// Any HTTP answer counts as alive; only transport failures do not
    async fn ping(&self) -> ClientResult<()> {
        let response = self.client.get(self.build_url("/ping")).send().await?;
        tracing::trace!(status = %response.status(), "ping answered");
        Ok(())
    }
}
