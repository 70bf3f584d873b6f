mod api;
mod dispatch;
mod http;
#[cfg(test)]
pub(crate) mod testing;

pub use api::{
    Acknowledgement, CacheStatsData, DeleteFilesRequest, DeleteFilesResponse, Envelope,
    JobStatusData, MediaApi, OpenFolderRequest, StartJobData, StopJobData,
};
pub use dispatch::{Dispatcher, TaskHandle};
pub use http::HttpMediaApi;
