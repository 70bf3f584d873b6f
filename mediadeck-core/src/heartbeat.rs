use std::time::Duration;

use crate::error::ClientResult;
use crate::remote::{Dispatcher, TaskHandle};

/// Server reachability as seen by the last ping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServerStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

impl ServerStatus {
    pub fn label(self) -> &'static str {
        match self {
            ServerStatus::Unknown => "Verbinde...",
            ServerStatus::Online => "Server läuft",
            ServerStatus::Offline => "Server offline",
        }
    }
}

/// Result of one ping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatEvent(pub ClientResult<()>);

/// Periodic liveness check against `/ping`
pub struct Heartbeat {
    status: ServerStatus,
    interval: Duration,
    task: Option<TaskHandle>,
}

impl Heartbeat {
    pub fn new(interval: Duration) -> Self {
        Self {
            status: ServerStatus::Unknown,
            interval,
            task: None,
        }
    }

    pub fn status(&self) -> ServerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn start<M>(&mut self, dispatcher: &Dispatcher<M>)
    where
        M: From<HeartbeatEvent> + Send + 'static,
    {
        self.task = Some(dispatcher.every(self.interval, |api| async move {
            HeartbeatEvent(api.ping().await)
        }));
    }

    pub fn stop(&mut self) {
        self.task = None;
    }

    pub fn handle(&mut self, event: HeartbeatEvent) {
        let next = match &event.0 {
            Ok(()) => ServerStatus::Online,
            Err(_) => ServerStatus::Offline,
        };
        if next != self.status {
            match &event.0 {
                Ok(()) => tracing::info!("media server reachable"),
                Err(err) => tracing::warn!(error = %err, "media server unreachable"),
            }
        }
        self.status = next;
    }
}
