use std::time::Duration;

use super::status::{JobState, JobStatus};
use crate::error::ClientResult;
use crate::remote::{Dispatcher, Envelope, JobStatusData, StartJobData, StopJobData, TaskHandle};

/// Results of cache job requests
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    Started(ClientResult<Envelope<StartJobData>>),
    /// Poll result, tagged with the generation of the poller that issued it
    Status {
        generation: u64,
        result: ClientResult<Envelope<JobStatusData>>,
    },
    Stopped(ClientResult<Envelope<StopJobData>>),
}

/// Outcome line of the last start attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Pending,
    Started(String),
    Failed(String),
}

impl StartOutcome {
    pub fn text(&self) -> String {
        match self {
            StartOutcome::Pending => "⏳ Starte Background-Job...".to_string(),
            StartOutcome::Started(id) => format!("✓ Job gestartet (ID: {})", id),
            StartOutcome::Failed(message) => format!("❌ {}", message),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StartOutcome::Failed(_))
    }
}

struct Poller {
    generation: u64,
    _task: TaskHandle,
}

/// Tracks the single cache rebuild job and owns its poll loop.
///
/// At most one poller exists. Every poller gets a new generation number and
/// status results from any other generation are dropped, so a revoked
/// poller can never update the display.
pub struct JobSupervisor {
    status: JobStatus,
    start_outcome: Option<StartOutcome>,
    /// Shown while idle, e.g. after the job was stopped
    idle_note: Option<&'static str>,
    poller: Option<Poller>,
    generation: u64,
    poll_interval: Duration,
}

impl JobSupervisor {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            status: JobStatus::default(),
            start_outcome: None,
            idle_note: None,
            poller: None,
            generation: 0,
            poll_interval,
        }
    }

    pub fn status(&self) -> &JobStatus {
        &self.status
    }

    pub fn state(&self) -> JobState {
        self.status.state
    }

    pub fn start_outcome(&self) -> Option<&StartOutcome> {
        self.start_outcome.as_ref()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_some()
    }

    /// Generation of the live poller, if any
    pub fn active_generation(&self) -> Option<u64> {
        self.poller.as_ref().map(|p| p.generation)
    }

    /// Lines for the status area
    pub fn status_lines(&self) -> Vec<String> {
        match (self.status.state, self.idle_note) {
            (JobState::NotStarted, Some(note)) => vec![note.to_string()],
            _ => self.status.lines(),
        }
    }

    /// Ask the server to start a job
    pub fn start<M>(&mut self, dispatcher: &Dispatcher<M>)
    where
        M: From<JobEvent> + Send + 'static,
    {
        tracing::debug!("requesting cache rebuild start");
        self.start_outcome = Some(StartOutcome::Pending);
        dispatcher.request(|api| async move { JobEvent::Started(api.start_cache_job().await) });
    }

    /// Ask the server to stop the job. Polling continues until it confirms.
    pub fn stop<M>(&mut self, dispatcher: &Dispatcher<M>)
    where
        M: From<JobEvent> + Send + 'static,
    {
        tracing::debug!("requesting cache rebuild stop");
        dispatcher.request(|api| async move { JobEvent::Stopped(api.stop_cache_job().await) });
    }

    pub fn handle<M>(&mut self, event: JobEvent, dispatcher: &Dispatcher<M>)
    where
        M: From<JobEvent> + Send + 'static,
    {
        match event {
            JobEvent::Started(result) => self.on_started(result, dispatcher),
            JobEvent::Status { generation, result } => self.on_status(generation, result),
            JobEvent::Stopped(result) => self.on_stopped(result),
        }
    }

    fn on_started<M>(
        &mut self,
        result: ClientResult<Envelope<StartJobData>>,
        dispatcher: &Dispatcher<M>,
    ) where
        M: From<JobEvent> + Send + 'static,
    {
        match result {
            Ok(Envelope {
                success: true,
                data: Some(data),
                ..
            }) => {
                tracing::info!(job_id = %data.job_id, "cache rebuild started");
                self.start_outcome = Some(StartOutcome::Started(data.job_id.clone()));
                self.status = JobStatus::started(data.job_id);
                self.idle_note = None;
                self.start_polling(dispatcher);
            }
            Ok(envelope) => {
                let message = envelope.error.unwrap_or_else(|| "Fehler".to_string());
                tracing::warn!(error = %message, "cache rebuild start refused");
                self.start_outcome = Some(StartOutcome::Failed(message));
            }
            Err(err) => {
                tracing::warn!(error = %err, "cache rebuild start failed");
                self.start_outcome = Some(StartOutcome::Failed(err.to_string()));
            }
        }
    }

    fn start_polling<M>(&mut self, dispatcher: &Dispatcher<M>)
    where
        M: From<JobEvent> + Send + 'static,
    {
        // Old task is aborted before the new one exists
        self.poller = None;
        self.generation += 1;
        let generation = self.generation;

        let task = dispatcher.every(self.poll_interval, move |api| async move {
            JobEvent::Status {
                generation,
                result: api.cache_job_status().await,
            }
        });
        self.poller = Some(Poller {
            generation,
            _task: task,
        });
    }

    fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            tracing::debug!(generation = poller.generation, "cache job polling stopped");
        }
    }

    fn on_status(&mut self, generation: u64, result: ClientResult<Envelope<JobStatusData>>) {
        if self.active_generation() != Some(generation) {
            tracing::debug!(generation, "ignoring status from revoked poller");
            return;
        }

        let data = match result {
            Ok(Envelope {
                success: true,
                data: Some(data),
                ..
            }) => data,
            Ok(_) => return,
            Err(err) => {
                tracing::warn!(error = %err, "cache job status request failed");
                return;
            }
        };

        match data.status {
            JobState::NotStarted => {
                self.stop_polling();
                self.status = JobStatus::default();
                self.idle_note = Some("Kein Job aktiv");
            }
            JobState::Running => self.status.apply(&data),
            JobState::Completed => {
                self.status.apply(&data);
                self.stop_polling();
                tracing::info!(
                    folders = data.total_folders,
                    updated = data.updated_folders,
                    duration = data.duration,
                    "cache rebuild completed"
                );
            }
            JobState::Error => {
                self.status.apply(&data);
                self.stop_polling();
                tracing::warn!(error = ?data.error, "cache rebuild failed");
            }
        }
    }

    fn on_stopped(&mut self, result: ClientResult<Envelope<StopJobData>>) {
        match result {
            Ok(Envelope {
                success: true,
                data: Some(StopJobData { stopped: true }),
                ..
            }) => {
                tracing::info!("cache rebuild stopped");
                self.stop_polling();
                self.status = JobStatus::default();
                self.idle_note = Some("Job gestoppt");
            }
            Ok(_) => tracing::warn!("server did not confirm the job stop"),
            Err(err) => tracing::warn!(error = %err, "cache rebuild stop failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::remote::testing::{ApiCall, FakeApi};

    use std::sync::Arc;

    use crossbeam_channel::Receiver;
    use tokio::runtime::{Builder, Runtime};
    use tokio::time::sleep;

    struct Harness {
        rt: Runtime,
        fake: Arc<FakeApi>,
        dispatcher: Dispatcher<JobEvent>,
        rx: Receiver<JobEvent>,
        supervisor: JobSupervisor,
    }

    impl Harness {
        fn new() -> Self {
            let rt = Builder::new_current_thread()
                .enable_time()
                .start_paused(true)
                .build()
                .unwrap();
            let fake = FakeApi::new();
            let (dispatcher, rx) = Dispatcher::channel(rt.handle().clone(), fake.clone());
            Self {
                rt,
                fake,
                dispatcher,
                rx,
                supervisor: JobSupervisor::new(Duration::from_secs(2)),
            }
        }

        /// Let virtual time pass, then apply everything that arrived
        fn advance(&mut self, by: Duration) {
            self.rt.block_on(async { sleep(by).await });
            let events: Vec<JobEvent> = self.rx.try_iter().collect();
            for event in events {
                self.supervisor.handle(event, &self.dispatcher);
            }
        }

        fn settle(&mut self) {
            self.advance(Duration::from_millis(1));
        }

        fn status_calls(&self) -> usize {
            self.fake.count(|c| *c == ApiCall::CacheJobStatus)
        }
    }

    fn started(id: &str) -> ClientResult<Envelope<StartJobData>> {
        Ok(Envelope::ok(StartJobData {
            job_id: id.to_string(),
        }))
    }

    fn status(state: JobState, processed: u64, total: u64) -> ClientResult<Envelope<JobStatusData>> {
        Ok(Envelope::ok(JobStatusData {
            status: state,
            progress: if total == 0 { 0.0 } else { processed as f64 * 100.0 / total as f64 },
            processed_folders: processed,
            total_folders: total,
            ..JobStatusData::default()
        }))
    }

    #[test]
    fn test_start_then_complete_stops_polling() {
        let mut h = Harness::new();
        h.fake.push_start(started("job-1"));
        h.fake.push_status(status(JobState::Completed, 10, 10));

        h.supervisor.start(&h.dispatcher);
        assert_eq!(h.supervisor.start_outcome(), Some(&StartOutcome::Pending));

        // Start response arrives and the first poll runs right away
        h.settle();
        assert_eq!(h.supervisor.status().job_id.as_deref(), Some("job-1"));
        assert!(h.supervisor.is_polling());
        assert_eq!(
            h.supervisor.start_outcome().map(StartOutcome::text).as_deref(),
            Some("✓ Job gestartet (ID: job-1)")
        );

        h.settle();
        assert_eq!(h.supervisor.state(), JobState::Completed);
        assert_eq!(h.supervisor.status().processed_folders, 10);
        assert!(!h.supervisor.is_polling());

        h.advance(Duration::from_secs(10));
        assert_eq!(h.status_calls(), 1);
    }

    #[test]
    fn test_running_polls_every_interval() {
        let mut h = Harness::new();
        h.fake.push_start(started("job-1"));
        h.fake.push_status(status(JobState::Running, 5, 10));
        h.fake.push_status(status(JobState::Running, 7, 10));

        h.supervisor.start(&h.dispatcher);
        h.settle();
        h.settle();
        assert_eq!(h.supervisor.state(), JobState::Running);
        assert_eq!(h.supervisor.status().processed_folders, 5);

        h.advance(Duration::from_millis(2100));
        assert_eq!(h.supervisor.status().processed_folders, 7);
        assert_eq!(h.status_calls(), 2);
        assert_eq!(h.supervisor.status_lines()[1], "70% (7 / 10 Ordner)");
    }

    #[test]
    fn test_start_failure_stays_not_started() {
        let mut h = Harness::new();
        h.fake.push_start(Ok(Envelope::failed("already running")));

        h.supervisor.start(&h.dispatcher);
        h.settle();

        assert_eq!(h.supervisor.state(), JobState::NotStarted);
        assert!(!h.supervisor.is_polling());
        let outcome = h.supervisor.start_outcome().unwrap();
        assert!(outcome.is_error());
        assert_eq!(outcome.text(), "❌ already running");

        h.fake.push_start(Err(ClientError::Transport("connection refused".to_string())));
        h.supervisor.start(&h.dispatcher);
        h.settle();
        assert_eq!(
            h.supervisor.start_outcome().map(StartOutcome::text).as_deref(),
            Some("❌ connection refused")
        );
        assert_eq!(h.status_calls(), 0);
    }

    #[test]
    fn test_stop_confirmed_resets_to_idle() {
        let mut h = Harness::new();
        h.fake.push_start(started("job-1"));
        h.fake.push_status(status(JobState::Running, 1, 10));
        h.fake.push_stop(Ok(Envelope::ok(StopJobData { stopped: true })));

        h.supervisor.start(&h.dispatcher);
        h.settle();
        h.settle();

        h.supervisor.stop(&h.dispatcher);
        h.settle();

        assert_eq!(h.supervisor.state(), JobState::NotStarted);
        assert!(!h.supervisor.is_polling());
        assert_eq!(h.supervisor.status_lines(), vec!["Job gestoppt"]);

        let calls = h.status_calls();
        h.advance(Duration::from_secs(10));
        assert_eq!(h.status_calls(), calls);
    }

    #[test]
    fn test_stop_not_confirmed_keeps_polling() {
        let mut h = Harness::new();
        h.fake.push_start(started("job-1"));
        h.fake.push_status(status(JobState::Running, 1, 10));
        h.fake.push_stop(Ok(Envelope::ok(StopJobData { stopped: false })));
        h.fake.push_status(status(JobState::Running, 2, 10));

        h.supervisor.start(&h.dispatcher);
        h.settle();
        h.settle();
        h.supervisor.stop(&h.dispatcher);
        h.settle();

        assert!(h.supervisor.is_polling());
        assert_eq!(h.supervisor.state(), JobState::Running);

        h.advance(Duration::from_millis(2100));
        assert_eq!(h.supervisor.status().processed_folders, 2);
    }

    #[test]
    fn test_not_started_poll_shows_idle() {
        let mut h = Harness::new();
        h.fake.push_start(started("job-1"));
        h.fake.push_status(status(JobState::NotStarted, 0, 0));

        h.supervisor.start(&h.dispatcher);
        h.settle();
        h.settle();

        assert!(!h.supervisor.is_polling());
        assert_eq!(h.supervisor.status_lines(), vec!["Kein Job aktiv"]);
    }

    #[test]
    fn test_poll_errors_keep_polling() {
        let mut h = Harness::new();
        h.fake.push_start(started("job-1"));
        h.fake.push_status(Err(ClientError::Transport("timeout".to_string())));
        h.fake.push_status(Ok(Envelope::failed("busy")));
        h.fake.push_status(status(JobState::Error, 3, 10));

        h.supervisor.start(&h.dispatcher);
        h.settle();
        h.settle();
        assert!(h.supervisor.is_polling());

        h.advance(Duration::from_millis(2100));
        assert!(h.supervisor.is_polling());
        assert_eq!(h.supervisor.state(), JobState::Running);

        h.advance(Duration::from_millis(2100));
        assert!(!h.supervisor.is_polling());
        assert_eq!(h.supervisor.status_lines(), vec!["❌ Fehler: Unbekannt"]);
    }

    #[test]
    fn test_restart_revokes_previous_poller() {
        let mut h = Harness::new();
        h.fake.push_start(started("job-1"));
        h.fake.push_start(started("job-2"));

        h.supervisor.start(&h.dispatcher);
        h.settle();
        let first = h.supervisor.active_generation().unwrap();

        h.supervisor.start(&h.dispatcher);
        h.settle();
        let second = h.supervisor.active_generation().unwrap();
        assert_ne!(first, second);
        assert_eq!(h.supervisor.status().job_id.as_deref(), Some("job-2"));

        // A result from the revoked poller is dropped
        h.supervisor.handle(
            JobEvent::Status {
                generation: first,
                result: status(JobState::Completed, 10, 10),
            },
            &h.dispatcher,
        );
        assert_eq!(h.supervisor.state(), JobState::Running);
        assert!(h.supervisor.is_polling());
    }

    #[test]
    fn test_restart_leaves_a_single_poller() {
        let mut h = Harness::new();
        h.fake.push_start(started("job-1"));
        h.fake.push_start(started("job-2"));

        h.supervisor.start(&h.dispatcher);
        h.settle();
        h.supervisor.start(&h.dispatcher);
        h.settle();
        let before = h.status_calls();

        // Unscripted polls fail, which keeps the new poller running
        h.advance(Duration::from_millis(9500));
        assert_eq!(h.status_calls(), before + 5);
        assert_eq!(h.supervisor.status().job_id.as_deref(), Some("job-2"));
    }

    #[test]
    fn test_stop_transport_error_keeps_polling() {
        let mut h = Harness::new();
        h.fake.push_start(started("job-1"));
        h.fake.push_status(status(JobState::Running, 1, 10));

        h.supervisor.start(&h.dispatcher);
        h.settle();
        h.settle();

        // No scripted reply: the stop request fails in transport
        h.supervisor.stop(&h.dispatcher);
        h.settle();

        assert!(h.supervisor.is_polling());
        assert_eq!(h.supervisor.state(), JobState::Running);
        assert_eq!(h.fake.count(|c| *c == ApiCall::StopCacheJob), 1);

        let calls = h.status_calls();
        h.advance(Duration::from_millis(2100));
        assert_eq!(h.status_calls(), calls + 1);
    }
}
