//! The state owner the front end talks to.
//!
//! Every gesture is a synchronous method that mutates the model first and
//! then, where needed, hands a request to the dispatcher. Responses are
//! queued and only applied by [`Session::pump`], so the model never changes
//! behind the caller's back.

use std::sync::Arc;

use crossbeam_channel::Receiver;
use tokio::runtime::Handle;

use crate::accordion::{Accordion, AccordionChange, FolderOpened};
use crate::config::ClientConfig;
use crate::delete::{DeleteEvent, DeleteRequest, DeletionCoordinator, NOTHING_SELECTED};
use crate::error::ClientResult;
use crate::heartbeat::{Heartbeat, HeartbeatEvent, ServerStatus};
use crate::job::{CacheStats, JobEvent, JobSupervisor};
use crate::notice::Notice;
use crate::remote::{Acknowledgement, CacheStatsData, Dispatcher, Envelope, MediaApi};
use crate::tree::{FolderId, FolderTree, SelectionCounts};

/// A finished network call waiting to be applied
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Delete(DeleteEvent),
    FolderOpened {
        path: String,
        result: ClientResult<Acknowledgement>,
    },
    Job(JobEvent),
    Heartbeat(HeartbeatEvent),
    CacheStats(ClientResult<Envelope<CacheStatsData>>),
}

impl From<DeleteEvent> for Completion {
    fn from(event: DeleteEvent) -> Self {
        Completion::Delete(event)
    }
}

impl From<JobEvent> for Completion {
    fn from(event: JobEvent) -> Self {
        Completion::Job(event)
    }
}

impl From<HeartbeatEvent> for Completion {
    fn from(event: HeartbeatEvent) -> Self {
        Completion::Heartbeat(event)
    }
}

pub struct Session {
    tree: FolderTree,
    accordion: Accordion,
    deletion: DeletionCoordinator,
    job: JobSupervisor,
    heartbeat: Heartbeat,
    cache_stats: CacheStats,
    notice: Option<Notice>,
    dispatcher: Dispatcher<Completion>,
    completions: Receiver<Completion>,
}

impl Session {
    pub fn new(
        tree: FolderTree,
        api: Arc<dyn MediaApi>,
        runtime: Handle,
        config: &ClientConfig,
    ) -> Self {
        let (dispatcher, completions) = Dispatcher::channel(runtime, api);
        let mut heartbeat = Heartbeat::new(config.heartbeat_interval);
        if config.heartbeat {
            heartbeat.start(&dispatcher);
        }

        tracing::info!(
            folders = tree.len(),
            files = tree.total_files(),
            "session started"
        );

        Self {
            tree,
            accordion: Accordion::new(),
            deletion: DeletionCoordinator::new(),
            job: JobSupervisor::new(config.poll_interval),
            heartbeat,
            cache_stats: CacheStats::default(),
            notice: None,
            dispatcher,
            completions,
        }
    }

    pub fn tree(&self) -> &FolderTree {
        &self.tree
    }

    pub fn accordion(&self) -> &Accordion {
        &self.accordion
    }

    pub fn job(&self) -> &JobSupervisor {
        &self.job
    }

    pub fn cache_stats(&self) -> &CacheStats {
        &self.cache_stats
    }

    pub fn server_status(&self) -> ServerStatus {
        self.heartbeat.status()
    }

    /// Most recent user-facing message
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // --- accordion ---

    /// Expand or collapse a folder
    pub fn toggle_folder(&mut self, id: FolderId) -> Option<AccordionChange> {
        let change = self.accordion.toggle(&mut self.tree, id)?;
        if let AccordionChange::Opened(opened) = &change {
            self.announce_open(opened);
        }
        Some(change)
    }

    pub fn expand_folder(&mut self, id: FolderId) -> Option<FolderOpened> {
        let opened = self.accordion.expand(&mut self.tree, id)?;
        self.announce_open(&opened);
        Some(opened)
    }

    pub fn collapse_folder(&mut self, id: FolderId) -> bool {
        self.accordion.collapse(id)
    }

    /// Fire-and-forget hint so the server can prepare thumbnails
    fn announce_open(&self, opened: &FolderOpened) {
        let path = opened.path.clone();
        tracing::debug!(%path, materialized = opened.materialized, "folder opened");
        self.dispatcher.request(move |api| async move {
            let result = api.open_folder(path.clone()).await;
            Completion::FolderOpened { path, result }
        });
    }

    // --- selection ---

    /// Checkboxes are frozen while a delete is pending, so the tree is
    /// reconciled against exactly the selection that was sent.
    pub fn selection_locked(&self) -> bool {
        self.deletion.is_busy()
    }

    pub fn set_folder_selected(&mut self, id: FolderId, checked: bool) {
        if !self.selection_locked() {
            self.tree.set_folder_selected(id, checked);
        }
    }

    pub fn toggle_folder_selected(&mut self, id: FolderId) {
        if let Some(folder) = self.tree.get(id) {
            let checked = !folder.selected;
            self.set_folder_selected(id, checked);
        }
    }

    pub fn set_item_selected(&mut self, id: FolderId, index: usize, checked: bool) {
        if !self.selection_locked() {
            self.tree.set_item_selected(id, index, checked);
        }
    }

    pub fn toggle_item_selected(&mut self, id: FolderId, index: usize) {
        let current = self
            .tree
            .get(id)
            .and_then(|f| f.items().get(index))
            .map(|item| item.selected);
        if let Some(selected) = current {
            self.set_item_selected(id, index, !selected);
        }
    }

    pub fn select_all(&mut self) {
        if !self.selection_locked() {
            self.tree.select_all();
        }
    }

    pub fn select_none(&mut self) {
        if !self.selection_locked() {
            self.tree.select_none();
        }
    }

    pub fn invert_selection(&mut self) {
        if !self.selection_locked() {
            self.tree.invert_selection();
        }
    }

    pub fn selection_counts(&self) -> SelectionCounts {
        self.tree.selection_counts()
    }

    pub fn selected_paths(&self) -> Vec<String> {
        self.tree.selected_paths()
    }

    /// Whether the bulk action bar should be shown
    pub fn action_bar_visible(&self) -> bool {
        self.accordion.expanded().is_some() || self.tree.any_folder_selected()
    }

    // --- deletion ---

    pub fn request_delete(&mut self) -> DeleteRequest {
        let request = self.deletion.request(&self.tree);
        if request == DeleteRequest::NothingSelected {
            self.notice = Some(Notice::info(NOTHING_SELECTED));
        }
        request
    }

    /// Question to show while a delete waits for confirmation
    pub fn delete_prompt(&self) -> Option<String> {
        self.deletion.confirm_prompt()
    }

    pub fn delete_in_progress(&self) -> bool {
        self.deletion.is_busy()
    }

    pub fn confirm_delete(&mut self) -> bool {
        self.deletion.confirm(&self.dispatcher)
    }

    pub fn cancel_delete(&mut self) -> bool {
        self.deletion.cancel()
    }

    // --- cache tools ---

    pub fn start_job(&mut self) {
        self.job.start(&self.dispatcher);
    }

    pub fn stop_job(&mut self) {
        self.job.stop(&self.dispatcher);
    }

    pub fn refresh_cache_stats(&mut self) {
        self.cache_stats = CacheStats::Loading;
        self.dispatcher
            .request(|api| async move { Completion::CacheStats(api.cache_stats().await) });
    }

    /// Apply every queued completion in arrival order. Returns how many.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Delete(event) => {
                if let Some(notice) =
                    self.deletion
                        .handle(event, &mut self.tree, &mut self.accordion)
                {
                    self.notice = Some(notice);
                }
            }
            Completion::FolderOpened { path, result } => match result {
                Ok(_) => tracing::debug!(%path, "folder open acknowledged"),
                Err(err) => tracing::warn!(%path, error = %err, "folder open notification failed"),
            },
            Completion::Job(event) => self.job.handle(event, &self.dispatcher),
            Completion::Heartbeat(event) => self.heartbeat.handle(event),
            Completion::CacheStats(result) => self.cache_stats.apply(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::job::JobState;
    use crate::remote::testing::{ApiCall, FakeApi};
    use crate::remote::{DeleteFilesResponse, JobStatusData, StartJobData};
    use crate::tree::FolderListing;

    use std::time::Duration;

    use tokio::runtime::{Builder, Runtime};
    use tokio::time::sleep;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn runtime() -> Runtime {
        Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap()
    }

    fn session(rt: &Runtime, fake: &Arc<FakeApi>, heartbeat: bool) -> Session {
        let tree = FolderTree::from_listings([
            FolderListing::new(".", names(&["root.png"])),
            FolderListing::new("gallery", names(&["a.jpg", "b.mp4"])),
        ]);
        let config = ClientConfig {
            heartbeat,
            ..ClientConfig::default()
        };
        Session::new(tree, fake.clone(), rt.handle().clone(), &config)
    }

    fn wait(rt: &Runtime, session: &mut Session, by: Duration) -> usize {
        rt.block_on(async { sleep(by).await });
        session.pump()
    }

    fn gallery(session: &Session) -> FolderId {
        session.tree().find_by_path("gallery").map(|f| f.id).unwrap()
    }

    #[test]
    fn test_expand_notifies_server_once_per_open() {
        let rt = runtime();
        let fake = FakeApi::new();
        let mut session = session(&rt, &fake, false);
        let id = gallery(&session);

        assert!(!session.action_bar_visible());
        session.toggle_folder(id);
        assert!(session.action_bar_visible());
        assert!(session.tree().get(id).unwrap().is_materialized());

        session.toggle_folder(id);
        assert!(!session.action_bar_visible());

        // Open failure is only logged
        wait(&rt, &mut session, Duration::from_millis(1));
        assert_eq!(
            fake.calls(),
            vec![ApiCall::OpenFolder("gallery".to_string())]
        );
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_action_bar_follows_folder_checkbox() {
        let rt = runtime();
        let fake = FakeApi::new();
        let mut session = session(&rt, &fake, false);
        let id = gallery(&session);

        session.toggle_folder_selected(id);
        assert!(session.action_bar_visible());
        session.toggle_folder_selected(id);
        assert!(!session.action_bar_visible());
    }

    #[test]
    fn test_empty_delete_shows_notice_without_call() {
        let rt = runtime();
        let fake = FakeApi::new();
        let mut session = session(&rt, &fake, false);

        assert_eq!(session.request_delete(), DeleteRequest::NothingSelected);
        assert_eq!(session.notice().map(|n| n.text.as_str()), Some(NOTHING_SELECTED));
        assert!(!session.confirm_delete());

        wait(&rt, &mut session, Duration::from_millis(1));
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn test_delete_flow_through_session() {
        let rt = runtime();
        let fake = FakeApi::new();
        fake.push_delete(Ok(DeleteFilesResponse {
            success: true,
            deleted_count: Some(2),
            error: None,
        }));
        let mut session = session(&rt, &fake, false);
        let id = gallery(&session);

        session.set_folder_selected(id, true);
        session.expand_folder(id);
        assert_eq!(session.request_delete(), DeleteRequest::Confirm { count: 2 });
        assert_eq!(session.delete_prompt().as_deref(), Some("2 Datei(en) wirklich löschen?"));
        assert!(session.confirm_delete());
        assert!(session.delete_in_progress());

        wait(&rt, &mut session, Duration::from_millis(1));

        assert!(!session.delete_in_progress());
        assert!(session.tree().find_by_path("gallery").is_none());
        assert_eq!(session.selection_counts(), SelectionCounts::default());
        assert_eq!(
            session.notice(),
            Some(&Notice::success("✓ 2 Datei(en) gelöscht"))
        );
        assert!(!session.action_bar_visible());
    }

    #[test]
    fn test_item_toggle_through_session() {
        let rt = runtime();
        let fake = FakeApi::new();
        let mut session = session(&rt, &fake, false);
        let id = gallery(&session);

        session.set_folder_selected(id, true);
        session.expand_folder(id);
        session.toggle_item_selected(id, 1);

        assert_eq!(session.selection_counts(), SelectionCounts { folders: 1, files: 1 });
        assert_eq!(session.selected_paths(), vec!["gallery/a.jpg"]);
    }

    #[test]
    fn test_job_runs_to_completion() {
        let rt = runtime();
        let fake = FakeApi::new();
        fake.push_start(Ok(Envelope::ok(StartJobData {
            job_id: "job-1".to_string(),
        })));
        fake.push_status(Ok(Envelope::ok(JobStatusData {
            status: JobState::Completed,
            progress: 100.0,
            processed_folders: 10,
            total_folders: 10,
            ..JobStatusData::default()
        })));
        let mut session = session(&rt, &fake, false);

        session.start_job();
        wait(&rt, &mut session, Duration::from_millis(1));
        assert_eq!(session.job().state(), JobState::Running);

        wait(&rt, &mut session, Duration::from_millis(1));
        assert_eq!(session.job().state(), JobState::Completed);

        wait(&rt, &mut session, Duration::from_secs(10));
        assert_eq!(fake.count(|c| *c == ApiCall::CacheJobStatus), 1);
    }

    #[test]
    fn test_cache_stats_and_heartbeat() {
        let rt = runtime();
        let fake = FakeApi::new();
        fake.push_stats(Err(ClientError::Transport("connection refused".to_string())));
        let mut session = session(&rt, &fake, true);
        assert_eq!(session.server_status(), ServerStatus::Unknown);

        session.refresh_cache_stats();
        assert_eq!(session.cache_stats(), &CacheStats::Loading);

        wait(&rt, &mut session, Duration::from_millis(1));
        assert_eq!(session.server_status(), ServerStatus::Online);
        assert_eq!(session.cache_stats().lines(), vec!["❌ connection refused"]);
    }

    #[test]
    fn test_selection_frozen_while_delete_pending() {
        let rt = runtime();
        let fake = FakeApi::new();
        fake.push_delete(Ok(DeleteFilesResponse {
            success: true,
            deleted_count: Some(2),
            error: None,
        }));
        let mut session = session(&rt, &fake, false);
        let id = gallery(&session);
        let root = session.tree().find_by_path(".").map(|f| f.id).unwrap();

        session.set_folder_selected(id, true);
        session.request_delete();
        assert!(session.confirm_delete());
        assert!(session.selection_locked());

        // Gestures during the request do not reach the tree
        session.toggle_folder_selected(root);
        session.select_all();
        assert_eq!(session.selection_counts(), SelectionCounts { folders: 1, files: 2 });

        wait(&rt, &mut session, Duration::from_millis(1));
        assert!(!session.selection_locked());
        assert!(session.tree().find_by_path("gallery").is_none());
        let root_folder = session.tree().get(root).unwrap();
        assert!(!root_folder.selected);
        assert_eq!(root_folder.file_count(), 1);

        session.toggle_folder_selected(root);
        assert!(session.tree().get(root).unwrap().selected);
    }
}
