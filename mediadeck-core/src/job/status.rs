use serde::Deserialize;

use crate::remote::JobStatusData;

/// Lifecycle of the server-side cache rebuild job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum JobState {
    #[default]
    NotStarted,
    Running,
    Completed,
    Error,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Completed | JobState::Error)
    }
}

/// Last known state of the tracked job
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobStatus {
    pub state: JobState,
    pub job_id: Option<String>,
    /// Percent complete, 0-100
    pub progress: f64,
    pub processed_folders: u64,
    pub total_folders: u64,
    pub updated_folders: u64,
    pub valid_folders: u64,
    pub current_folder: Option<String>,
    /// Elapsed seconds as reported by the server
    pub duration: f64,
    pub error: Option<String>,
}

impl JobStatus {
    /// Fresh status for a job the server just accepted
    pub fn started(job_id: String) -> Self {
        Self {
            state: JobState::Running,
            job_id: Some(job_id),
            ..Self::default()
        }
    }

    /// Take over a poll response. The job ID is kept.
    pub fn apply(&mut self, data: &JobStatusData) {
        self.state = data.status;
        self.progress = data.progress;
        self.processed_folders = data.processed_folders;
        self.total_folders = data.total_folders;
        self.updated_folders = data.updated_folders;
        self.valid_folders = data.valid_folders;
        self.current_folder = data.current_folder.clone();
        self.duration = data.duration;
        self.error = data.error.clone();
    }

    /// Progress as a ratio for gauges
    pub fn ratio(&self) -> f64 {
        (self.progress / 100.0).clamp(0.0, 1.0)
    }

    /// Display lines for the tools overlay. Empty while nothing is known.
    pub fn lines(&self) -> Vec<String> {
        match self.state {
            JobState::NotStarted => Vec::new(),
            JobState::Running => {
                let mut lines = vec![
                    "⏳ Cache-Rebuild läuft...".to_string(),
                    format!(
                        "{}% ({} / {} Ordner)",
                        self.progress, self.processed_folders, self.total_folders
                    ),
                    self.counters(),
                ];
                if let Some(folder) = &self.current_folder {
                    lines.push(format!("Aktuell: {}", folder));
                }
                lines.push(format!("Laufzeit: {}s", self.duration));
                lines
            }
            JobState::Completed => vec![
                "✓ Cache-Rebuild abgeschlossen!".to_string(),
                format!("{} Ordner verarbeitet", self.total_folders),
                self.counters(),
                format!("Dauer: {}s", self.duration),
            ],
            JobState::Error => vec![format!(
                "❌ Fehler: {}",
                self.error.as_deref().unwrap_or("Unbekannt")
            )],
        }
    }

    fn counters(&self) -> String {
        format!(
            "✓ Aktualisiert: {} | ✓ Valide: {}",
            self.updated_folders, self.valid_folders
        )
    }
}
