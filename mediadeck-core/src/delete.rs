//! Bulk deletion of the selected files.
//!
//! Deletion is a three-step exchange: the selection is resolved and held
//! while the user confirms, one request goes out, and the response is folded
//! back into the tree when it arrives.

use crate::accordion::Accordion;
use crate::error::ClientResult;
use crate::notice::Notice;
use crate::remote::{DeleteFilesResponse, Dispatcher};
use crate::tree::{FolderContent, FolderTree};

pub const NOTHING_SELECTED: &str = "Keine Dateien ausgewählt!";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeletePhase {
    #[default]
    Idle,
    /// Waiting for the user to confirm these paths
    Confirming { paths: Vec<String> },
    /// Request sent, response pending
    InFlight { requested: usize },
}

/// What a delete gesture led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteRequest {
    NothingSelected,
    Confirm { count: usize },
    /// Another deletion is still pending
    Busy,
}

/// Response to a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteEvent(pub ClientResult<DeleteFilesResponse>);

#[derive(Debug, Default)]
pub struct DeletionCoordinator {
    phase: DeletePhase,
}

impl DeletionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DeletePhase {
        &self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != DeletePhase::Idle
    }

    /// Confirmation question for the pending selection
    pub fn confirm_prompt(&self) -> Option<String> {
        match &self.phase {
            DeletePhase::Confirming { paths } => {
                Some(format!("{} Datei(en) wirklich löschen?", paths.len()))
            }
            _ => None,
        }
    }

    /// Resolve the selection and hold it for confirmation
    pub fn request(&mut self, tree: &FolderTree) -> DeleteRequest {
        if self.is_busy() {
            tracing::debug!(phase = ?self.phase, "delete already pending");
            return DeleteRequest::Busy;
        }

        let paths = tree.selected_paths();
        if paths.is_empty() {
            return DeleteRequest::NothingSelected;
        }

        let count = paths.len();
        self.phase = DeletePhase::Confirming { paths };
        DeleteRequest::Confirm { count }
    }

    /// Drop the pending confirmation. Returns false if nothing was pending.
    pub fn cancel(&mut self) -> bool {
        if matches!(self.phase, DeletePhase::Confirming { .. }) {
            self.phase = DeletePhase::Idle;
            true
        } else {
            false
        }
    }

    /// Send the confirmed paths in a single request
    pub fn confirm<M>(&mut self, dispatcher: &Dispatcher<M>) -> bool
    where
        M: From<DeleteEvent> + Send + 'static,
    {
        let DeletePhase::Confirming { paths } = std::mem::take(&mut self.phase) else {
            return false;
        };

        tracing::info!(count = paths.len(), "deleting files");
        self.phase = DeletePhase::InFlight {
            requested: paths.len(),
        };
        dispatcher.request(move |api| async move { DeleteEvent(api.delete_files(paths).await) });
        true
    }

    /// Apply the server's answer and describe the outcome
    pub fn handle(
        &mut self,
        event: DeleteEvent,
        tree: &mut FolderTree,
        accordion: &mut Accordion,
    ) -> Option<Notice> {
        let DeletePhase::InFlight { requested } = std::mem::take(&mut self.phase) else {
            tracing::debug!("ignoring unexpected delete response");
            return None;
        };

        let notice = match event.0 {
            Ok(response) if response.success => {
                let deleted = response.deleted_count.unwrap_or_default();
                if deleted as usize != requested {
                    tracing::warn!(requested, deleted, "server deleted a different number of files");
                }
                let removed = reconcile(tree, accordion);
                tracing::info!(deleted, folders_removed = removed, "delete finished");
                Notice::success(format!("✓ {} Datei(en) gelöscht", deleted))
            }
            Ok(response) => {
                let message = response.error.unwrap_or_else(|| "Unbekannt".to_string());
                tracing::warn!(error = %message, "delete refused by server");
                Notice::error(format!("❌ Fehler: {}", message))
            }
            Err(err) => {
                tracing::warn!(error = %err, "delete request failed");
                Notice::error(format!("❌ Fehler: {}", err))
            }
        };
        Some(notice)
    }
}

/// Remove the selection from the tree after a successful delete.
///
/// A checked folder that has nothing left disappears. Every other folder
/// loses its selected items and its checkbox. Returns the number of folders
/// removed.
pub fn reconcile(tree: &mut FolderTree, accordion: &mut Accordion) -> usize {
    let mut emptied = Vec::new();

    for folder in tree.iter_mut() {
        let was_selected = folder.selected;
        folder.remove_selected_items();

        let nothing_left = match &folder.content {
            // A checked deferred folder had all of its files in the request
            FolderContent::Deferred => was_selected,
            FolderContent::Materialized(items) => items.is_empty(),
        };

        if was_selected && nothing_left {
            emptied.push(folder.id);
        } else {
            folder.selected = false;
        }
    }

    for id in &emptied {
        tree.remove_folder(*id);
        accordion.forget(*id);
    }
    emptied.len()
}
