//! Single-open folder expansion.
//!
//! The accordion owns the expansion state for the whole tree, so "at most one
//! folder is expanded" holds by construction. Opening a folder materializes it
//! on first use; closing only hides it.

use crate::tree::{FolderId, FolderTree};

/// Side effects the caller has to carry out after a folder opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderOpened {
    pub folder: FolderId,
    /// Path for the thumbnail pre-generation request
    pub path: String,
    /// Whether this expansion built the item list
    pub materialized: bool,
}

/// Result of a toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccordionChange {
    Opened(FolderOpened),
    Closed(FolderId),
}

#[derive(Debug, Default)]
pub struct Accordion {
    expanded: Option<FolderId>,
}

impl Accordion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently expanded folder, if any
    pub fn expanded(&self) -> Option<FolderId> {
        self.expanded
    }

    pub fn is_expanded(&self, id: FolderId) -> bool {
        self.expanded == Some(id)
    }

    /// Expand if collapsed, collapse if expanded
    pub fn toggle(&mut self, tree: &mut FolderTree, id: FolderId) -> Option<AccordionChange> {
        if self.is_expanded(id) {
            self.collapse(id).then_some(AccordionChange::Closed(id))
        } else {
            self.expand(tree, id).map(AccordionChange::Opened)
        }
    }

    /// Open a folder, closing whichever folder was open before.
    ///
    /// Returns `None` for unknown folders and for the folder that is already open.
    pub fn expand(&mut self, tree: &mut FolderTree, id: FolderId) -> Option<FolderOpened> {
        if self.is_expanded(id) {
            return None;
        }
        let folder = tree.get_mut(id)?;

        // Previous folder collapses first; its items stay materialized
        self.expanded = None;

        let materialized = folder.materialize();
        let path = folder.path.clone();
        self.expanded = Some(id);

        Some(FolderOpened {
            folder: id,
            path,
            materialized,
        })
    }

    /// Close a folder. Returns false if it was not the open one.
    pub fn collapse(&mut self, id: FolderId) -> bool {
        if self.is_expanded(id) {
            self.expanded = None;
            true
        } else {
            false
        }
    }

    /// Drop state for a folder that no longer exists
    pub fn forget(&mut self, id: FolderId) {
        if self.is_expanded(id) {
            self.expanded = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::FolderListing;

    fn tree() -> (FolderTree, FolderId, FolderId) {
        let mut tree = FolderTree::new();
        let a = tree.add_folder("a".to_string(), vec!["1.jpg".to_string(), "2.jpg".to_string()]);
        let b = tree.add_folder("b".to_string(), vec!["3.mp4".to_string()]);
        (tree, a, b)
    }

    #[test]
    fn test_expand_materializes_once() {
        let (mut tree, a, _) = tree();
        let mut accordion = Accordion::new();

        let opened = accordion.expand(&mut tree, a).unwrap();
        assert!(opened.materialized);
        assert_eq!(opened.path, "a");

        assert_eq!(accordion.toggle(&mut tree, a), Some(AccordionChange::Closed(a)));
        match accordion.toggle(&mut tree, a) {
            Some(AccordionChange::Opened(opened)) => assert!(!opened.materialized),
            other => panic!("unexpected change: {:?}", other),
        }
        assert_eq!(tree.get(a).unwrap().items().len(), 2);
    }

    #[test]
    fn test_exclusivity_keeps_previous_items() {
        let (mut tree, a, b) = tree();
        let mut accordion = Accordion::new();

        accordion.expand(&mut tree, a);
        accordion.expand(&mut tree, b);

        assert!(!accordion.is_expanded(a));
        assert!(accordion.is_expanded(b));
        assert!(tree.get(a).unwrap().is_materialized());
        assert_eq!(tree.get(a).unwrap().items().len(), 2);
    }

    #[test]
    fn test_expand_already_open_is_noop() {
        let (mut tree, a, _) = tree();
        let mut accordion = Accordion::new();
        assert!(accordion.expand(&mut tree, a).is_some());
        assert!(accordion.expand(&mut tree, a).is_none());
        assert_eq!(accordion.expanded(), Some(a));
    }

    #[test]
    fn test_unknown_folder_is_ignored() {
        let mut tree = FolderTree::from_listings([FolderListing::new("x", Vec::new())]);
        let mut accordion = Accordion::new();
        assert!(accordion.expand(&mut tree, FolderId(42)).is_none());
        assert_eq!(accordion.expanded(), None);
    }

    #[test]
    fn test_forget_removed_folder() {
        let (mut tree, a, b) = tree();
        let mut accordion = Accordion::new();
        accordion.expand(&mut tree, a);
        accordion.forget(b);
        assert!(accordion.is_expanded(a));
        accordion.forget(a);
        assert_eq!(accordion.expanded(), None);
    }
}
