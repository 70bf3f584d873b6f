/// User actions that can be performed in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move cursor up
    MoveUp,
    /// Move cursor down
    MoveDown,
    /// Move cursor up by a page
    PageUp,
    /// Move cursor down by a page
    PageDown,
    /// Go to first row
    GoToFirst,
    /// Go to last row
    GoToLast,
    /// Expand folder under the cursor
    Expand,
    /// Collapse folder under the cursor (or the folder of the item)
    Collapse,
    /// Toggle expand/collapse
    ToggleExpand,
    /// Toggle the checkbox under the cursor
    ToggleCheck,
    /// Check every folder and item
    SelectAll,
    /// Uncheck everything
    SelectNone,
    /// Invert all checkboxes
    InvertSelection,
    /// Request delete (show confirmation dialog)
    Delete,
    /// Confirm delete operation
    ConfirmDelete,
    /// Cancel delete operation
    CancelDelete,
    /// Show help overlay
    ShowHelp,
    /// Hide help overlay
    HideHelp,
    /// Show cache tools overlay
    ShowTools,
    /// Hide cache tools overlay
    HideTools,
    /// Start the cache rebuild job
    StartJob,
    /// Stop the cache rebuild job
    StopJob,
    /// Reload cache statistics
    RefreshStats,
    /// Quit the application
    Quit,
    /// No action (for tick events)
    Tick,
}
