mod action_bar;
mod confirm;
mod footer;
mod header;
mod help;
mod layout;
mod progress;
mod theme;
mod tools;
mod tree_view;

pub use action_bar::ActionBar;
pub use confirm::ConfirmDeleteView;
pub use footer::{Footer, NoticeLine};
pub use header::Header;
pub use help::HelpView;
pub use layout::AppLayout;
pub use progress::ProgressView;
pub use theme::Theme;
pub use tools::ToolsView;
pub use tree_view::FolderListView;
