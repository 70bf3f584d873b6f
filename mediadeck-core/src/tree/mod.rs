mod folders;
mod node;
mod selection;

pub use folders::{FolderListing, FolderTree};
pub use node::{
    FolderContent, FolderEntry, FolderId, MediaItem, ROOT_FOLDER, VIDEO_EXTENSIONS, is_video_path,
    join_path,
};
pub use selection::SelectionCounts;
