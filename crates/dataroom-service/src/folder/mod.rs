//! Folder services: CRUD, path maintenance, cascade deletion, tree view.

pub mod service;
pub mod tree;

pub use service::{CreateFolderRequest, FolderContents, FolderService};
pub use tree::TreeService;
