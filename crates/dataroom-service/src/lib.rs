//! # dataroom-service
//!
//! Business logic for the DataRoom backend.
//!
//! ## Modules
//!
//! - `context` — the authenticated request context passed to every operation
//! - `dataroom` — dataroom CRUD and whole-room deletion
//! - `folder` — folder CRUD, materialized path maintenance, cascading deletion,
//!   and the full-structure tree view
//! - `file` — upload (with name collision resolution), download, rename,
//!   move, and deletion of files
//! - `search` — substring search over files and folders, and autocomplete
//! - `naming` — name validation and filename helpers

mod access;
pub mod context;
pub mod dataroom;
pub mod file;
pub mod folder;
pub mod naming;
pub mod search;

pub use context::RequestContext;
pub use dataroom::DataRoomService;
pub use file::{DownloadService, FileService, UploadService};
pub use folder::{FolderService, TreeService};
pub use search::SearchService;
