//! # dataroom-database
//!
//! PostgreSQL connection management, the entity store traits consumed by
//! the service layer, concrete Postgres repositories, and an in-memory
//! store used by unit tests and local development.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{DataRoomStore, FileStore, FolderStore, UserStore};
