//! # dataroom-entity
//!
//! Domain entities for the DataRoom backend: users, datarooms, the
//! folder/file hierarchy, and search result types.

pub mod dataroom;
pub mod file;
pub mod folder;
pub mod search;
pub mod user;
