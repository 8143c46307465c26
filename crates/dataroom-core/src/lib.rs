//! # dataroom-core
//!
//! Core crate for the DataRoom backend. Contains configuration schemas,
//! the unified error system, and the collaborator traits (blob storage,
//! text extraction) implemented by the outer crates.
//!
//! This crate has **no** internal dependencies on other DataRoom crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
