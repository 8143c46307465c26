//! HTTP request handlers, organized by domain.

pub mod auth;
pub mod dataroom;
pub mod file;
pub mod folder;
pub mod health;
pub mod search;
