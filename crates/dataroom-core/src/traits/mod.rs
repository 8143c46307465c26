//! Collaborator traits implemented by the outer crates.

pub mod blob;
pub mod extract;

pub use blob::{BlobStore, ByteStream};
pub use extract::TextExtractor;
