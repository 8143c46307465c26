//! # dataroom-storage
//!
//! Blob storage backends and document text extraction.
//!
//! Implements the [`dataroom_core::traits::blob::BlobStore`] and
//! [`dataroom_core::traits::extract::TextExtractor`] traits defined in
//! the core crate.

pub mod extract;
pub mod local;

pub use dataroom_core::traits::blob::allocate_locator;
pub use extract::PdfTextExtractor;
pub use local::LocalBlobStore;
