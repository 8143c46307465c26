//! PDF text extraction via pdfium.
//!
//! Extraction is best-effort. If the pdfium library cannot be loaded at
//! runtime, or a document cannot be parsed, the extractor returns an
//! error that callers downgrade to "no content text" rather than failing
//! the upload.

use async_trait::async_trait;
use bytes::Bytes;
use once_cell::sync::Lazy;
use pdfium_render::prelude::Pdfium;
use tracing::warn;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::traits::extract::TextExtractor;

static PDFIUM: Lazy<Option<Pdfium>> = Lazy::new(|| {
    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|err| warn!(error = ?err, "pdfium unavailable, content search disabled"))
        .ok()
});

/// Text extractor for PDF documents, backed by the system pdfium library.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new extractor. Binding to pdfium is lazy and shared.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, data: Bytes) -> AppResult<String> {
        let pdfium = PDFIUM
            .as_ref()
            .ok_or_else(|| AppError::storage("pdfium library not available"))?;

        let document = pdfium
            .load_pdf_from_byte_vec(data.to_vec(), None)
            .map_err(|e| AppError::storage(format!("Failed to parse PDF: {e}")))?;

        let mut text = String::new();
        for page in document.pages().iter() {
            let page_text = page
                .text()
                .map_err(|e| AppError::storage(format!("Failed to read page text: {e}")))?;
            text.push_str(&page_text.all());
            text.push('\n');
        }

        Ok(text)
    }
}
