//! PDF content extraction using pdf-extract.

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ContentSource, DocumentStructure, ExtractedContent, Modality};
use crate::Extractor;
use async_trait::async_trait;
use tracing::{debug, info};

/// Human-readable marker placed before each kept page.
pub fn page_marker(page_number: usize) -> String {
    format!("\n--- Page {} ---\n", page_number)
}

/// PDF content extractor using pdf-extract library.
///
/// Produces one string with every non-blank page in document order, each
/// preceded by a [`page_marker`]. Wraps synchronous pdf-extract calls in
/// spawn_blocking to avoid blocking the async runtime.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create new PDF extractor.
    pub fn new() -> Self {
        Self
    }

    /// Split the document into per-page text (called within spawn_blocking).
    fn pages_sync(content: Vec<u8>) -> Result<Vec<String>, ExtractError> {
        pdf_extract::extract_text_from_mem_by_pages(&content)
            .map_err(|e| ExtractError::Pdf(e.to_string()))
    }

    /// Join page texts into the marked-up document text.
    ///
    /// Returns the text and the `(page number, text)` pairs that were kept.
    fn assemble(&self, pages: Vec<String>) -> (String, Vec<(usize, String)>) {
        let mut text = String::new();
        let mut kept = Vec::new();

        for (index, page_text) in pages.into_iter().enumerate() {
            let page_number = index + 1;
            if page_text.trim().is_empty() {
                debug!(page = page_number, "Skipping blank page");
                continue;
            }
            text.push_str(&page_marker(page_number));
            text.push_str(&page_text);
            kept.push((page_number, page_text));
        }

        (text, kept)
    }
}

#[async_trait]
impl Extractor for PdfExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();

        let pages = tokio::task::spawn_blocking(move || Self::pages_sync(content)).await??;
        let page_count = pages.len();

        let (text, kept) = self.assemble(pages);
        if text.trim().is_empty() || kept.iter().all(|(_, t)| t.trim().is_empty()) {
            return Err(ExtractError::EmptyContent);
        }

        info!(
            pages = page_count,
            kept_pages = kept.len(),
            chars = text.chars().count(),
            "Extracted text from PDF"
        );

        let kept_numbers: Vec<usize> = kept.iter().map(|(n, _)| *n).collect();
        let structure = DocumentStructure {
            page_count: Some(page_count),
            pages: kept,
        };

        Ok(ExtractedContent::new(text, Modality::Pdf, ContentSource::Bytes)
            .with_structure(structure)
            .with_metadata("original_size", content_len)
            .with_metadata("kept_pages", kept_numbers))
    }

    fn supported_types(&self) -> &[&str] {
        &["application/pdf"]
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}
