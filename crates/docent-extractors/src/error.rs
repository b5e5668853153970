//! Extraction error types.

use thiserror::Error;

/// Errors that can occur during content extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Content type is not supported by the extractor.
    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    /// Extracted content is empty (e.g. a scanned PDF without OCR).
    #[error("No text content found in PDF")]
    EmptyContent,

    /// IO error while reading the document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be parsed as a PDF.
    #[cfg(feature = "pdf")]
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// Task join error from spawn_blocking (includes parser panics).
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ExtractError {
    /// Whether the failure means the document had no extractable text,
    /// as opposed to being unreadable.
    pub fn is_empty_document(&self) -> bool {
        matches!(self, ExtractError::EmptyContent)
    }
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
