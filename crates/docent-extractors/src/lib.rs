//! docent-extractors - Text extraction for uploaded documents.
//!
//! Provides the [`Extractor`] trait and a PDF implementation that turns a
//! document into a single page-delimited text blob.
//!
//! # Features
//!
//! - `pdf` (default) - PDF text extraction via pdf-extract
//!
//! # Example
//!
//! ```ignore
//! use docent_extractors::{Extractor, PdfExtractor};
//!
//! let pdf = PdfExtractor::new();
//! let content = pdf.extract_file("uploads/report.pdf".as_ref()).await?;
//! println!("{}", content.text);
//! ```

mod error;
mod types;

#[cfg(feature = "pdf")]
mod pdf;

pub use error::{ExtractError, ExtractResult};
pub use types::{ContentSource, DocumentStructure, ExtractedContent, Modality};

#[cfg(feature = "pdf")]
pub use pdf::{page_marker, PdfExtractor};

use std::path::Path;

use async_trait::async_trait;

/// Core Extractor trait - all content extractors implement this.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract text content from bytes.
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent>;

    /// Extract text content from a file on disk.
    ///
    /// The file is read fully and its handle released before parsing starts.
    async fn extract_file(&self, path: &Path) -> ExtractResult<ExtractedContent> {
        let bytes = tokio::fs::read(path).await?;
        let mut content = self.extract(&bytes).await?;
        content.source = ContentSource::Path(path.display().to_string());
        Ok(content)
    }

    /// Supported MIME types for this extractor.
    fn supported_types(&self) -> &[&str];

    /// Check if this extractor handles the given MIME type.
    fn supports(&self, mime_type: &str) -> bool {
        self.supported_types().contains(&mime_type)
    }

    /// Human-readable name for this extractor.
    fn name(&self) -> &str;
}
