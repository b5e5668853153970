//! Core types for content extraction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Modality of original content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// PDF document.
    #[default]
    Pdf,
}

/// Source reference for original content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentSource {
    /// Content provided as bytes (no file reference).
    Bytes,
    /// Content from file path.
    Path(String),
}

/// Document structure metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Total page count, blank pages included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,

    /// Text of each kept page as `(1-based page number, text)`.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub pages: Vec<(usize, String)>,
}

/// Extracted content with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Page-delimited text of the whole document.
    pub text: String,

    /// Original content modality.
    pub modality: Modality,

    /// Document structure (if preserved).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<DocumentStructure>,

    /// Reference to original content.
    pub source: ContentSource,

    /// Additional metadata (format-specific).
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ExtractedContent {
    /// Create new extracted content.
    pub fn new(text: String, modality: Modality, source: ContentSource) -> Self {
        Self {
            text,
            modality,
            structure: None,
            source,
            metadata: HashMap::new(),
        }
    }

    /// Add structure information.
    pub fn with_structure(mut self, structure: DocumentStructure) -> Self {
        self.structure = Some(structure);
        self
    }

    /// Add metadata entry.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check if extraction produced meaningful content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Page numbers that contributed text, in document order.
    pub fn kept_pages(&self) -> Vec<usize> {
        self.structure
            .as_ref()
            .map(|s| s.pages.iter().map(|(n, _)| *n).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_content_is_empty() {
        let content = ExtractedContent::new(" \n\t".to_string(), Modality::Pdf, ContentSource::Bytes);
        assert!(content.is_empty());
        assert!(content.kept_pages().is_empty());
    }

    #[test]
    fn test_kept_pages_from_structure() {
        let content = ExtractedContent::new("x".to_string(), Modality::Pdf, ContentSource::Bytes)
            .with_structure(DocumentStructure {
                page_count: Some(3),
                pages: vec![(1, "a".to_string()), (3, "c".to_string())],
            })
            .with_metadata("original_size", 42);

        assert_eq!(content.kept_pages(), vec![1, 3]);
        assert_eq!(content.metadata["original_size"], 42);
    }
}
