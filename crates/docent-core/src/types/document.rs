//! Document metadata and question/answer payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted description of an uploaded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Unique id assigned by the store.
    pub id: i64,
    /// Original filename as uploaded.
    pub filename: String,
    /// Where the PDF is stored on disk.
    pub file_path: String,
    /// When the record was created.
    pub upload_date: DateTime<Utc>,
}

/// Insertion payload for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub filename: String,
    pub file_path: String,
}

impl NewDocument {
    pub fn new(filename: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            file_path: file_path.into(),
        }
    }
}

/// A question about one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub document_id: i64,
    pub question: String,
}

/// The generated answer, echoing the question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub answer: String,
    pub document_id: i64,
    pub question: String,
}
