//! Error types for docent operations.
//!
//! Expected failure modes (missing document, rejected upload, unusable PDF)
//! are explicit variants with stable error codes so callers can branch on
//! them instead of parsing messages.

use thiserror::Error;

use docent_extractors::ExtractError;

/// Result type alias for docent operations.
pub type DocentResult<T> = Result<T, DocentError>;

/// Main error type for all docent operations.
#[derive(Error, Debug)]
pub enum DocentError {
    /// Requested document has no metadata record.
    #[error("{message}")]
    NotFound {
        message: String,
        code: ErrorCode,
        document_id: Option<i64>,
    },

    /// Uploaded file or request failed validation.
    #[error("{message}")]
    InvalidInput {
        message: String,
        code: ErrorCode,
        suggestion: Option<String>,
    },

    /// The PDF contains no extractable text.
    #[error("Empty document: {message}")]
    EmptyDocument { message: String, code: ErrorCode },

    /// The file could not be opened or parsed as a PDF.
    #[error("Unreadable document: {message}")]
    CorruptOrUnreadable {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Calling or parsing the remote inference endpoint failed.
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Metadata store operation failed.
    #[error("Database error: {message}")]
    Database {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network error.
    #[error("Network error: {message}")]
    Network {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Documents (DOC_xxx)
    DocNotFound,

    // Validation (VAL_xxx)
    ValInvalidInput,
    ValNotPdf,

    // Extraction (EXT_xxx)
    ExtEmptyDocument,
    ExtUnreadable,

    // LLM (LLM_xxx)
    LlmConnectionFailed,
    LlmGenerationFailed,
    LlmInvalidResponse,
    LlmTimeout,

    // Database (DB_xxx)
    DbConnectionFailed,
    DbOperationFailed,

    // Network (NET_xxx)
    NetTimeout,
    NetConnectionFailed,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DocNotFound => "DOC_001",
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::ValNotPdf => "VAL_002",
            ErrorCode::ExtEmptyDocument => "EXT_001",
            ErrorCode::ExtUnreadable => "EXT_002",
            ErrorCode::LlmConnectionFailed => "LLM_001",
            ErrorCode::LlmGenerationFailed => "LLM_002",
            ErrorCode::LlmInvalidResponse => "LLM_003",
            ErrorCode::LlmTimeout => "LLM_004",
            ErrorCode::DbConnectionFailed => "DB_001",
            ErrorCode::DbOperationFailed => "DB_002",
            ErrorCode::NetTimeout => "NET_001",
            ErrorCode::NetConnectionFailed => "NET_002",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl DocentError {
    /// Create a not found error for a document id.
    pub fn not_found(document_id: i64) -> Self {
        Self::NotFound {
            message: "Document not found".to_string(),
            code: ErrorCode::DocNotFound,
            document_id: Some(document_id),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            suggestion: None,
        }
    }

    /// Create the error returned for uploads that are not PDFs.
    pub fn not_pdf() -> Self {
        Self::InvalidInput {
            message: "Only PDF files are allowed".to_string(),
            code: ErrorCode::ValNotPdf,
            suggestion: Some("Upload a file with a .pdf extension".to_string()),
        }
    }

    /// Create an empty document error.
    pub fn empty_document(message: impl Into<String>) -> Self {
        Self::EmptyDocument {
            message: message.into(),
            code: ErrorCode::ExtEmptyDocument,
        }
    }

    /// Create an unreadable document error.
    pub fn unreadable(message: impl Into<String>) -> Self {
        Self::CorruptOrUnreadable {
            message: message.into(),
            code: ErrorCode::ExtUnreadable,
            source: None,
        }
    }

    /// Create an LLM error.
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            code: ErrorCode::LlmGenerationFailed,
            source: None,
        }
    }

    /// Create an LLM timeout error.
    pub fn llm_timeout(seconds: u64) -> Self {
        Self::Llm {
            message: format!("request timed out after {}s", seconds),
            code: ErrorCode::LlmTimeout,
            source: None,
        }
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            code: ErrorCode::DbOperationFailed,
            source: None,
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            code: ErrorCode::NetConnectionFailed,
            source: None,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { code, .. } => *code,
            Self::InvalidInput { code, .. } => *code,
            Self::EmptyDocument { code, .. } => *code,
            Self::CorruptOrUnreadable { code, .. } => *code,
            Self::Llm { code, .. } => *code,
            Self::Database { code, .. } => *code,
            Self::Network { code, .. } => *code,
            _ => ErrorCode::Internal,
        }
    }

    /// Whether this error was caused by text extraction.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            Self::EmptyDocument { .. } | Self::CorruptOrUnreadable { .. }
        )
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::NotFound { .. } => Some("Please check the document ID and ensure it exists"),
            Self::InvalidInput { suggestion, .. } => suggestion.as_deref(),
            Self::EmptyDocument { .. } => {
                Some("The PDF may contain only scanned images; run OCR before uploading")
            }
            Self::Llm { .. } => Some("Please check your OpenRouter configuration"),
            _ => None,
        }
    }

    /// Rebuild an error from a REST error body.
    ///
    /// Extraction codes keep their variant; anything else falls back to
    /// [`from_http_status`](Self::from_http_status).
    pub fn from_api_error(status: u16, code: Option<&str>, message: &str) -> Self {
        match code {
            Some(code) if code == ErrorCode::ExtEmptyDocument.as_str() => {
                Self::empty_document(message)
            }
            Some(code) if code == ErrorCode::ExtUnreadable.as_str() => Self::unreadable(message),
            _ => Self::from_http_status(status, message),
        }
    }

    /// Convert from HTTP status code (for client errors).
    pub fn from_http_status(status: u16, body: &str) -> Self {
        match status {
            400 | 422 => Self::InvalidInput {
                message: body.to_string(),
                code: ErrorCode::ValInvalidInput,
                suggestion: None,
            },
            404 => Self::NotFound {
                message: body.to_string(),
                code: ErrorCode::DocNotFound,
                document_id: None,
            },
            _ => Self::Internal(format!("HTTP {}: {}", status, body)),
        }
    }
}

impl From<ExtractError> for DocentError {
    fn from(err: ExtractError) -> Self {
        if err.is_empty_document() {
            Self::empty_document(err.to_string())
        } else {
            Self::CorruptOrUnreadable {
                message: err.to_string(),
                code: ErrorCode::ExtUnreadable,
                source: Some(Box::new(err)),
            }
        }
    }
}

impl From<rusqlite::Error> for DocentError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            code: ErrorCode::DbOperationFailed,
            source: Some(Box::new(err)),
        }
    }
}
