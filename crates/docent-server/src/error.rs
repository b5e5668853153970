//! Error handling for the REST API server.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docent_core::error::DocentError;
use serde::Serialize;
use serde_json::json;
use std::fmt;
use tracing::error;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

// Convert from docent-core errors
impl From<DocentError> for ApiError {
    fn from(err: DocentError) -> Self {
        let code = err.code().as_str();
        let suggestion = err.suggestion().map(str::to_string);

        let api_error = match err {
            DocentError::NotFound { message, .. } => {
                ApiError::new(StatusCode::NOT_FOUND, code, message)
            }
            DocentError::InvalidInput { message, .. } => {
                ApiError::new(StatusCode::BAD_REQUEST, code, message)
            }
            DocentError::EmptyDocument { message, .. }
            | DocentError::CorruptOrUnreadable { message, .. } => {
                error!(code, %message, "Document processing failed");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    code,
                    format!("Failed to process document: {}", message),
                )
            }
            DocentError::Llm { message, .. } => {
                ApiError::new(StatusCode::BAD_GATEWAY, code, format!("LLM error: {}", message))
            }
            DocentError::Database { message, .. } => {
                ApiError::internal(format!("Database error: {}", message))
            }
            DocentError::Network { message, .. } => {
                ApiError::internal(format!("Network error: {}", message))
            }
            DocentError::Configuration(msg) => {
                ApiError::internal(format!("Configuration error: {}", msg))
            }
            DocentError::Serialization(e) => {
                ApiError::internal(format!("Serialization error: {}", e))
            }
            DocentError::Io(e) => ApiError::internal(format!("IO error: {}", e)),
            DocentError::Internal(msg) => ApiError::internal(msg),
        };

        match suggestion {
            Some(suggestion) => api_error.with_details(json!({ "suggestion": suggestion })),
            None => api_error,
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::new(err.status(), "INVALID_UPLOAD", err.body_text())
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(DocentError::not_found(999));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "DOC_001");
        assert_eq!(err.message, "Document not found");
    }

    #[test]
    fn test_not_pdf_maps_to_400() {
        let err = ApiError::from(DocentError::not_pdf());
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Only PDF files are allowed");
        assert!(err.details.is_some());
    }

    #[test]
    fn test_extraction_failure_maps_to_500() {
        let err = ApiError::from(DocentError::empty_document("No text content found in PDF"));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.message,
            "Failed to process document: No text content found in PDF"
        );
    }
}
