//! HTTP client for a running docent server.

use std::path::Path;
use std::time::Duration;

use docent_core::error::{DocentError, DocentResult};
use docent_core::types::{DocumentRecord, QuestionRequest, QuestionResponse};

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Server health as reported by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub ai_enabled: bool,
    pub version: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

/// Client for the docent REST API.
pub struct DocumentClient {
    client: Client,
    base_url: String,
}

impl DocumentClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> DocentResult<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client with a request timeout.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> DocentResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            DocentError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from `DOCENT_URL`, defaulting to `http://localhost:8000`.
    pub fn from_env() -> DocentResult<Self> {
        let base_url =
            std::env::var("DOCENT_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    /// Server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check server health.
    pub async fn health(&self) -> DocentResult<HealthStatus> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| DocentError::network(format!("Failed to reach server: {}", e)))?;

        parse(response).await
    }

    /// Upload a PDF from disk.
    pub async fn upload_file(&self, path: impl AsRef<Path>) -> DocentResult<DocumentRecord> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DocentError::invalid_input("Path has no filename"))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;

        self.upload_bytes(&filename, bytes).await
    }

    /// Upload PDF bytes under the given filename.
    pub async fn upload_bytes(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> DocentResult<DocumentRecord> {
        debug!(%filename, size = bytes.len(), "Uploading document");

        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")
            .map_err(|e| DocentError::Internal(format!("Invalid content type: {}", e)))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/documents", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| DocentError::network(format!("Failed to upload document: {}", e)))?;

        parse(response).await
    }

    /// List all documents.
    pub async fn list_documents(&self) -> DocentResult<Vec<DocumentRecord>> {
        let response = self
            .client
            .get(format!("{}/documents", self.base_url))
            .send()
            .await
            .map_err(|e| DocentError::network(format!("Failed to list documents: {}", e)))?;

        parse(response).await
    }

    /// Get one document.
    pub async fn get_document(&self, id: i64) -> DocentResult<DocumentRecord> {
        let response = self
            .client
            .get(format!("{}/documents/{}", self.base_url, id))
            .send()
            .await
            .map_err(|e| DocentError::network(format!("Failed to get document: {}", e)))?;

        parse(response).await
    }

    /// Delete a document.
    pub async fn delete_document(&self, id: i64) -> DocentResult<()> {
        let response = self
            .client
            .delete(format!("{}/documents/{}", self.base_url, id))
            .send()
            .await
            .map_err(|e| DocentError::network(format!("Failed to delete document: {}", e)))?;

        check(response).await?;
        Ok(())
    }

    /// Ask a question about a document.
    pub async fn ask(&self, document_id: i64, question: &str) -> DocentResult<QuestionResponse> {
        let request = QuestionRequest {
            document_id,
            question: question.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/questions", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| DocentError::network(format!("Failed to ask question: {}", e)))?;

        parse(response).await
    }
}

/// Turn a non-success response into a `DocentError`.
async fn check(response: Response) -> DocentResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => DocentError::from_api_error(
            status.as_u16(),
            parsed.error.code.as_deref(),
            &parsed.error.message,
        ),
        Err(_) => DocentError::from_http_status(status.as_u16(), &body),
    };
    Err(err)
}

async fn parse<T: DeserializeOwned>(response: Response) -> DocentResult<T> {
    check(response)
        .await?
        .json()
        .await
        .map_err(|e| DocentError::Internal(format!("Failed to parse response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = DocumentClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_health_status_deserializes() {
        let health: HealthStatus = serde_json::from_str(
            r#"{"status":"healthy","ai_enabled":true,"version":"0.1.0"}"#,
        )
        .unwrap();
        assert!(health.ai_enabled);
    }
}
