//! Document upload, listing and deletion endpoints.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use docent_core::types::DocumentRecord;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Multipart field carrying the PDF.
const FILE_FIELD: &str = "file";

/// Upload a PDF.
/// POST /documents
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<DocumentRecord>)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("Uploaded file has no filename"))?;
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        debug!(%filename, size = bytes.len(), "Received upload");

        let record = state
            .service
            .upload(&filename, content_type.as_deref(), &bytes)
            .await?;
        return Ok((StatusCode::CREATED, Json(record)));
    }

    Err(ApiError::bad_request("Missing multipart field 'file'"))
}

/// List all documents.
/// GET /documents
pub async fn list_documents(State(state): State<AppState>) -> ApiResult<Json<Vec<DocumentRecord>>> {
    Ok(Json(state.service.list().await?))
}

/// Get one document.
/// GET /documents/:id
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DocumentRecord>> {
    Ok(Json(state.service.get(id).await?))
}

/// Delete a document, its stored file and cached text.
/// DELETE /documents/:id
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
