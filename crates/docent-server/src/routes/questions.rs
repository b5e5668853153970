//! Question answering endpoint.

use axum::{extract::State, Json};
use docent_core::types::{QuestionRequest, QuestionResponse};

use crate::error::ApiResult;
use crate::state::AppState;

/// Ask a question about an uploaded document.
/// POST /questions
pub async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> ApiResult<Json<QuestionResponse>> {
    let response = state
        .service
        .ask(request.document_id, &request.question)
        .await?;
    Ok(Json(response))
}
