//! Route definitions for the REST API.

mod documents;
mod health;
mod questions;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Document operations
        .route(
            "/documents",
            post(documents::upload_document).get(documents::list_documents),
        )
        .route(
            "/documents/:id",
            get(documents::get_document).delete(documents::delete_document),
        )
        // Questions
        .route("/questions", post(questions::ask_question))
        // Attach state
        .with_state(state)
}

pub use documents::*;
pub use health::*;
pub use questions::*;
