//! docent-server - REST API server for docent.
//!
//! Exposes PDF upload, listing, deletion and question answering over HTTP.
//!
//! # Example
//!
//! ```ignore
//! use docent_core::DocentConfig;
//! use docent_server::{create_server, create_service, AppState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = DocentConfig::from_env().unwrap();
//!     let state = AppState::new(create_service(&config).unwrap());
//!     let app = create_server(state, &config.server);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod error;
pub mod factory;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use factory::create_service;
pub use state::AppState;

use axum::{extract::DefaultBodyLimit, middleware as axum_middleware, Router};
use docent_core::config::ServerConfig;
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState, config: &ServerConfig) -> Router {
    routes::create_router(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer(&config.allowed_origins))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
