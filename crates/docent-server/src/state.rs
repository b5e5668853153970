//! Server state management.

use std::sync::Arc;

use docent_core::DocumentService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DocumentService>,
}

impl AppState {
    /// Wrap a document service.
    pub fn new(service: DocumentService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Whether answers come from a remote model.
    pub fn ai_enabled(&self) -> bool {
        self.service.ai_enabled()
    }
}
