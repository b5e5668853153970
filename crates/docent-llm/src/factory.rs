//! Factory for creating LLM providers.

use std::sync::Arc;

use docent_core::error::DocentResult;
use docent_core::traits::{Llm, LlmConfig};
use tracing::info;

use crate::openrouter::OpenRouterLlm;

/// Factory for creating LLM providers.
pub struct LlmFactory;

impl LlmFactory {
    /// Create an LLM provider from the given configuration.
    ///
    /// Fails with a configuration error when no API key is set.
    pub fn create(config: &LlmConfig) -> DocentResult<Arc<dyn Llm>> {
        let llm = OpenRouterLlm::new(config.clone())?;
        info!(model = %config.model, base = %config.api_base(), "LLM provider configured");
        Ok(Arc::new(llm))
    }

    /// Create a provider if an API key is configured, `None` otherwise.
    pub fn optional(config: &LlmConfig) -> DocentResult<Option<Arc<dyn Llm>>> {
        match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Self::create(config).map(Some),
            _ => Ok(None),
        }
    }
}
