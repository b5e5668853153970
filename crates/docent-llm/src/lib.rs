//! docent-llm - LLM provider implementations for docent.
//!
//! Answers are produced through any OpenAI-compatible chat-completions
//! endpoint. OpenRouter is the default.
//!
//! # Example
//!
//! ```ignore
//! use docent_llm::{LlmConfig, LlmFactory};
//!
//! let config = LlmConfig {
//!     api_key: std::env::var("OPENROUTER_API_KEY").ok(),
//!     ..Default::default()
//! };
//! let llm = LlmFactory::optional(&config)?;
//! ```

mod factory;
mod openrouter;

pub use factory::LlmFactory;
pub use openrouter::OpenRouterLlm;

// Re-export core types for convenience
pub use docent_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse};
