//! Trait seams between the core and its providers.

mod llm;
mod store;

pub use llm::{
    GenerationOptions, Llm, LlmConfig, LlmResponse, TokenUsage, DEFAULT_API_BASE, DEFAULT_MODEL,
};
pub use store::DocumentStore;
