//! docent-core - Core library for docent.
//!
//! This crate provides the document text cache, the answer generator, the
//! metadata store, and the [`DocumentService`] that ties them to a text
//! extractor.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docent_core::{AnswerGenerator, DocumentService, SqliteDocumentStore};
//! use docent_extractors::PdfExtractor;
//!
//! let store = Arc::new(SqliteDocumentStore::new("pdf_qa.db")?);
//! let service = DocumentService::new(
//!     store,
//!     Arc::new(PdfExtractor::new()),
//!     AnswerGenerator::disabled(),
//!     "uploads",
//! );
//!
//! let record = service.upload("report.pdf", Some("application/pdf"), &bytes).await?;
//! let reply = service.ask(record.id, "What is the conclusion?").await?;
//! ```

pub mod answer;
pub mod cache;
pub mod config;
pub mod error;
pub mod prompts;
pub mod service;
pub mod store;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use answer::{AnswerGenerator, AnswerOptions};
pub use cache::DocumentCache;
pub use config::{DocentConfig, ServerConfig};
pub use error::{DocentError, DocentResult, ErrorCode};
pub use service::DocumentService;
pub use store::SqliteDocumentStore;
pub use traits::{DocumentStore, GenerationOptions, Llm, LlmConfig, LlmResponse};
pub use types::{
    DocumentRecord, Message, MessageRole, NewDocument, QuestionRequest, QuestionResponse,
};
