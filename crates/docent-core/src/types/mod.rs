//! Core data types.

mod document;
mod message;

pub use document::{DocumentRecord, NewDocument, QuestionRequest, QuestionResponse};
pub use message::{Message, MessageRole};
