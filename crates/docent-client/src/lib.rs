//! docent-client - Client library for the docent REST API.
//!
//! # Example
//!
//! ```ignore
//! use docent_client::DocumentClient;
//!
//! let client = DocumentClient::new("http://localhost:8000")?;
//!
//! let record = client.upload_file("report.pdf").await?;
//! let reply = client.ask(record.id, "What is the conclusion?").await?;
//! println!("{}", reply.answer);
//! ```

mod client;

pub use client::{DocumentClient, HealthStatus};
pub use docent_core::types::{DocumentRecord, QuestionResponse};
