//! Document metadata store implementations.

mod sqlite;

pub use sqlite::SqliteDocumentStore;
