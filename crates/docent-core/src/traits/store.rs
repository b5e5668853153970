//! Document metadata store trait.

use async_trait::async_trait;

use crate::error::DocentResult;
use crate::types::{DocumentRecord, NewDocument};

/// Persistence for document metadata records.
///
/// The core only reads records (`find`, `list`) and removes them on
/// deletion or on a failed upload; it never updates them in place.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Look up a record by id.
    async fn find(&self, id: i64) -> DocentResult<Option<DocumentRecord>>;

    /// Insert a record and return it with its assigned id and timestamp.
    async fn create(&self, document: NewDocument) -> DocentResult<DocumentRecord>;

    /// Delete a record. Returns whether a record was removed.
    async fn delete(&self, id: i64) -> DocentResult<bool>;

    /// All records, ordered by id.
    async fn list(&self) -> DocentResult<Vec<DocumentRecord>>;
}
