//! Document metadata store using SQLite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{DocentError, DocentResult};
use crate::traits::DocumentStore;
use crate::types::{DocumentRecord, NewDocument};

/// SQLite-based document store.
///
/// Pass `":memory:"` for a throwaway in-process database.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDocumentStore {
    /// Open (or create) the store at `db_path`.
    pub fn new(db_path: impl AsRef<Path>) -> DocentResult<Self> {
        let db_path = db_path.as_ref();

        let conn = if db_path.to_str() == Some(":memory:") {
            Connection::open_in_memory()
        } else {
            if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Connection::open(db_path)
        }
        .map_err(|e| DocentError::Database {
            message: e.to_string(),
            code: crate::error::ErrorCode::DbConnectionFailed,
            source: Some(Box::new(e)),
        })?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        store.create_table()?;

        Ok(store)
    }

    fn conn(&self) -> DocentResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DocentError::database("document store lock poisoned"))
    }

    /// Create the documents table if it doesn't exist.
    fn create_table(&self) -> DocentResult<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                filename     TEXT NOT NULL,
                file_path    TEXT NOT NULL,
                upload_date  TEXT NOT NULL
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_documents_filename ON documents(filename)",
            [],
        )?;

        Ok(())
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<DocumentRecord> {
        Ok(DocumentRecord {
            id: row.get(0)?,
            filename: row.get(1)?,
            file_path: row.get(2)?,
            upload_date: row.get::<_, DateTime<Utc>>(3)?,
        })
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn find(&self, id: i64) -> DocentResult<Option<DocumentRecord>> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                "SELECT id, filename, file_path, upload_date FROM documents WHERE id = ?1",
                [id],
                Self::row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    async fn create(&self, document: NewDocument) -> DocentResult<DocumentRecord> {
        let conn = self.conn()?;
        let upload_date = Utc::now();

        conn.execute(
            "INSERT INTO documents (filename, file_path, upload_date) VALUES (?1, ?2, ?3)",
            params![document.filename, document.file_path, upload_date],
        )?;

        Ok(DocumentRecord {
            id: conn.last_insert_rowid(),
            filename: document.filename,
            file_path: document.file_path,
            upload_date,
        })
    }

    async fn delete(&self, id: i64) -> DocentResult<bool> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM documents WHERE id = ?1", [id])?;
        Ok(removed > 0)
    }

    async fn list(&self) -> DocentResult<Vec<DocumentRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, filename, file_path, upload_date FROM documents ORDER BY id ASC",
        )?;

        let records = stmt.query_map([], Self::row_to_record)?;
        records
            .collect::<Result<Vec<_>, _>>()
            .map_err(DocentError::from)
    }
}
