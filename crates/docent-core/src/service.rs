//! Document service: upload, lookup, deletion and question answering.
//!
//! Ties the metadata store, the on-disk upload directory, the text
//! extractor, the text cache and the answer generator together. Transport
//! layers call into this and only map the returned errors.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use docent_extractors::Extractor;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::answer::AnswerGenerator;
use crate::cache::DocumentCache;
use crate::error::{DocentError, DocentResult};
use crate::traits::DocumentStore;
use crate::types::{DocumentRecord, NewDocument, QuestionResponse};

/// Content types accepted for uploads besides what the extractor advertises.
const GENERIC_UPLOAD_TYPES: &[&str] = &["application/octet-stream", "application/x-pdf"];

/// Orchestrates document storage, extraction and answering.
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    extractor: Arc<dyn Extractor>,
    cache: DocumentCache,
    answerer: AnswerGenerator,
    upload_dir: PathBuf,
}

impl DocumentService {
    /// Create a service with a fresh text cache.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        extractor: Arc<dyn Extractor>,
        answerer: AnswerGenerator,
        upload_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            extractor,
            cache: DocumentCache::new(),
            answerer,
            upload_dir: upload_dir.into(),
        }
    }

    /// Use an existing cache instead of a fresh one.
    pub fn with_cache(mut self, cache: DocumentCache) -> Self {
        self.cache = cache;
        self
    }

    /// The extracted-text cache.
    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// Whether answers come from a remote model.
    pub fn ai_enabled(&self) -> bool {
        self.answerer.is_enabled()
    }

    /// Directory uploads are written to.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Store an uploaded PDF, record it, and extract its text.
    ///
    /// If extraction fails the record and the stored file are removed again
    /// and the extraction error is returned.
    pub async fn upload(
        &self,
        filename: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> DocentResult<DocumentRecord> {
        let filename = self.validate_upload(filename, content_type)?;

        tokio::fs::create_dir_all(&self.upload_dir).await?;
        let path = self
            .upload_dir
            .join(format!("{}_{}", Uuid::new_v4().simple(), filename));
        tokio::fs::write(&path, bytes).await?;

        let record = match self
            .store
            .create(NewDocument::new(filename.clone(), path.display().to_string()))
            .await
        {
            Ok(record) => record,
            Err(e) => {
                remove_file_if_exists(&path).await;
                return Err(e);
            }
        };

        match self.extract_text(&record).await {
            Ok(text) => {
                self.cache.put(record.id, text).await;
                info!(document_id = record.id, filename = %record.filename, "Document uploaded");
                Ok(record)
            }
            Err(e) => {
                warn!(document_id = record.id, error = %e, "Extraction failed, rolling back upload");
                if let Err(rollback) = self.store.delete(record.id).await {
                    error!(document_id = record.id, error = %rollback, "Failed to delete record");
                }
                remove_file_if_exists(&path).await;
                Err(e)
            }
        }
    }

    /// All document records.
    pub async fn list(&self) -> DocentResult<Vec<DocumentRecord>> {
        self.store.list().await
    }

    /// One document record.
    pub async fn get(&self, id: i64) -> DocentResult<DocumentRecord> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| DocentError::not_found(id))
    }

    /// Delete a document's record, file and cached text.
    ///
    /// The record goes first so a failed store delete leaves everything in
    /// place. Eviction waits for any extraction of this id still running.
    pub async fn delete(&self, id: i64) -> DocentResult<()> {
        let record = self.get(id).await?;

        if !self.store.delete(id).await? {
            return Err(DocentError::not_found(id));
        }
        remove_file_if_exists(Path::new(&record.file_path)).await;
        self.cache.invalidate(id).await;

        info!(document_id = id, "Document deleted");
        Ok(())
    }

    /// Answer a question about a document.
    ///
    /// Unknown ids fail with `NotFound` before any extraction or remote
    /// call. Extraction failures here leave the record in place.
    pub async fn ask(&self, id: i64, question: &str) -> DocentResult<QuestionResponse> {
        let record = self.get(id).await?;

        let text = self
            .cache
            .get_or_try_insert_with(id, || self.extract_text(&record))
            .await?;

        let answer = self.answerer.answer(&text, question).await;

        Ok(QuestionResponse {
            answer,
            document_id: id,
            question: question.to_string(),
        })
    }

    /// Drop all cached text.
    pub async fn shutdown(&self) {
        let cached = self.cache.len().await;
        self.cache.clear().await;
        info!(cached, "Document cache cleared");
    }

    async fn extract_text(&self, record: &DocumentRecord) -> DocentResult<String> {
        info!(document_id = record.id, path = %record.file_path, "Extracting text from PDF");
        self.extractor
            .extract_file(Path::new(&record.file_path))
            .await
            .map(|content| content.text)
            .map_err(|e| {
                error!(document_id = record.id, error = %e, "Error extracting text from PDF");
                DocentError::from(e)
            })
    }

    /// Check the upload and return the bare filename to store.
    fn validate_upload(&self, filename: &str, content_type: Option<&str>) -> DocentResult<String> {
        let name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DocentError::invalid_input("Missing filename"))?;

        if !name.to_ascii_lowercase().ends_with(".pdf") {
            return Err(DocentError::not_pdf());
        }

        if let Some(content_type) = content_type {
            let mime = content_type
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase();
            if !self.extractor.supports(&mime) && !GENERIC_UPLOAD_TYPES.contains(&mime.as_str()) {
                return Err(DocentError::not_pdf());
            }
        }

        Ok(name.to_string())
    }
}

async fn remove_file_if_exists(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "Failed to remove stored file");
        }
    }
}
