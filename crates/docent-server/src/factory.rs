//! Factory for creating the document service from configuration.

use std::sync::Arc;

use docent_core::config::DocentConfig;
use docent_core::error::DocentResult;
use docent_core::{AnswerGenerator, DocumentService, SqliteDocumentStore};
use docent_extractors::PdfExtractor;
use docent_llm::LlmFactory;
use tracing::info;

/// Create a [`DocumentService`] from configuration.
pub fn create_service(config: &DocentConfig) -> DocentResult<DocumentService> {
    let store = SqliteDocumentStore::new(&config.database_path)?;
    info!(path = %config.database_path.display(), "Document store opened");

    let llm = LlmFactory::optional(&config.llm)?;
    let answerer =
        AnswerGenerator::new(llm, config.answer.clone()).with_timeout(config.llm.timeout());

    Ok(DocumentService::new(
        Arc::new(store),
        Arc::new(PdfExtractor::new()),
        answerer,
        config.upload_dir.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_service_without_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = DocentConfig::builder()
            .database_path(dir.path().join("pdf_qa.db"))
            .upload_dir(dir.path().join("uploads"))
            .build();

        let service = create_service(&config).unwrap();
        assert!(!service.ai_enabled());
        assert_eq!(service.upload_dir(), dir.path().join("uploads"));
    }
}
