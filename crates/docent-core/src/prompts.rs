//! Prompt templates for document question answering.

/// System instruction fixing the assistant's role.
pub const ANSWER_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that answers questions based on provided document content.";

/// Marker appended when document text is cut to the context budget.
pub const TRUNCATION_MARKER: &str = "...";

/// Returned instead of an answer when no API key is configured.
pub const AI_DISABLED_MESSAGE: &str =
    "AI features are not available. Please configure OPENROUTER_API_KEY.";

/// Prefix of every degraded answer produced from a failure.
pub const ANSWER_ERROR_PREFIX: &str =
    "Sorry, I encountered an error while processing your question: ";

/// Build the user prompt embedding the document text and the question.
pub fn answer_prompt(document_text: &str, question: &str) -> String {
    format!(
        r#"Based on the following document content, please answer the question. If the answer cannot be found in the document, please say so.

Document content:
{document_text}

Question: {question}

Answer:"#
    )
}
