//! Answer generation over extracted document text.
//!
//! [`AnswerGenerator::answer`] always produces a string: a missing API key,
//! a transport failure, a timeout, or a malformed response all degrade into
//! user-facing text instead of an error.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{DocentError, DocentResult};
use crate::prompts::{
    answer_prompt, AI_DISABLED_MESSAGE, ANSWER_ERROR_PREFIX, ANSWER_SYSTEM_PROMPT,
    TRUNCATION_MARKER,
};
use crate::traits::{GenerationOptions, Llm};
use crate::types::Message;

/// Prompt budget and sampling settings for answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerOptions {
    /// Characters of document text kept before truncation.
    pub max_context_chars: usize,
    /// Cap on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for AnswerOptions {
    fn default() -> Self {
        Self {
            max_context_chars: 8000,
            max_tokens: 500,
            temperature: 0.1,
        }
    }
}

/// Answers questions about a document through a chat-completion provider.
#[derive(Clone)]
pub struct AnswerGenerator {
    llm: Option<Arc<dyn Llm>>,
    options: AnswerOptions,
    timeout: Option<Duration>,
}

impl AnswerGenerator {
    /// Create a generator. `None` runs in degraded mode.
    pub fn new(llm: Option<Arc<dyn Llm>>, options: AnswerOptions) -> Self {
        if llm.is_none() {
            warn!("OPENROUTER_API_KEY not found. AI features will be disabled.");
        }
        Self {
            llm,
            options,
            timeout: None,
        }
    }

    /// Create a generator with AI features disabled.
    pub fn disabled() -> Self {
        Self::new(None, AnswerOptions::default())
    }

    /// Bound every remote call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether a provider is configured.
    pub fn is_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// Options in effect.
    pub fn options(&self) -> &AnswerOptions {
        &self.options
    }

    /// Cut `text` to the character budget, marking the cut.
    pub fn truncate<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match text.char_indices().nth(self.options.max_context_chars) {
            Some((cut, _)) => Cow::Owned(format!("{}{}", &text[..cut], TRUNCATION_MARKER)),
            None => Cow::Borrowed(text),
        }
    }

    /// Messages sent for a question: fixed system role plus the prompt.
    pub fn build_messages(&self, text: &str, question: &str) -> Vec<Message> {
        let text = self.truncate(text);
        if matches!(text, Cow::Owned(_)) {
            info!("Document text truncated to fit token limits");
        }
        vec![
            Message::system(ANSWER_SYSTEM_PROMPT),
            Message::user(answer_prompt(&text, question)),
        ]
    }

    /// Answer `question` from `text`. Never fails.
    pub async fn answer(&self, text: &str, question: &str) -> String {
        let preview: String = question.chars().take(100).collect();
        info!(question = %preview, "Answering question");

        let Some(llm) = self.llm.as_deref() else {
            return AI_DISABLED_MESSAGE.to_string();
        };

        match self.try_answer(llm, text, question).await {
            Ok(answer) => {
                info!(chars = answer.chars().count(), "Successfully generated answer");
                answer
            }
            Err(e) => {
                error!(error = %e, "Error answering question");
                format!("{}{}", ANSWER_ERROR_PREFIX, e)
            }
        }
    }

    async fn try_answer(&self, llm: &dyn Llm, text: &str, question: &str) -> DocentResult<String> {
        let messages = self.build_messages(text, question);
        let options = GenerationOptions {
            temperature: Some(self.options.temperature),
            max_tokens: Some(self.options.max_tokens),
        };

        let call = llm.generate(&messages, Some(options));
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| DocentError::llm_timeout(limit.as_secs()))??,
            None => call.await?,
        };

        let content = response
            .content
            .ok_or_else(|| DocentError::llm("No content in response"))?;
        Ok(content.trim().to_string())
    }
}
