//! OpenRouter (OpenAI-compatible chat completions) provider.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use docent_core::error::{DocentError, DocentResult, ErrorCode};
use docent_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse, TokenUsage};
use docent_core::types::Message;

/// Chat-completions provider for OpenRouter and other OpenAI-compatible APIs.
pub struct OpenRouterLlm {
    client: Client,
    config: LlmConfig,
    endpoint: Url,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenRouterLlm {
    /// Create a provider from configuration. The API key is required.
    pub fn new(config: LlmConfig) -> DocentResult<Self> {
        let api_key: SecretString = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .map(SecretString::new)
            .ok_or_else(|| {
                DocentError::Configuration(
                    "OpenRouter API key not found. Set OPENROUTER_API_KEY environment variable or provide api_key in config.".to_string(),
                )
            })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|_| DocentError::Configuration("Invalid API key format".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(referer) = &config.referer {
            headers.insert(
                "HTTP-Referer",
                referer
                    .parse()
                    .map_err(|_| DocentError::Configuration("Invalid referer header".to_string()))?,
            );
        }
        if let Some(title) = &config.title {
            headers.insert(
                "X-Title",
                title
                    .parse()
                    .map_err(|_| DocentError::Configuration("Invalid title header".to_string()))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                DocentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let endpoint = Url::parse(&format!("{}/chat/completions", config.api_base()))
            .map_err(|e| DocentError::Configuration(format!("Invalid API base URL: {}", e)))?;

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_error(&self, e: reqwest::Error) -> DocentError {
        if e.is_timeout() {
            return DocentError::llm_timeout(self.config.timeout_secs);
        }
        let code = if e.is_connect() {
            ErrorCode::LlmConnectionFailed
        } else {
            ErrorCode::LlmGenerationFailed
        };
        DocentError::Llm {
            message: format!("OpenRouter API request failed: {}", e),
            code,
            source: Some(Box::new(e)),
        }
    }
}

#[async_trait]
impl Llm for OpenRouterLlm {
    async fn generate(
        &self,
        messages: &[Message],
        options: Option<GenerationOptions>,
    ) -> DocentResult<LlmResponse> {
        let options = options.unwrap_or_default();

        let request = ChatRequest {
            model: &self.config.model,
            messages: messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: options.max_tokens.unwrap_or(self.config.max_tokens),
            temperature: options.temperature.unwrap_or(self.config.temperature),
        };

        debug!(model = %self.config.model, messages = messages.len(), "Sending chat completion");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.request_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.clone());
            warn!(%status, "OpenRouter API returned an error");
            return Err(DocentError::llm(format!(
                "OpenRouter API error ({}): {}",
                status, message
            )));
        }

        let response: ChatResponse = serde_json::from_str(&body).map_err(|e| DocentError::Llm {
            message: format!("Failed to parse response: {}", e),
            code: ErrorCode::LlmInvalidResponse,
            source: Some(Box::new(e)),
        })?;

        let choice = response.choices.into_iter().next().ok_or_else(|| DocentError::Llm {
            message: "Response contained no choices".to_string(),
            code: ErrorCode::LlmInvalidResponse,
            source: None,
        })?;

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(LlmResponse {
            content: choice.message.content,
            usage,
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
