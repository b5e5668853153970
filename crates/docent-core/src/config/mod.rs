//! Configuration system for docent.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::answer::AnswerOptions;
use crate::error::{DocentError, DocentResult};
use crate::traits::LlmConfig;

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Origins allowed by CORS. Empty allows any origin.
    pub allowed_origins: Vec<String>,
    /// Largest accepted upload body in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Main docent configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocentConfig {
    /// Remote chat-completion provider.
    pub llm: LlmConfig,
    /// Prompt budget and sampling used when answering.
    pub answer: AnswerOptions,
    /// Path to the SQLite metadata database.
    pub database_path: PathBuf,
    /// Directory uploaded PDFs are written to.
    pub upload_dir: PathBuf,
    /// HTTP server settings.
    pub server: ServerConfig,
}

impl Default for DocentConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            answer: AnswerOptions::default(),
            database_path: PathBuf::from("pdf_qa.db"),
            upload_dir: PathBuf::from("uploads"),
            server: ServerConfig::default(),
        }
    }
}

impl DocentConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> DocentResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| DocentError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| DocentError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| DocentError::Configuration(e.to_string())),
            _ => Err(DocentError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> DocentResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> DocentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // LLM configuration
        if let Some(api_key) = lookup("OPENROUTER_API_KEY").filter(|k| !k.trim().is_empty()) {
            config.llm.api_key = Some(api_key);
        }
        if let Some(base_url) = lookup("OPENROUTER_API_BASE").filter(|u| !u.trim().is_empty()) {
            config.llm.base_url = Some(base_url);
        }
        if let Some(model) = lookup("DOCENT_LLM_MODEL") {
            config.llm.model = model;
        }
        if let Some(timeout) = lookup("DOCENT_LLM_TIMEOUT_SECS") {
            config.llm.timeout_secs = parse_env("DOCENT_LLM_TIMEOUT_SECS", &timeout)?;
        }

        // Storage
        if let Some(path) = lookup("DOCENT_DATABASE_PATH") {
            config.database_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("DOCENT_UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }

        // Server
        if let Some(host) = lookup("DOCENT_HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("DOCENT_PORT") {
            config.server.port = parse_env("DOCENT_PORT", &port)?;
        }
        if let Some(origins) = lookup("DOCENT_ALLOWED_ORIGINS") {
            config.server.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(limit) = lookup("DOCENT_MAX_UPLOAD_BYTES") {
            config.server.max_upload_bytes = parse_env("DOCENT_MAX_UPLOAD_BYTES", &limit)?;
        }

        Ok(config)
    }

    /// Whether a remote-API credential is configured.
    pub fn ai_enabled(&self) -> bool {
        self.llm.api_key.is_some()
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> DocentConfigBuilder {
        DocentConfigBuilder::default()
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> DocentResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| DocentError::Configuration(format!("{} has an invalid value: {}", key, value)))
}

/// Builder for DocentConfig.
#[derive(Default)]
pub struct DocentConfigBuilder {
    config: DocentConfig,
}

impl DocentConfigBuilder {
    /// Set LLM configuration.
    pub fn llm(mut self, config: LlmConfig) -> Self {
        self.config.llm = config;
        self
    }

    /// Set answer options.
    pub fn answer(mut self, options: AnswerOptions) -> Self {
        self.config.answer = options;
        self
    }

    /// Set the metadata database path.
    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.database_path = path.into();
        self
    }

    /// Set the upload directory.
    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.upload_dir = dir.into();
        self
    }

    /// Set server configuration.
    pub fn server(mut self, config: ServerConfig) -> Self {
        self.config.server = config;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> DocentConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DocentConfig::default();
        assert!(!config.ai_enabled());
        assert_eq!(config.answer.max_context_chars, 8000);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_from_lookup() {
        let config = DocentConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "sk-test"),
            ("OPENROUTER_API_BASE", "http://127.0.0.1:9999/v1"),
            ("DOCENT_PORT", "9000"),
            ("DOCENT_ALLOWED_ORIGINS", "http://a.test, http://b.test"),
        ]))
        .unwrap();

        assert!(config.ai_enabled());
        assert_eq!(config.llm.base_url.as_deref(), Some("http://127.0.0.1:9999/v1"));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.allowed_origins.len(), 2);
    }

    #[test]
    fn test_blank_api_key_disables_ai() {
        let config = DocentConfig::from_lookup(lookup(&[("OPENROUTER_API_KEY", "  ")])).unwrap();
        assert!(!config.ai_enabled());
    }

    #[test]
    fn test_invalid_port_is_configuration_error() {
        let result = DocentConfig::from_lookup(lookup(&[("DOCENT_PORT", "eighty")]));
        assert!(matches!(result, Err(DocentError::Configuration(_))));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docent.toml");
        std::fs::write(
            &path,
            r#"
upload_dir = "/var/lib/docent/uploads"

[llm]
model = "openai/gpt-4o-mini"

[answer]
max_context_chars = 4000
"#,
        )
        .unwrap();

        let config = DocentConfig::from_file(&path).unwrap();
        assert_eq!(config.llm.model, "openai/gpt-4o-mini");
        assert_eq!(config.answer.max_context_chars, 4000);
        assert_eq!(config.answer.max_tokens, 500);
        assert_eq!(config.upload_dir, PathBuf::from("/var/lib/docent/uploads"));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docent.ini");
        std::fs::write(&path, "").unwrap();
        assert!(DocentConfig::from_file(&path).is_err());
    }
}
