// src/generation/client.rs
//! HTTP text-generation client over an OpenAI-compatible chat-completions API

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatMessage, GenerationError, TextGenerator};
use crate::app_log;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";

const ENDPOINT_VAR: &str = "CV_LLM_ENDPOINT";
const API_KEY_VAR: &str = "CV_LLM_API_KEY";
const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
const OPENAI_BASE_URL_VAR: &str = "OPENAI_BASE_URL";
const MODEL_VAR: &str = "CV_LLM_MODEL";
const TIMEOUT_VAR: &str = "CV_LLM_TIMEOUT_SECS";

/// How requests reach the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    /// Full URL posted to as-is, bearer key optional.
    Direct { endpoint: String },
    /// Chat-completions API under a base URL.
    Managed { base_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub transport: Transport,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl GenerationConfig {
    /// Resolve from a variable source; `None` when no credentials are set.
    ///
    /// `CV_LLM_ENDPOINT` selects the direct transport; otherwise the managed
    /// transport needs an API key and honours `OPENAI_BASE_URL`.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let model = var(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let timeout_secs = var(TIMEOUT_VAR)
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let (transport, api_key) = match var(ENDPOINT_VAR) {
            Some(endpoint) => (
                Transport::Direct { endpoint },
                var(API_KEY_VAR).or_else(|| var(OPENAI_API_KEY_VAR)),
            ),
            None => {
                let api_key = var(OPENAI_API_KEY_VAR)?;
                let base_url =
                    var(OPENAI_BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
                (Transport::Managed { base_url }, Some(api_key))
            }
        };

        Some(Self {
            transport,
            api_key,
            model,
            timeout_secs,
        })
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// URL requests are posted to.
    pub fn request_url(&self) -> String {
        match &self.transport {
            Transport::Direct { endpoint } => endpoint.clone(),
            Transport::Managed { base_url } => format!(
                "{}{}",
                base_url.trim_end_matches('/'),
                CHAT_COMPLETIONS_ENDPOINT
            ),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

pub struct GenerationClient {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    model: String,
}

impl GenerationClient {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        let url = config.request_url();
        app_log!(info, "Text generation via {} (model {})", url, config.model);

        Ok(Self {
            client,
            url,
            api_key: config.api_key,
            model: config.model,
        })
    }
}

#[async_trait]
impl TextGenerator for GenerationClient {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        let payload = ChatRequest {
            model: &self.model,
            messages,
            temperature,
            max_tokens,
        };

        let mut request = self.client.post(&self.url).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        app_log!(trace, "Calling text generation: {}", self.url);
        let response = request.send().await?;

        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: ChatResponse = response.json().await?;
        body.into_text().ok_or(GenerationError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_no_credentials_means_no_generation() {
        assert!(GenerationConfig::from_lookup(lookup(&[])).is_none());
        assert!(GenerationConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])).is_none());
    }

    #[test]
    fn test_managed_transport_defaults() {
        let config = GenerationConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(
            config.transport,
            Transport::Managed {
                base_url: DEFAULT_BASE_URL.to_string()
            }
        );
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.request_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_managed_transport_with_base_override() {
        let config = GenerationConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:11434/v1/"),
            ("CV_LLM_MODEL", "llama3"),
            ("CV_LLM_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(config.request_url(), "http://localhost:11434/v1/chat/completions");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn test_direct_endpoint_wins_and_key_is_optional() {
        let config = GenerationConfig::from_lookup(lookup(&[(
            "CV_LLM_ENDPOINT",
            "https://llm.internal/v1/generate",
        )]))
        .unwrap();
        assert_eq!(config.request_url(), "https://llm.internal/v1/generate");
        assert!(config.api_key.is_none());

        let config = GenerationConfig::from_lookup(lookup(&[
            ("CV_LLM_ENDPOINT", "https://llm.internal/v1/generate"),
            ("CV_LLM_API_KEY", "direct-key"),
            ("OPENAI_API_KEY", "sk-ignored"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("direct-key"));

        let config = GenerationConfig::from_lookup(lookup(&[
            ("CV_LLM_ENDPOINT", "https://llm.internal/v1/generate"),
            ("OPENAI_API_KEY", "sk-shared"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-shared"));
    }

    #[test]
    fn test_managed_transport_only_sends_openai_key() {
        let config = GenerationConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-openai"),
            ("CV_LLM_API_KEY", "direct-only"),
        ]))
        .unwrap();
        assert!(matches!(config.transport, Transport::Managed { .. }));
        assert_eq!(config.api_key.as_deref(), Some("sk-openai"));

        assert!(GenerationConfig::from_lookup(lookup(&[("CV_LLM_API_KEY", "direct-only")])).is_none());
    }

    #[test]
    fn test_response_text_extraction() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "  hello  "}}]}"#,
        )
        .unwrap();
        assert_eq!(body.into_text().as_deref(), Some("hello"));

        let empty: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(empty.into_text().is_none());
    }
}
