//! HTTP client for the Gemini `generateContent` endpoint

use crate::config::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, FileGeminiConfig};
use crate::gemini::error::{GeminiError, Result};
use crate::gemini::protocol::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for [`GeminiClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl From<&FileGeminiConfig> for GeminiConfig {
    fn from(file: &FileGeminiConfig) -> Self {
        Self {
            api_key: file.api_key().map(str::to_string),
            model: file.model.trim().to_string(),
            base_url: file.base_url.trim().to_string(),
            timeout: Duration::from_secs(file.timeout_secs),
        }
    }
}

/// Thin wrapper around `reqwest` for one model
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("midi/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// `{base_url}/v1beta/models/{model}:generateContent`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Send a request and return the text of the first candidate
    pub async fn generate(&self, request: &GenerateContentRequest) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GeminiError::MissingApiKey)?;

        debug!("POST {} ({})", self.endpoint(), self.config.model);
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            warn!("Gemini returned {}: {}", status, message);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        match parsed.text() {
            Some(text) => Ok(text),
            None => {
                if let Some(reason) = parsed
                    .prompt_feedback
                    .as_ref()
                    .and_then(|f| f.block_reason.as_deref())
                {
                    warn!("Gemini blocked the prompt: {}", reason);
                }
                Err(GeminiError::EmptyResponse)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new(GeminiConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_config_from_file() {
        let file = FileGeminiConfig {
            api_key: Some(" key ".to_string()),
            model: "gemini-2.5-pro".to_string(),
            timeout_secs: 5,
            ..Default::default()
        };

        let config = GeminiConfig::from(&file);

        assert_eq!(config.api_key.as_deref(), Some("key"));
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_generate_without_key_sends_nothing() {
        let client = GeminiClient::new(GeminiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        })
        .unwrap();

        let err = client
            .generate(&GenerateContentRequest::text("hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::MissingApiKey));
    }
}
