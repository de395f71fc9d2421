//! Gemini configuration from TOML (`[gemini]` section)

use serde::{Deserialize, Serialize};

/// Default model for geocoding and suggestions
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default REST endpoint
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Raw Gemini configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// API key. Usually supplied through the `API_KEY` environment variable.
    pub api_key: Option<String>,
    /// Model used for every request
    pub model: String,
    /// Base URL of the REST API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl FileGeminiConfig {
    /// The API key, ignoring blank values
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
