//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types where
//! needed.

mod gemini;
mod maps;
mod output;
mod search;

pub use gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, FileGeminiConfig};
pub use maps::FileMapsConfig;
pub use output::FileOutputConfig;
pub use search::FileSearchConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("gemini.timeout_secs cannot be 0")]
    InvalidTimeout,

    #[error("gemini.model cannot be empty")]
    EmptyModelName,

    #[error("gemini.base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),

    #[error("search.suggestion_count cannot be 0")]
    InvalidSuggestionCount,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Gemini API settings
    pub gemini: FileGeminiConfig,
    /// Static map settings
    pub maps: FileMapsConfig,
    /// Search settings
    pub search: FileSearchConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.gemini.timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.gemini.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        let base_url = self.gemini.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidBaseUrl(base_url.to_string()));
        }

        if self.search.suggestion_count == 0 {
            return Err(ConfigValidationError::InvalidSuggestionCount);
        }

        Ok(())
    }

    /// Key for the static map; the Gemini key is reused when none is set
    pub fn maps_api_key(&self) -> Option<&str> {
        self.maps
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .or_else(|| self.gemini.api_key())
    }
}
