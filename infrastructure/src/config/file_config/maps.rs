//! Static map configuration from TOML (`[maps]` section)

use serde::{Deserialize, Serialize};

/// Raw maps configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMapsConfig {
    /// Google Maps Static API key. Falls back to the Gemini key when unset.
    pub api_key: Option<String>,
}
