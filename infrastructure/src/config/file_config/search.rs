//! Search configuration from TOML (`[search]` section)

use midi_application::SearchConfig;
use midi_application::config::DEFAULT_SUGGESTION_COUNT;
use serde::{Deserialize, Serialize};

/// Raw search configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Suggestions requested per search
    pub suggestion_count: usize,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            suggestion_count: DEFAULT_SUGGESTION_COUNT,
        }
    }
}

impl FileSearchConfig {
    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig::default().with_suggestion_count(self.suggestion_count)
    }
}
