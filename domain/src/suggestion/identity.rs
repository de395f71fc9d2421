//! Suggestion identity
//!
//! The identity of a suggestion is `name + "-" + address`. It is the join key
//! between a suggestion and its ratings and must be unique within a result set.

use serde::{Deserialize, Serialize};

/// Stable identifier of a suggestion
///
/// # Example
///
/// ```
/// use midi_domain::SuggestionId;
///
/// let id = SuggestionId::of("Cafe X", "123 Main St");
/// assert_eq!(id.as_str(), "Cafe X-123 Main St");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuggestionId(String);

impl SuggestionId {
    pub fn of(name: &str, address: &str) -> Self {
        Self(format!("{}-{}", name, address))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SuggestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SuggestionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SuggestionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
