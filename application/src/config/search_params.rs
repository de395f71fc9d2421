//! Search parameters: use case control.
//!
//! [`SearchParams`](midi_domain::SearchParams) in the domain describes *who*
//! searched; [`SearchConfig`] controls *how* the session controller searches.

use serde::{Deserialize, Serialize};

/// Number of suggestions requested by a fresh search unless configured
pub const DEFAULT_SUGGESTION_COUNT: usize = 5;

/// Number of suggestions requested when replacing a lukewarm one
pub const REPLACEMENT_COUNT: usize = 1;

/// Search control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// How many suggestions a fresh search asks for.
    pub suggestion_count: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            suggestion_count: DEFAULT_SUGGESTION_COUNT,
        }
    }
}

impl SearchConfig {
    // ==================== Builder Methods ====================

    /// Zero is bumped to one; a search that asks for nothing can never succeed.
    pub fn with_suggestion_count(mut self, count: usize) -> Self {
        self.suggestion_count = count.max(1);
        self
    }
}
