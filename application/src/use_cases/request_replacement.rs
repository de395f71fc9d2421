//! Request Replacement use case
//!
//! Asks the suggestion service for exactly one new suggestion, excluding
//! everything the group has already seen.

use crate::ports::suggestion_service::{ServiceError, SuggestionQuery, SuggestionService};
use midi_domain::Suggestion;
use std::sync::Arc;
use tracing::debug;

/// Adapter between the session controller and the suggestion service
pub struct ReplacementRequestor<S: SuggestionService + 'static> {
    service: Arc<S>,
}

impl<S: SuggestionService + 'static> ReplacementRequestor<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    /// `Ok(None)` when the service has nothing new to offer
    pub async fn request(&self, query: &SuggestionQuery) -> Result<Option<Suggestion>, ServiceError> {
        debug!(
            "Requesting {} replacement(s), excluding {} suggestions",
            query.count,
            query.exclude.len()
        );
        let batch = self.service.find_suggestions(query).await?;
        Ok(batch.suggestions.into_iter().next())
    }
}
