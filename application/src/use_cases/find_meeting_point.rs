//! Find Meeting Point use case
//!
//! Geocodes every participant, computes the midpoint and asks the suggestion
//! service for meeting spots around it.

use crate::config::SearchConfig;
use crate::ports::progress::{ProgressNotifier, SearchStage};
use crate::ports::suggestion_service::{ServiceError, SuggestionQuery, SuggestionService};
use midi_domain::{Coordinates, FriendLocation, Participant, ResultSet, SearchParams};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can end a search
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("API key is not configured. Please set the API_KEY environment variable.")]
    MissingApiKey,

    #[error("Add at least one starting location.")]
    NoParticipants,

    #[error("{0} has no starting location.")]
    EmptyLocation(String),

    #[error("Could not find one or more locations. Please try being more specific.")]
    LocationNotFound,

    #[error(
        "Sorry, I couldn't find any spots that match your group's interests. Try being a bit more general!"
    )]
    NoMatches,

    #[error("A newer search replaced this one.")]
    Superseded,

    #[error("{0}")]
    Service(#[from] ServiceError),
}

/// Use case for running one search
pub struct FindMeetingPointUseCase<S: SuggestionService + 'static> {
    service: Arc<S>,
    config: SearchConfig,
}

impl<S: SuggestionService + 'static> FindMeetingPointUseCase<S> {
    pub fn new(service: Arc<S>, config: SearchConfig) -> Self {
        Self { service, config }
    }

    /// Check the input before any state is touched
    pub fn validate(participants: &[Participant]) -> Result<(), SearchError> {
        if participants.is_empty() {
            return Err(SearchError::NoParticipants);
        }
        if let Some(index) = participants
            .iter()
            .position(|p| p.location.trim().is_empty())
        {
            return Err(SearchError::EmptyLocation(Participant::label(index)));
        }
        Ok(())
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        participants: Vec<Participant>,
        progress: &dyn ProgressNotifier,
    ) -> Result<ResultSet, SearchError> {
        Self::validate(&participants)?;
        if !self.service.has_credentials() {
            return Err(SearchError::MissingApiKey);
        }

        info!("Starting search for {} participants", participants.len());

        // Stage 1: Geocoding
        progress.on_stage_start(SearchStage::Geocoding);
        let locations = match self.geocode(&participants).await {
            Ok(locations) => {
                progress.on_stage_complete(SearchStage::Geocoding, true);
                locations
            }
            Err(e) => {
                progress.on_stage_complete(SearchStage::Geocoding, false);
                return Err(e);
            }
        };

        let coords: Vec<Coordinates> = locations.iter().map(|l| l.coords).collect();
        let midpoint = Coordinates::midpoint(&coords).ok_or(SearchError::NoParticipants)?;
        info!("Group midpoint: {}", midpoint);

        // Stage 2: Suggestions
        progress.on_stage_start(SearchStage::Suggesting);
        let query = SuggestionQuery::new(
            participants.clone(),
            midpoint,
            self.config.suggestion_count,
        );
        let batch = match self.service.find_suggestions(&query).await {
            Ok(batch) if !batch.suggestions.is_empty() => {
                progress.on_stage_complete(SearchStage::Suggesting, true);
                batch
            }
            Ok(_) => {
                progress.on_stage_complete(SearchStage::Suggesting, false);
                return Err(SearchError::NoMatches);
            }
            Err(e) => {
                warn!("Suggestion request failed: {}", e);
                progress.on_stage_complete(SearchStage::Suggesting, false);
                return Err(e.into());
            }
        };

        let results = ResultSet::new(
            SearchParams { participants },
            locations,
            midpoint,
            batch.summary,
            batch.suggestions,
        );
        info!("Search finished with {} suggestions", results.len());
        Ok(results)
    }

    async fn geocode(&self, participants: &[Participant]) -> Result<Vec<FriendLocation>, SearchError> {
        let addresses: Vec<String> = participants.iter().map(|p| p.location.clone()).collect();

        let resolved = self.service.geocode(&addresses).await.map_err(|e| {
            warn!("Geocoding failed: {}", e);
            SearchError::Service(e)
        })?;

        if resolved.len() != addresses.len() {
            warn!(
                "Geocoding returned {} results for {} locations",
                resolved.len(),
                addresses.len()
            );
            return Err(SearchError::LocationNotFound);
        }

        addresses
            .into_iter()
            .zip(resolved)
            .map(|(address, coords)| {
                coords
                    .map(|coords| FriendLocation::new(address, coords))
                    .ok_or(SearchError::LocationNotFound)
            })
            .collect()
    }
}
