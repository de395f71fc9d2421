//! Session controller
//!
//! Owns the [`Session`] of one front end and funnels every user event
//! (search, star click, "use my location") through it.
//!
//! # Concurrency
//!
//! The session sits behind a `std::sync::Mutex` that is only held in short
//! synchronous sections, never across an `.await`. State transitions are
//! therefore serialized like events on a single queue, while replacement
//! requests for different suggestions may be awaited concurrently.
//!
//! ```text
//! rate() ──lock──▶ apply_rating ──unlock──▶ Refine? ──▶ await service
//!                                                         │
//!        ◀──unlock── finish_replacement ◀──lock───────────┘
//!        ◀── RefiningGuard dropped (refining entry released)
//! ```

use crate::config::SearchConfig;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::suggestion_service::{ServiceError, SuggestionService};
use crate::session::{
    RateError, RatingOutcome, RatingStep, RefiningGuard, ReplacementTicket, Session,
    SessionSnapshot, lock_session,
};
use crate::use_cases::find_meeting_point::{FindMeetingPointUseCase, SearchError};
use crate::use_cases::request_replacement::ReplacementRequestor;
use midi_domain::{Coordinates, Participant, Stars, Suggestion, SuggestionId};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{info, warn};

/// Errors from resolving the user's own location
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocateError {
    #[error("API key is not configured. Please set the API_KEY environment variable.")]
    MissingApiKey,

    #[error("Couldn't get address: {0}")]
    Lookup(#[from] ServiceError),
}

/// Controller for one interactive session
pub struct SessionController<S: SuggestionService + 'static> {
    service: Arc<S>,
    session: Arc<Mutex<Session>>,
    search: FindMeetingPointUseCase<S>,
    requestor: ReplacementRequestor<S>,
}

impl<S: SuggestionService + 'static> SessionController<S> {
    pub fn new(service: Arc<S>, config: SearchConfig) -> Self {
        Self {
            search: FindMeetingPointUseCase::new(Arc::clone(&service), config),
            requestor: ReplacementRequestor::new(Arc::clone(&service)),
            session: Arc::new(Mutex::new(Session::new())),
            service,
        }
    }

    /// Owned copy of the current state, for rendering
    pub fn snapshot(&self) -> SessionSnapshot {
        lock_session(&self.session).snapshot()
    }

    // ==================== Search ====================

    /// Run a fresh search with default (no-op) progress
    pub async fn search(&self, participants: Vec<Participant>) -> Result<usize, SearchError> {
        self.search_with_progress(participants, &NoProgress).await
    }

    /// Run a fresh search.
    ///
    /// Ratings, results, refining entries and the error banner are cleared
    /// before the first await. Returns the number of suggestions installed.
    pub async fn search_with_progress(
        &self,
        participants: Vec<Participant>,
        progress: &dyn ProgressNotifier,
    ) -> Result<usize, SearchError> {
        FindMeetingPointUseCase::<S>::validate(&participants)?;

        let generation = lock_session(&self.session).begin_search();

        match self.search.execute_with_progress(participants, progress).await {
            Ok(results) => {
                let count = results.len();
                if lock_session(&self.session).install(generation, results) {
                    Ok(count)
                } else {
                    Err(SearchError::Superseded)
                }
            }
            Err(e) => {
                warn!("Search failed: {}", e);
                lock_session(&self.session).fail_search(generation, e.to_string());
                Err(e)
            }
        }
    }

    /// Throw the current results away ("start a new search")
    pub fn reset(&self) {
        lock_session(&self.session).begin_search();
    }

    // ==================== Rating ====================

    /// Rate a suggestion with default (no-op) progress
    pub async fn rate(
        &self,
        id: &SuggestionId,
        participant: usize,
        stars: Stars,
    ) -> Result<RatingOutcome, RateError> {
        self.rate_with_progress(id, participant, stars, &NoProgress).await
    }

    /// Store a star rating and act on the resulting verdict.
    ///
    /// A refine verdict awaits the replacement request before returning.
    pub async fn rate_with_progress(
        &self,
        id: &SuggestionId,
        participant: usize,
        stars: Stars,
        progress: &dyn ProgressNotifier,
    ) -> Result<RatingOutcome, RateError> {
        let step = lock_session(&self.session).apply_rating(id, participant, stars)?;

        match step {
            RatingStep::Settled { stars, verdict } => Ok(RatingOutcome::Recorded { stars, verdict }),
            RatingStep::Removed => {
                info!("Removed '{}' after unanimous low ratings", id);
                Ok(RatingOutcome::Removed)
            }
            RatingStep::AlreadyRefining { .. } => Ok(RatingOutcome::AlreadyRefining),
            RatingStep::Refine(ticket) => Ok(self.refine(ticket, progress).await),
        }
    }

    async fn refine(&self, ticket: ReplacementTicket, progress: &dyn ProgressNotifier) -> RatingOutcome {
        let _guard = RefiningGuard::new(Arc::clone(&self.session), &ticket);

        info!("Looking for a replacement for '{}'", ticket.name);
        progress.on_refine_start(&ticket.name);

        let answer = self.requestor.request(&ticket.query).await;
        progress.on_refine_complete(&ticket.name, answer.is_ok());

        // The session lock must be released before the guard drops
        let outcome = lock_session(&self.session).finish_replacement(&ticket, answer);
        outcome
    }

    // ==================== Direct mutation ====================

    /// Remove a suggestion and its ratings
    pub fn remove(&self, id: &SuggestionId) -> bool {
        lock_session(&self.session).remove(id)
    }

    /// Replace a suggestion in place; no-op when `old` is gone
    pub fn replace(&self, old: &SuggestionId, replacement: Suggestion) -> bool {
        lock_session(&self.session).replace(old, replacement)
    }

    /// True when every suggestion of the current search is gone
    pub fn is_empty(&self) -> bool {
        lock_session(&self.session).is_empty()
    }

    pub fn dismiss_error(&self) {
        lock_session(&self.session).dismiss_error();
    }

    // ==================== Location ====================

    /// Turn the user's coordinates into an address for the first friend
    /// slot. Never touches the session.
    pub async fn locate(&self, coords: Coordinates) -> Result<String, LocateError> {
        if !self.service.has_credentials() {
            return Err(LocateError::MissingApiKey);
        }
        let address = self.service.reverse_geocode(coords).await?;
        Ok(address.trim().to_string())
    }
}
