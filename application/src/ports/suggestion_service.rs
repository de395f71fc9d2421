//! Suggestion service port
//!
//! Defines the interface to the external service that geocodes addresses and
//! proposes meeting spots. Implementations live in the infrastructure layer.

use async_trait::async_trait;
use midi_domain::{Coordinates, Participant, Suggestion, SuggestionId};
use thiserror::Error;

/// Errors that can occur while talking to the suggestion service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("API key is not configured")]
    MissingCredentials,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Could not parse service response: {0}")]
    Parse(String),

    #[error("Service returned an empty response")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,
}

/// A request for meeting suggestions
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionQuery {
    /// The group, in participant order
    pub participants: Vec<Participant>,
    /// Geographic center of the group
    pub midpoint: Coordinates,
    /// How many suggestions to ask for
    pub count: usize,
    /// Suggestions the group has already seen; must not be proposed again
    pub exclude: Vec<Suggestion>,
}

impl SuggestionQuery {
    pub fn new(participants: Vec<Participant>, midpoint: Coordinates, count: usize) -> Self {
        Self {
            participants,
            midpoint,
            count,
            exclude: Vec::new(),
        }
    }

    pub fn excluding(mut self, exclude: Vec<Suggestion>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Identities of the excluded suggestions
    pub fn excluded_ids(&self) -> Vec<SuggestionId> {
        self.exclude.iter().map(Suggestion::id).collect()
    }
}

/// Suggestions plus the service's one-sentence matching strategy
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuggestionBatch {
    pub summary: String,
    pub suggestions: Vec<Suggestion>,
}

/// Gateway to the external geocoding and suggestion service
#[async_trait]
pub trait SuggestionService: Send + Sync {
    /// Whether the credentials needed for any request are present
    fn has_credentials(&self) -> bool {
        true
    }

    /// Resolve free-text locations. The result has the same length and order
    /// as the input; unresolvable entries are `None`.
    async fn geocode(&self, locations: &[String]) -> Result<Vec<Option<Coordinates>>, ServiceError>;

    /// Resolve coordinates to a street address
    async fn reverse_geocode(&self, coords: Coordinates) -> Result<String, ServiceError>;

    /// Ask for meeting suggestions
    async fn find_suggestions(&self, query: &SuggestionQuery) -> Result<SuggestionBatch, ServiceError>;
}
