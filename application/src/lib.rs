//! Application layer for midi
//!
//! This crate contains the session controller, use cases, port definitions
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod session;
pub mod use_cases;

// Re-export commonly used types
pub use config::SearchConfig;
pub use ports::{
    progress::{NoProgress, ProgressNotifier, SearchStage},
    suggestion_service::{ServiceError, SuggestionBatch, SuggestionQuery, SuggestionService},
};
pub use session::{
    REPLACEMENT_FAILED_MESSAGE, RateError, RatingOutcome, Session, SessionSnapshot,
};
pub use use_cases::find_meeting_point::{FindMeetingPointUseCase, SearchError};
pub use use_cases::request_replacement::ReplacementRequestor;
pub use use_cases::session_controller::{LocateError, SessionController};
