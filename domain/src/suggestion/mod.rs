//! Suggestions returned by the external suggestion service

pub mod entities;
pub mod identity;

pub use entities::{Suggestion, SuggestionKind, TravelInfo};
pub use identity::SuggestionId;
