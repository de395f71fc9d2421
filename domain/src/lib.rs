//! Domain layer for midi
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Suggestions
//!
//! Candidate places or events proposed by the external suggestion service.
//! Each one is identified by `name-address` ([`SuggestionId`]).
//!
//! ## Ratings and Consensus
//!
//! - **Rating Store**: 0 to 5 stars per (suggestion, participant); 0 = unrated
//! - **Verdict**: once everyone has rated, a suggestion is a perfect match,
//!   a good match, rejected, due for a replacement, or neutral
//!
//! ## Result Set
//!
//! The live list of suggestions for one search, plus the context (midpoint,
//! participants) needed to ask for replacements.

pub mod core;
pub mod geo;
pub mod participant;
pub mod rating;
pub mod result;
pub mod suggestion;

// Re-export commonly used types
pub use core::error::DomainError;
pub use geo::{Coordinates, FriendLocation};
pub use participant::{Participant, Preferences};
pub use rating::{MAX_STARS, ParticipantRatings, RatingStore, Stars, Verdict};
pub use result::{Grouping, RankedSuggestion, ResultSet, SearchParams};
pub use suggestion::{Suggestion, SuggestionId, SuggestionKind, TravelInfo};
