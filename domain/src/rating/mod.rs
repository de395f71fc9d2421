//! Ratings and consensus
//!
//! Every participant rates every suggestion with 1 to 5 stars. Once a
//! suggestion is fully rated, [`Verdict::evaluate`] decides what happens to it.

pub mod consensus;
pub mod store;

pub use consensus::Verdict;
pub use store::{MAX_STARS, ParticipantRatings, RatingStore, Stars};
