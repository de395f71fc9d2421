//! Session state for one front end
//!
//! - [`Session`]: result set, ratings, refining set and error banner
//! - [`RefiningGuard`]: releases a refining entry when a replacement flow ends

pub mod guard;
pub mod state;

pub use guard::{RefiningGuard, lock_session};
pub use state::{
    REPLACEMENT_FAILED_MESSAGE, RateError, RatingOutcome, RatingStep, ReplacementTicket, Session,
    SessionSnapshot,
};
