//! Application-level configuration.
//!
//! - [`SearchConfig`]: how many suggestions a search asks for

pub mod search_params;

pub use search_params::{DEFAULT_SUGGESTION_COUNT, REPLACEMENT_COUNT, SearchConfig};
