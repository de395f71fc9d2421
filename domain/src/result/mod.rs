//! Result sets and their presentation grouping

pub mod grouping;
pub mod result_set;

pub use grouping::{Grouping, PODIUM_MIN, RankedSuggestion};
pub use result_set::{ResultSet, SearchParams};
