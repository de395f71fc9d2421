//! Presentation grouping of a result set
//!
//! Suggestions everyone rated 5 stars go on the podium, but only when at
//! least two qualify. Otherwise everything is one list in original order.

use super::result_set::ResultSet;
use crate::rating::{RatingStore, Verdict};
use crate::suggestion::Suggestion;

/// Minimum number of perfect matches before a podium is shown
pub const PODIUM_MIN: usize = 2;

/// A suggestion with its 1-based position in the result set and its verdict
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedSuggestion<'a> {
    pub number: usize,
    pub suggestion: &'a Suggestion,
    pub verdict: Verdict,
}

/// Podium and ordinary list, both in original order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouping<'a> {
    pub podium: Vec<RankedSuggestion<'a>>,
    pub others: Vec<RankedSuggestion<'a>>,
}

impl<'a> Grouping<'a> {
    pub fn of(results: &'a ResultSet, ratings: &RatingStore) -> Self {
        let participant_count = results.participant_count();
        let ranked: Vec<RankedSuggestion<'a>> = results
            .suggestions()
            .iter()
            .enumerate()
            .map(|(i, suggestion)| RankedSuggestion {
                number: i + 1,
                suggestion,
                verdict: Verdict::evaluate(&ratings.ratings_for(&suggestion.id()), participant_count),
            })
            .collect();

        let perfect = ranked
            .iter()
            .filter(|r| r.verdict == Verdict::PerfectMatch)
            .count();

        if perfect < PODIUM_MIN {
            return Self {
                podium: Vec::new(),
                others: ranked,
            };
        }

        let (podium, others) = ranked
            .into_iter()
            .partition(|r| r.verdict == Verdict::PerfectMatch);
        Self { podium, others }
    }

    pub fn has_podium(&self) -> bool {
        !self.podium.is_empty()
    }

    /// Nothing left to show at all
    pub fn is_exhausted(&self) -> bool {
        self.podium.is_empty() && self.others.is_empty()
    }
}
