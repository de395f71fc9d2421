//! The live result set of one completed search

use crate::geo::{Coordinates, FriendLocation};
use crate::participant::Participant;
use crate::suggestion::{Suggestion, SuggestionId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The parameters a result set was generated from.
///
/// Kept verbatim so replacement requests describe the same group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub participants: Vec<Participant>,
}

/// Suggestions plus the search context they were generated for
///
/// The midpoint, locations and search parameters never change after
/// creation; suggestions are removed or replaced in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    locations: Vec<FriendLocation>,
    midpoint: Coordinates,
    suggestions: Vec<Suggestion>,
    summary: String,
    params: SearchParams,
}

impl ResultSet {
    /// Build a result set. Later suggestions whose identity repeats an
    /// earlier one are dropped, so identities are unique.
    pub fn new(
        params: SearchParams,
        locations: Vec<FriendLocation>,
        midpoint: Coordinates,
        summary: impl Into<String>,
        suggestions: Vec<Suggestion>,
    ) -> Self {
        let mut seen = HashSet::new();
        let suggestions = suggestions
            .into_iter()
            .filter(|s| seen.insert(s.id()))
            .collect();

        Self {
            locations,
            midpoint,
            suggestions,
            summary: summary.into(),
            params,
        }
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn locations(&self) -> &[FriendLocation] {
        &self.locations
    }

    pub fn midpoint(&self) -> Coordinates {
        self.midpoint
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn participant_count(&self) -> usize {
        self.params.participants.len()
    }

    /// Position of a suggestion in the list
    pub fn position(&self, id: &SuggestionId) -> Option<usize> {
        self.suggestions.iter().position(|s| &s.id() == id)
    }

    pub fn contains(&self, id: &SuggestionId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &SuggestionId) -> Option<&Suggestion> {
        self.suggestions.iter().find(|s| &s.id() == id)
    }

    /// Suggestion at a 0-based position
    pub fn at(&self, index: usize) -> Option<&Suggestion> {
        self.suggestions.get(index)
    }

    /// Remove a suggestion, returning it if it was present
    pub fn remove(&mut self, id: &SuggestionId) -> Option<Suggestion> {
        let index = self.position(id)?;
        Some(self.suggestions.remove(index))
    }

    /// Replace a suggestion in place, keeping its position.
    ///
    /// When `old` is no longer present nothing changes and the replacement
    /// is discarded; returns whether the replacement happened.
    pub fn replace(&mut self, old: &SuggestionId, replacement: Suggestion) -> bool {
        match self.position(old) {
            Some(index) => {
                self.suggestions[index] = replacement;
                true
            }
            None => false,
        }
    }

    /// True once every suggestion has been rejected
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(name: &str) -> Suggestion {
        Suggestion::place(name, name, format!("{} Street", name), Coordinates::new(0.0, 0.0))
    }

    fn result_set(suggestions: Vec<Suggestion>) -> ResultSet {
        ResultSet::new(
            SearchParams {
                participants: vec![Participant::new("A"), Participant::new("B")],
            },
            vec![],
            Coordinates::new(0.0, 0.0),
            "summary",
            suggestions,
        )
    }

    #[test]
    fn test_duplicates_keep_first() {
        let first = suggestion("S1").with_description("first");
        let dup = suggestion("S1").with_description("second");
        let set = result_set(vec![first.clone(), suggestion("S2"), dup]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.suggestions()[0], first);
    }

    #[test]
    fn test_replace_preserves_position() {
        let mut set = result_set(vec![suggestion("S1"), suggestion("S2")]);

        assert!(set.replace(&suggestion("S1").id(), suggestion("S3")));

        let names: Vec<_> = set.suggestions().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["S3", "S2"]);
    }

    #[test]
    fn test_replace_missing_is_noop() {
        let mut set = result_set(vec![suggestion("S1"), suggestion("S2")]);
        let before = set.clone();

        assert!(!set.replace(&suggestion("S9").id(), suggestion("S3")));

        assert_eq!(set, before);
        assert!(!set.contains(&suggestion("S3").id()));
    }

    #[test]
    fn test_remove() {
        let mut set = result_set(vec![suggestion("S1"), suggestion("S2")]);

        let removed = set.remove(&suggestion("S1").id());

        assert_eq!(removed.map(|s| s.name), Some("S1".to_string()));
        assert_eq!(set.position(&suggestion("S2").id()), Some(0));
        assert!(set.remove(&suggestion("S1").id()).is_none());
    }

    #[test]
    fn test_is_empty_after_removing_all() {
        let mut set = result_set(vec![suggestion("S1")]);
        assert!(!set.is_empty());
        set.remove(&suggestion("S1").id());
        assert!(set.is_empty());
    }

    #[test]
    fn test_participant_count() {
        assert_eq!(result_set(vec![]).participant_count(), 2);
    }
}
