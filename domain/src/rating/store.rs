//! Per-suggestion, per-participant star ratings

use crate::suggestion::SuggestionId;
use std::collections::{BTreeMap, HashMap};

/// A star count. 0 means "not yet rated"; user input is 1 to 5.
pub type Stars = u8;

/// Highest star count a participant can give
pub const MAX_STARS: Stars = 5;

/// Ratings of one suggestion, keyed by participant index.
///
/// May be partial: participants who never touched the stars have no entry.
pub type ParticipantRatings = BTreeMap<usize, Stars>;

/// In-memory rating store for the current result set
///
/// # Example
///
/// ```
/// use midi_domain::{RatingStore, SuggestionId};
///
/// let mut store = RatingStore::new();
/// let id = SuggestionId::of("Cafe X", "123 Main St");
///
/// assert_eq!(store.set_rating(&id, 0, 4), 4);
/// // Clicking the same star again clears it
/// assert_eq!(store.set_rating(&id, 0, 4), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingStore {
    ratings: HashMap<SuggestionId, ParticipantRatings>,
}

impl RatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a rating, toggling it off when it already equals `stars`.
    ///
    /// Returns the value now stored for the pair.
    pub fn set_rating(&mut self, id: &SuggestionId, participant: usize, stars: Stars) -> Stars {
        let entry = self
            .ratings
            .entry(id.clone())
            .or_default()
            .entry(participant)
            .or_insert(0);

        *entry = if *entry == stars { 0 } else { stars };
        *entry
    }

    /// Current rating of one pair, 0 when unrated
    pub fn rating(&self, id: &SuggestionId, participant: usize) -> Stars {
        self.ratings
            .get(id)
            .and_then(|r| r.get(&participant))
            .copied()
            .unwrap_or(0)
    }

    /// All ratings recorded for a suggestion (possibly partial)
    pub fn ratings_for(&self, id: &SuggestionId) -> ParticipantRatings {
        self.ratings.get(id).cloned().unwrap_or_default()
    }

    /// Whether anything is stored for this suggestion
    pub fn contains(&self, id: &SuggestionId) -> bool {
        self.ratings.contains_key(id)
    }

    /// Drop every rating of one suggestion
    pub fn clear(&mut self, id: &SuggestionId) {
        self.ratings.remove(id);
    }

    /// Drop everything (new search)
    pub fn clear_all(&mut self) {
        self.ratings.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> SuggestionId {
        SuggestionId::of("Cafe X", "123 Main St")
    }

    #[test]
    fn test_set_and_read() {
        let mut store = RatingStore::new();
        store.set_rating(&id(), 1, 3);
        assert_eq!(store.rating(&id(), 1), 3);
        assert_eq!(store.rating(&id(), 0), 0);
    }

    #[test]
    fn test_toggle_law() {
        let mut store = RatingStore::new();
        store.set_rating(&id(), 0, 5);
        store.set_rating(&id(), 0, 5);
        assert_eq!(store.rating(&id(), 0), 0);
        // The toggled-off entry is still present, just zero
        assert_eq!(store.ratings_for(&id()).get(&0), Some(&0));
    }

    #[test]
    fn test_change_rating_overwrites() {
        let mut store = RatingStore::new();
        store.set_rating(&id(), 0, 2);
        assert_eq!(store.set_rating(&id(), 0, 4), 4);
    }

    #[test]
    fn test_clear_one_suggestion() {
        let other = SuggestionId::of("Bar Y", "9 High St");
        let mut store = RatingStore::new();
        store.set_rating(&id(), 0, 2);
        store.set_rating(&other, 0, 5);

        store.clear(&id());

        assert!(!store.contains(&id()));
        assert!(store.ratings_for(&id()).is_empty());
        assert_eq!(store.rating(&other, 0), 5);
    }

    #[test]
    fn test_clear_all() {
        let mut store = RatingStore::new();
        store.set_rating(&id(), 0, 2);
        store.clear_all();
        assert!(store.is_empty());
    }
}
