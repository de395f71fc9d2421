//! Session state
//!
//! One owned object holding everything a front end renders: the result set,
//! the rating store, the set of suggestions awaiting a replacement and the
//! current error banner. Every mutation goes through the methods below so
//! the invariants hold in one place:
//!
//! - suggestion identities are unique within the result set
//! - a removed or replaced suggestion has no ratings left
//! - a completion from an older search never touches the current one

use crate::ports::suggestion_service::{ServiceError, SuggestionQuery};
use crate::config::REPLACEMENT_COUNT;
use midi_domain::{
    Grouping, RatingStore, ResultSet, Stars, Suggestion, SuggestionId, Verdict,
};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Banner shown when a replacement request fails
pub const REPLACEMENT_FAILED_MESSAGE: &str = "Failed to get a new suggestion. Please try again.";

/// Errors from rating a suggestion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateError {
    #[error("There are no results to rate yet")]
    NoActiveSearch,

    #[error("No suggestion named '{0}' in the current results")]
    UnknownSuggestion(SuggestionId),

    #[error("Participant {index} does not exist (group has {count} participants)")]
    UnknownParticipant { index: usize, count: usize },
}

/// Everything needed to run one replacement flow outside the session lock
#[derive(Debug, Clone, PartialEq)]
pub struct ReplacementTicket {
    /// Generation of the search this flow belongs to
    pub generation: u64,
    /// The suggestion being replaced
    pub id: SuggestionId,
    /// Display name of the suggestion being replaced
    pub name: String,
    /// Query to send, with every current suggestion excluded
    pub query: SuggestionQuery,
}

/// What a rating change did to the session, before any await
#[derive(Debug, Clone, PartialEq)]
pub enum RatingStep {
    /// No structural change
    Settled { stars: Stars, verdict: Verdict },
    /// The suggestion was rejected and removed
    Removed,
    /// A replacement is already in flight for this suggestion
    AlreadyRefining { stars: Stars },
    /// A replacement must be requested
    Refine(ReplacementTicket),
}

/// Final outcome of a rating change
#[derive(Debug, Clone, PartialEq)]
pub enum RatingOutcome {
    /// Rating stored, nothing else changed
    Recorded { stars: Stars, verdict: Verdict },
    /// Everyone disliked it; it is gone
    Removed,
    /// A replacement was already being fetched; nothing new was requested
    AlreadyRefining,
    /// Replaced in place by a new suggestion
    Replaced { replacement: SuggestionId },
    /// The service had nothing new; the suggestion was removed
    Exhausted,
    /// The replacement request failed; the suggestion stays
    ReplacementFailed { message: String },
    /// The completion arrived for a search or suggestion that no longer exists
    Discarded,
}

/// Session state owned by the session controller
#[derive(Debug, Default)]
pub struct Session {
    generation: u64,
    results: Option<ResultSet>,
    ratings: RatingStore,
    refining: BTreeSet<SuggestionId>,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Accessors ====================

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    pub fn ratings(&self) -> &RatingStore {
        &self.ratings
    }

    pub fn refining(&self) -> &BTreeSet<SuggestionId> {
        &self.refining
    }

    pub fn is_refining(&self, id: &SuggestionId) -> bool {
        self.refining.contains(id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when a result set exists and every suggestion is gone
    pub fn is_empty(&self) -> bool {
        self.results.as_ref().is_some_and(ResultSet::is_empty)
    }

    /// Podium / ordinary grouping of the current results
    pub fn grouping(&self) -> Option<Grouping<'_>> {
        self.results
            .as_ref()
            .map(|results| Grouping::of(results, &self.ratings))
    }

    // ==================== Search lifecycle ====================

    /// Discard everything and start a new generation.
    ///
    /// Returns the new generation; completions from older ones are dropped.
    pub fn begin_search(&mut self) -> u64 {
        self.generation += 1;
        self.results = None;
        self.ratings.clear_all();
        self.refining.clear();
        self.error = None;
        self.generation
    }

    /// Install the results of a search. Ignored when a newer search started.
    pub fn install(&mut self, generation: u64, results: ResultSet) -> bool {
        if generation != self.generation {
            debug!("Dropping results of superseded search {}", generation);
            return false;
        }
        self.results = Some(results);
        true
    }

    /// Record a search failure. Ignored when a newer search started.
    pub fn fail_search(&mut self, generation: u64, message: impl Into<String>) {
        if generation == self.generation {
            self.error = Some(message.into());
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // ==================== Result set mutation ====================

    /// Remove a suggestion and its ratings
    pub fn remove(&mut self, id: &SuggestionId) -> bool {
        let removed = self
            .results
            .as_mut()
            .and_then(|results| results.remove(id))
            .is_some();
        if removed {
            self.ratings.clear(id);
        }
        removed
    }

    /// Replace a suggestion in place and clear the old ratings.
    ///
    /// No-op when `old` is gone; the replacement is then discarded.
    pub fn replace(&mut self, old: &SuggestionId, replacement: Suggestion) -> bool {
        let replaced = self
            .results
            .as_mut()
            .is_some_and(|results| results.replace(old, replacement));
        if replaced {
            self.ratings.clear(old);
        }
        replaced
    }

    // ==================== Rating ====================

    /// Store a rating, classify the suggestion and apply the synchronous
    /// part of the verdict.
    ///
    /// A `Refine` step has already put the suggestion into the refining set;
    /// the caller must run the replacement and then call
    /// [`finish_replacement`](Self::finish_replacement).
    pub fn apply_rating(
        &mut self,
        id: &SuggestionId,
        participant: usize,
        stars: Stars,
    ) -> Result<RatingStep, RateError> {
        let results = self.results.as_ref().ok_or(RateError::NoActiveSearch)?;
        let count = results.participant_count();
        if participant >= count {
            return Err(RateError::UnknownParticipant {
                index: participant,
                count,
            });
        }
        let Some(suggestion) = results.get(id) else {
            return Err(RateError::UnknownSuggestion(id.clone()));
        };
        let name = suggestion.name.clone();

        let stored = self.ratings.set_rating(id, participant, stars);
        let verdict = Verdict::evaluate(&self.ratings.ratings_for(id), count);
        debug!("'{}' rated {} by participant {}: {}", name, stored, participant, verdict);

        match verdict {
            Verdict::Reject => {
                self.remove(id);
                Ok(RatingStep::Removed)
            }
            Verdict::Refine if self.refining.contains(id) => {
                Ok(RatingStep::AlreadyRefining { stars: stored })
            }
            Verdict::Refine => {
                let query = SuggestionQuery::new(
                    results.params().participants.clone(),
                    results.midpoint(),
                    REPLACEMENT_COUNT,
                )
                .excluding(results.suggestions().to_vec());

                self.refining.insert(id.clone());
                Ok(RatingStep::Refine(ReplacementTicket {
                    generation: self.generation,
                    id: id.clone(),
                    name,
                    query,
                }))
            }
            verdict => Ok(RatingStep::Settled {
                stars: stored,
                verdict,
            }),
        }
    }

    /// Reconcile the answer of a replacement request.
    ///
    /// The old ratings are cleared whatever the outcome. The refining entry
    /// is not touched here; [`RefiningGuard`](super::RefiningGuard) releases it.
    pub fn finish_replacement(
        &mut self,
        ticket: &ReplacementTicket,
        answer: Result<Option<Suggestion>, ServiceError>,
    ) -> RatingOutcome {
        if ticket.generation != self.generation {
            debug!("Dropping replacement for '{}' from superseded search", ticket.name);
            return RatingOutcome::Discarded;
        }

        self.ratings.clear(&ticket.id);

        match answer {
            Ok(Some(replacement)) => {
                let new_id = replacement.id();
                let collides = new_id != ticket.id
                    && self
                        .results
                        .as_ref()
                        .is_some_and(|results| results.contains(&new_id));

                if collides {
                    warn!(
                        "Replacement '{}' duplicates a listed suggestion; removing '{}'",
                        replacement.name, ticket.name
                    );
                    return self.remove_exhausted(&ticket.id);
                }

                if self.replace(&ticket.id, replacement) {
                    RatingOutcome::Replaced {
                        replacement: new_id,
                    }
                } else {
                    RatingOutcome::Discarded
                }
            }
            Ok(None) => self.remove_exhausted(&ticket.id),
            Err(e) => {
                warn!("Failed to refine '{}': {}", ticket.name, e);
                self.error = Some(REPLACEMENT_FAILED_MESSAGE.to_string());
                RatingOutcome::ReplacementFailed {
                    message: REPLACEMENT_FAILED_MESSAGE.to_string(),
                }
            }
        }
    }

    fn remove_exhausted(&mut self, id: &SuggestionId) -> RatingOutcome {
        if self.remove(id) {
            RatingOutcome::Exhausted
        } else {
            RatingOutcome::Discarded
        }
    }

    /// Release a refining entry. Entries of older generations are already gone.
    pub(crate) fn release(&mut self, generation: u64, id: &SuggestionId) {
        if generation == self.generation {
            self.refining.remove(id);
        }
    }

    /// Owned copy of everything a front end renders
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            generation: self.generation,
            results: self.results.clone(),
            ratings: self.ratings.clone(),
            refining: self.refining.clone(),
            error: self.error.clone(),
        }
    }
}

/// Owned, lock-free view of a session
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSnapshot {
    pub generation: u64,
    pub results: Option<ResultSet>,
    #[serde(skip)]
    pub ratings: RatingStore,
    pub refining: BTreeSet<SuggestionId>,
    pub error: Option<String>,
}

impl SessionSnapshot {
    pub fn grouping(&self) -> Option<Grouping<'_>> {
        self.results
            .as_ref()
            .map(|results| Grouping::of(results, &self.ratings))
    }

    pub fn is_refining(&self, id: &SuggestionId) -> bool {
        self.refining.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midi_domain::{Coordinates, Participant, SearchParams};

    fn suggestion(name: &str) -> Suggestion {
        Suggestion::place(name, name, "123 Main St", Coordinates::new(0.0, 0.0))
    }

    fn session_with(names: &[&str], participants: usize) -> Session {
        let mut session = Session::new();
        let generation = session.begin_search();
        let results = ResultSet::new(
            SearchParams {
                participants: (0..participants)
                    .map(|i| Participant::new(format!("Start {}", i)))
                    .collect(),
            },
            vec![],
            Coordinates::new(1.0, 2.0),
            "summary",
            names.iter().map(|n| suggestion(n)).collect(),
        );
        assert!(session.install(generation, results));
        session
    }

    fn names(session: &Session) -> Vec<String> {
        session
            .results()
            .unwrap()
            .suggestions()
            .iter()
            .map(|s| s.name.clone())
            .collect()
    }

    #[test]
    fn test_rating_without_results() {
        let mut session = Session::new();
        let err = session
            .apply_rating(&suggestion("S1").id(), 0, 3)
            .unwrap_err();
        assert_eq!(err, RateError::NoActiveSearch);
    }

    #[test]
    fn test_rating_unknown_participant_or_suggestion() {
        let mut session = session_with(&["S1"], 2);
        assert_eq!(
            session.apply_rating(&suggestion("S1").id(), 2, 3),
            Err(RateError::UnknownParticipant { index: 2, count: 2 })
        );
        assert!(matches!(
            session.apply_rating(&suggestion("S9").id(), 0, 3),
            Err(RateError::UnknownSuggestion(_))
        ));
    }

    #[test]
    fn test_partial_rating_settles_pending() {
        let mut session = session_with(&["S1"], 2);
        let step = session.apply_rating(&suggestion("S1").id(), 0, 2).unwrap();
        assert_eq!(
            step,
            RatingStep::Settled {
                stars: 2,
                verdict: Verdict::Pending
            }
        );
    }

    #[test]
    fn test_reject_removes_and_clears() {
        let mut session = session_with(&["S1", "S2"], 2);
        let id = suggestion("S1").id();

        session.apply_rating(&id, 0, 2).unwrap();
        let step = session.apply_rating(&id, 1, 2).unwrap();

        assert_eq!(step, RatingStep::Removed);
        assert_eq!(names(&session), vec!["S2"]);
        assert!(!session.ratings().contains(&id));
        assert!(session.refining().is_empty());
    }

    #[test]
    fn test_neutral_leaves_result_set_untouched() {
        let mut session = session_with(&["S1"], 3);
        let id = suggestion("S1").id();
        let before = session.results().cloned();

        session.apply_rating(&id, 0, 1).unwrap();
        session.apply_rating(&id, 1, 5).unwrap();
        let step = session.apply_rating(&id, 2, 3).unwrap();

        assert_eq!(
            step,
            RatingStep::Settled {
                stars: 3,
                verdict: Verdict::Neutral
            }
        );
        assert_eq!(session.results().cloned(), before);
    }

    #[test]
    fn test_refine_issues_one_ticket() {
        let mut session = session_with(&["S1", "S2"], 2);
        let id = suggestion("S1").id();

        session.apply_rating(&id, 0, 3).unwrap();
        let RatingStep::Refine(ticket) = session.apply_rating(&id, 1, 2).unwrap() else {
            panic!("expected a refine step");
        };

        assert!(session.is_refining(&id));
        assert_eq!(ticket.query.count, 1);
        assert_eq!(ticket.query.midpoint, Coordinates::new(1.0, 2.0));
        assert_eq!(ticket.query.participants.len(), 2);
        assert!(ticket.query.excluded_ids().contains(&id));
        assert_eq!(ticket.query.exclude.len(), 2);

        // Still refine-worthy, but already in flight
        session.apply_rating(&id, 1, 3).unwrap();
        let step = session.apply_rating(&id, 1, 2).unwrap();
        assert_eq!(step, RatingStep::AlreadyRefining { stars: 2 });
    }

    #[test]
    fn test_finish_replacement_success() {
        let mut session = session_with(&["S1", "S2"], 2);
        let id = suggestion("S1").id();
        session.apply_rating(&id, 0, 3).unwrap();
        let RatingStep::Refine(ticket) = session.apply_rating(&id, 1, 3).unwrap() else {
            panic!("expected a refine step");
        };

        let outcome = session.finish_replacement(&ticket, Ok(Some(suggestion("S3"))));

        assert_eq!(
            outcome,
            RatingOutcome::Replaced {
                replacement: suggestion("S3").id()
            }
        );
        assert_eq!(names(&session), vec!["S3", "S2"]);
        assert!(!session.ratings().contains(&id));
    }

    #[test]
    fn test_finish_replacement_empty_removes() {
        let mut session = session_with(&["S1", "S2"], 1);
        let id = suggestion("S1").id();
        let RatingStep::Refine(ticket) = session.apply_rating(&id, 0, 3).unwrap() else {
            panic!("expected a refine step");
        };

        assert_eq!(session.finish_replacement(&ticket, Ok(None)), RatingOutcome::Exhausted);
        assert_eq!(names(&session), vec!["S2"]);
    }

    #[test]
    fn test_finish_replacement_error_keeps_suggestion() {
        let mut session = session_with(&["S1"], 1);
        let id = suggestion("S1").id();
        let RatingStep::Refine(ticket) = session.apply_rating(&id, 0, 3).unwrap() else {
            panic!("expected a refine step");
        };

        let outcome =
            session.finish_replacement(&ticket, Err(ServiceError::Connection("down".into())));

        assert!(matches!(outcome, RatingOutcome::ReplacementFailed { .. }));
        assert_eq!(names(&session), vec!["S1"]);
        assert_eq!(session.error(), Some(REPLACEMENT_FAILED_MESSAGE));
        assert!(!session.ratings().contains(&id));
    }

    #[test]
    fn test_finish_replacement_duplicate_is_treated_as_empty() {
        let mut session = session_with(&["S1", "S2"], 1);
        let id = suggestion("S1").id();
        let RatingStep::Refine(ticket) = session.apply_rating(&id, 0, 3).unwrap() else {
            panic!("expected a refine step");
        };

        let outcome = session.finish_replacement(&ticket, Ok(Some(suggestion("S2"))));

        assert_eq!(outcome, RatingOutcome::Exhausted);
        assert_eq!(names(&session), vec!["S2"]);
    }

    #[test]
    fn test_finish_replacement_after_removal_is_noop() {
        let mut session = session_with(&["S1", "S2"], 1);
        let id = suggestion("S1").id();
        let RatingStep::Refine(ticket) = session.apply_rating(&id, 0, 3).unwrap() else {
            panic!("expected a refine step");
        };
        session.remove(&id);
        let before = session.results().cloned();

        let outcome = session.finish_replacement(&ticket, Ok(Some(suggestion("S3"))));

        assert_eq!(outcome, RatingOutcome::Discarded);
        assert_eq!(session.results().cloned(), before);
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let mut session = session_with(&["S1"], 1);
        let id = suggestion("S1").id();
        let RatingStep::Refine(ticket) = session.apply_rating(&id, 0, 3).unwrap() else {
            panic!("expected a refine step");
        };

        let generation = session.begin_search();
        assert!(session.refining().is_empty());
        session.install(
            generation,
            ResultSet::new(
                SearchParams {
                    participants: vec![Participant::new("X")],
                },
                vec![],
                Coordinates::new(0.0, 0.0),
                "",
                vec![suggestion("S1")],
            ),
        );

        let outcome = session.finish_replacement(&ticket, Ok(Some(suggestion("S3"))));
        assert_eq!(outcome, RatingOutcome::Discarded);
        assert_eq!(names(&session), vec!["S1"]);
    }

    #[test]
    fn test_install_ignores_superseded_search() {
        let mut session = Session::new();
        let old = session.begin_search();
        session.begin_search();

        let results = ResultSet::new(
            SearchParams {
                participants: vec![],
            },
            vec![],
            Coordinates::new(0.0, 0.0),
            "",
            vec![],
        );
        assert!(!session.install(old, results));
        assert!(session.results().is_none());
    }

    #[test]
    fn test_release_only_current_generation() {
        let mut session = session_with(&["S1"], 1);
        let id = suggestion("S1").id();
        let RatingStep::Refine(ticket) = session.apply_rating(&id, 0, 3).unwrap() else {
            panic!("expected a refine step");
        };

        session.release(ticket.generation - 1, &id);
        assert!(session.is_refining(&id));

        session.release(ticket.generation, &id);
        assert!(!session.is_refining(&id));
    }

    #[test]
    fn test_is_empty() {
        let mut session = Session::new();
        assert!(!session.is_empty());

        let mut session_one = session_with(&["S1"], 1);
        session_one.remove(&suggestion("S1").id());
        assert!(session_one.is_empty());

        session.begin_search();
        assert!(!session.is_empty());
    }
}
