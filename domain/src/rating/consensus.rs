//! Consensus evaluation
//!
//! Classifies one suggestion from its ratings once every participant has
//! rated it. Rules are checked in a fixed order and the first match wins:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  all rated?  no ─────────────────────────────▶ Pending   │
//! │     │ yes                                                │
//! │     ├─ every rating == 5 ────────────────────▶ Perfect   │
//! │     ├─ every rating >= 4 ────────────────────▶ Good      │
//! │     ├─ every rating in 1..=2 ────────────────▶ Reject    │
//! │     ├─ every rating in 2..=3 ────────────────▶ Refine    │
//! │     └─ otherwise ────────────────────────────▶ Neutral   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! A unanimous 2 satisfies both the reject and the refine range; reject is
//! checked first and wins.

use super::store::ParticipantRatings;
use serde::{Deserialize, Serialize};

/// Classification of a suggestion's ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// Not every participant has rated yet
    Pending,
    /// Everyone gave 5 stars
    PerfectMatch,
    /// Everyone gave at least 4 stars
    GoodMatch,
    /// Everyone gave 1 or 2 stars: drop it
    Reject,
    /// Everyone gave 2 or 3 stars: ask for a replacement
    Refine,
    /// Mixed opinions
    Neutral,
}

impl Verdict {
    /// Classify the ratings of one suggestion
    ///
    /// # Example
    ///
    /// ```
    /// use midi_domain::{ParticipantRatings, Verdict};
    ///
    /// let ratings: ParticipantRatings = [(0, 3), (1, 2)].into_iter().collect();
    /// assert_eq!(Verdict::evaluate(&ratings, 2), Verdict::Refine);
    /// assert_eq!(Verdict::evaluate(&ratings, 3), Verdict::Pending);
    /// ```
    pub fn evaluate(ratings: &ParticipantRatings, participant_count: usize) -> Self {
        let fully_rated = participant_count > 0
            && ratings.len() == participant_count
            && ratings.values().all(|&r| r > 0);

        if !fully_rated {
            return Verdict::Pending;
        }

        let all = |pred: fn(u8) -> bool| ratings.values().all(|&r| pred(r));

        if all(|r| r == 5) {
            Verdict::PerfectMatch
        } else if all(|r| r >= 4) {
            Verdict::GoodMatch
        } else if all(|r| (1..=2).contains(&r)) {
            Verdict::Reject
        } else if all(|r| (2..=3).contains(&r)) {
            Verdict::Refine
        } else {
            Verdict::Neutral
        }
    }

    /// Badge text, if any
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            Verdict::PerfectMatch => Some("Perfect Match!"),
            Verdict::GoodMatch => Some("Good Match!"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::Pending => "pending",
            Verdict::PerfectMatch => "perfect-match",
            Verdict::GoodMatch => "good-match",
            Verdict::Reject => "reject",
            Verdict::Refine => "refine",
            Verdict::Neutral => "neutral",
        };
        f.write_str(s)
    }
}
