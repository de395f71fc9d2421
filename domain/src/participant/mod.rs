//! Participants of a meetup search
//!
//! A participant is identified by its position in the friend list. Index 0 is
//! the person running the search ("You"); everyone else is "Friend N" where
//! N is the 1-based position.

pub mod preset;

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Free-text preferences of one participant; `None` means no preference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub vibe: Option<String>,
    pub price: Option<String>,
    pub distance: Option<String>,
}

/// One member of the group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Starting location as typed by the user
    pub location: String,
    #[serde(default)]
    pub preferences: Preferences,
}

impl Participant {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            preferences: Preferences::default(),
        }
    }

    /// Set the vibe, resolving preset names
    pub fn with_vibe(mut self, vibe: &str) -> Self {
        self.preferences.vibe = preset::resolve(preset::VIBE_PRESETS, vibe);
        self
    }

    /// Set the price band, resolving preset names
    pub fn with_price(mut self, price: &str) -> Self {
        self.preferences.price = preset::resolve(preset::PRICE_PRESETS, price);
        self
    }

    /// Set the travel-distance band, resolving preset names
    pub fn with_distance(mut self, distance: &str) -> Self {
        self.preferences.distance = preset::resolve(preset::DISTANCE_PRESETS, distance);
        self
    }

    /// Label for the participant at `index`
    pub fn label(index: usize) -> String {
        if index == 0 {
            "You".to_string()
        } else {
            format!("Friend {}", index + 1)
        }
    }
}

impl std::str::FromStr for Participant {
    type Err = DomainError;

    /// Parse `"<location>[;vibe=..][;price=..][;distance=..]"`
    ///
    /// # Example
    ///
    /// ```
    /// use midi_domain::Participant;
    ///
    /// let p: Participant = "Shoreditch, London;vibe=beer;price=$$".parse().unwrap();
    /// assert_eq!(p.location, "Shoreditch, London");
    /// assert_eq!(p.preferences.price.as_deref(), Some("moderately priced places"));
    /// assert!(p.preferences.distance.is_none());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(';');
        let location = parts.next().unwrap_or_default().trim();
        if location.is_empty() {
            return Err(DomainError::InvalidParticipant(
                "location must not be empty".to_string(),
            ));
        }

        let mut participant = Participant::new(location);
        for part in parts {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (key, value) = part.split_once('=').ok_or_else(|| {
                DomainError::InvalidParticipant(format!("expected key=value, got '{}'", part))
            })?;
            participant = match key.trim().to_lowercase().as_str() {
                "vibe" | "mood" => participant.with_vibe(value),
                "price" => participant.with_price(value),
                "distance" | "travel" => participant.with_distance(value),
                other => {
                    return Err(DomainError::InvalidParticipant(format!(
                        "unknown preference '{}'. Valid: vibe, price, distance",
                        other
                    )));
                }
            };
        }
        Ok(participant)
    }
}
