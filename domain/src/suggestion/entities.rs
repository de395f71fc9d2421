//! Suggestion entities
//!
//! The serde layout matches the JSON emitted by the suggestion service:
//! `type` is the kind tag, `lat`/`lng` sit at the top level, and optional
//! fields may be `null` or missing.

use super::identity::SuggestionId;
use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};

/// Place or timed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SuggestionKind {
    /// A timed event; the date is free text as given by the service
    Event {
        #[serde(default)]
        date: Option<String>,
    },
    /// A venue that can be visited any time. Unknown tags fall back here.
    #[serde(other)]
    Place,
}

impl SuggestionKind {
    pub fn is_event(&self) -> bool {
        matches!(self, SuggestionKind::Event { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            SuggestionKind::Place => "Place",
            SuggestionKind::Event { .. } => "Event",
        }
    }
}

/// Travel estimate from one participant's start to a suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelInfo {
    #[serde(rename = "distanceFrom")]
    pub distance: String,
    #[serde(rename = "durationFrom")]
    pub duration: String,
}

impl TravelInfo {
    pub fn new(distance: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            distance: distance.into(),
            duration: duration.into(),
        }
    }
}

/// A candidate meeting place or event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(flatten)]
    pub kind: SuggestionKind,
    pub name: String,
    pub venue: String,
    pub address: String,
    #[serde(flatten)]
    pub coordinates: Coordinates,
    /// Why this is a good pick for the group
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "priceLevel")]
    pub price_level: Option<String>,
    /// One entry per participant, in participant order
    #[serde(default, rename = "travelInfo")]
    pub travel_info: Vec<TravelInfo>,
}

impl Suggestion {
    /// Create a place suggestion with only the required fields set
    pub fn place(
        name: impl Into<String>,
        venue: impl Into<String>,
        address: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            kind: SuggestionKind::Place,
            name: name.into(),
            venue: venue.into(),
            address: address.into(),
            coordinates,
            description: None,
            url: None,
            price_level: None,
            travel_info: Vec::new(),
        }
    }

    /// Create an event suggestion
    pub fn event(
        name: impl Into<String>,
        venue: impl Into<String>,
        address: impl Into<String>,
        coordinates: Coordinates,
        date: Option<String>,
    ) -> Self {
        Self {
            kind: SuggestionKind::Event { date },
            ..Self::place(name, venue, address, coordinates)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_price_level(mut self, price_level: impl Into<String>) -> Self {
        self.price_level = Some(price_level.into());
        self
    }

    pub fn with_travel_info(mut self, travel_info: Vec<TravelInfo>) -> Self {
        self.travel_info = travel_info;
        self
    }

    pub fn id(&self) -> SuggestionId {
        SuggestionId::of(&self.name, &self.address)
    }

    /// Event date, if this is an event that has one
    pub fn date(&self) -> Option<&str> {
        match &self.kind {
            SuggestionKind::Event { date } => date.as_deref(),
            SuggestionKind::Place => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_service_place() {
        let json = r#"{
            "type": "place",
            "name": "Cafe X",
            "venue": "Cafe X Roasters",
            "address": "123 Main St",
            "lat": 40.7,
            "lng": -73.9,
            "date": null,
            "description": "Great coffee, halfway for everyone.",
            "url": null,
            "priceLevel": "$$",
            "travelInfo": [
                {"distanceFrom": "3 km", "durationFrom": "10 mins"},
                {"distanceFrom": "4 km", "durationFrom": "12 mins"}
            ]
        }"#;

        let s: Suggestion = serde_json::from_str(json).unwrap();
        assert_eq!(s.kind, SuggestionKind::Place);
        assert_eq!(s.id().as_str(), "Cafe X-123 Main St");
        assert_eq!(s.coordinates, Coordinates::new(40.7, -73.9));
        assert_eq!(s.url, None);
        assert_eq!(s.price_level.as_deref(), Some("$$"));
        assert_eq!(s.travel_info.len(), 2);
        assert_eq!(s.travel_info[1].duration, "12 mins");
    }

    #[test]
    fn test_deserialize_service_event() {
        let json = r#"{
            "type": "event",
            "name": "Jazz Night",
            "venue": "Blue Note",
            "address": "131 W 3rd St",
            "lat": 40.73,
            "lng": -74.0,
            "date": "Friday, June 6, 8:00 PM",
            "travelInfo": []
        }"#;

        let s: Suggestion = serde_json::from_str(json).unwrap();
        assert!(s.kind.is_event());
        assert_eq!(s.date(), Some("Friday, June 6, 8:00 PM"));
        assert_eq!(s.description, None);
    }

    #[test]
    fn test_unknown_kind_falls_back_to_place() {
        let json = r#"{
            "type": "activity",
            "name": "Mini Golf",
            "venue": "Putt Club",
            "address": "9 Green Rd",
            "lat": 1.0,
            "lng": 2.0
        }"#;

        let s: Suggestion = serde_json::from_str(json).unwrap();
        assert_eq!(s.kind, SuggestionKind::Place);
        assert_eq!(s.date(), None);
        assert_eq!(serde_json::to_value(&s).unwrap()["type"], "place");
    }

    #[test]
    fn test_place_has_no_date() {
        let s = Suggestion::place("A", "B", "C", Coordinates::new(0.0, 0.0));
        assert_eq!(s.date(), None);
        assert_eq!(s.kind.label(), "Place");
    }
}
