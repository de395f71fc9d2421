//! Google Static Maps URL for one result set
//!
//! Participants are lettered markers (A, B, ...) alternating between two
//! colors; suggestions are numbered markers in list order. The legend
//! mirrors the markers so a text front end can explain the picture.

use midi_domain::{Participant, ResultSet};
use reqwest::Url;
use tracing::warn;

pub const STATIC_MAP_BASE_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// Shown instead of a map when no key is configured
pub const MISSING_KEY_MESSAGE: &str = "API Key not provided. Map cannot be displayed.";

const MAP_SIZE: &str = "640x640";
const MAP_TYPE: &str = "roadmap";
const FRIEND_LABELS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const EVEN_FRIEND_COLOR: &str = "0xa855f7";
const ODD_FRIEND_COLOR: &str = "0xec4899";
const SUGGESTION_COLOR: &str = "0x9333ea";

/// The picture part of a map
#[derive(Debug, Clone, PartialEq)]
pub enum MapImage {
    /// Static map image URL
    Url(String),
    /// Why no image can be shown
    Unavailable(String),
}

/// What a legend entry stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendKind {
    Start,
    Suggestion,
}

/// One marker explained
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub kind: LegendKind,
    /// Text printed on the marker
    pub marker: String,
    /// Marker color as `0xRRGGBB`
    pub color: &'static str,
    pub title: String,
    /// Address line, suggestions only
    pub detail: Option<String>,
}

/// A rendered map: image plus legend
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMap {
    pub image: MapImage,
    pub legend: Vec<LegendEntry>,
}

fn friend_label(index: usize) -> char {
    char::from(FRIEND_LABELS[index % FRIEND_LABELS.len()])
}

fn friend_color(index: usize) -> &'static str {
    if index % 2 == 0 {
        EVEN_FRIEND_COLOR
    } else {
        ODD_FRIEND_COLOR
    }
}

fn start_title(index: usize) -> String {
    let label = Participant::label(index);
    if index == 0 {
        "Your Start".to_string()
    } else {
        format!("{}'s Start", label)
    }
}

/// Builds [`StaticMap`]s with one API key
#[derive(Debug, Clone, Default)]
pub struct StaticMapBuilder {
    api_key: Option<String>,
}

impl StaticMapBuilder {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn build(&self, results: &ResultSet) -> StaticMap {
        StaticMap {
            image: self.image(results),
            legend: Self::legend(results),
        }
    }

    fn image(&self, results: &ResultSet) -> MapImage {
        let Some(api_key) = self.api_key.as_deref() else {
            return MapImage::Unavailable(MISSING_KEY_MESSAGE.to_string());
        };

        let mut params: Vec<(&str, String)> = vec![
            ("size", MAP_SIZE.to_string()),
            ("maptype", MAP_TYPE.to_string()),
            ("key", api_key.to_string()),
        ];

        for (i, location) in results.locations().iter().enumerate() {
            params.push((
                "markers",
                format!(
                    "color:{}|label:{}|{}",
                    friend_color(i),
                    friend_label(i),
                    location.coords
                ),
            ));
        }

        for (i, suggestion) in results.suggestions().iter().enumerate() {
            params.push((
                "markers",
                format!(
                    "color:{}|label:{}|{}",
                    SUGGESTION_COLOR,
                    i + 1,
                    suggestion.coordinates
                ),
            ));
        }

        match Url::parse_with_params(STATIC_MAP_BASE_URL, &params) {
            Ok(url) => MapImage::Url(url.into()),
            Err(e) => {
                warn!("Could not build static map URL: {}", e);
                MapImage::Unavailable(e.to_string())
            }
        }
    }

    fn legend(results: &ResultSet) -> Vec<LegendEntry> {
        let starts = (0..results.locations().len()).map(|i| LegendEntry {
            kind: LegendKind::Start,
            marker: friend_label(i).to_string(),
            color: friend_color(i),
            title: start_title(i),
            detail: None,
        });

        let suggestions = results
            .suggestions()
            .iter()
            .enumerate()
            .map(|(i, s)| LegendEntry {
                kind: LegendKind::Suggestion,
                marker: (i + 1).to_string(),
                color: SUGGESTION_COLOR,
                title: s.name.clone(),
                detail: Some(s.address.clone()),
            });

        starts.chain(suggestions).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midi_domain::{Coordinates, FriendLocation, SearchParams, Suggestion};

    fn results() -> ResultSet {
        ResultSet::new(
            SearchParams {
                participants: vec![Participant::new("Home"), Participant::new("Work")],
            },
            vec![
                FriendLocation::new("Home", Coordinates::new(37.7, -122.4)),
                FriendLocation::new("Work", Coordinates::new(37.8, -122.2)),
            ],
            Coordinates::new(37.75, -122.3),
            "summary",
            vec![
                Suggestion::place("Cafe X", "Cafe X", "123 Main St", Coordinates::new(37.76, -122.3)),
                Suggestion::place("Bar Y", "Bar Y", "9 High St", Coordinates::new(37.74, -122.31)),
            ],
        )
    }

    fn query_pairs(url: &str) -> Vec<(String, String)> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_url_parameters() {
        let map = StaticMapBuilder::new(Some("k123".to_string())).build(&results());
        let MapImage::Url(url) = map.image else {
            panic!("expected a map URL");
        };

        assert!(url.starts_with(STATIC_MAP_BASE_URL));
        let pairs = query_pairs(&url);
        assert!(pairs.contains(&("size".to_string(), "640x640".to_string())));
        assert!(pairs.contains(&("maptype".to_string(), "roadmap".to_string())));
        assert!(pairs.contains(&("key".to_string(), "k123".to_string())));

        let markers: Vec<_> = pairs
            .iter()
            .filter(|(k, _)| k == "markers")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(
            markers,
            vec![
                "color:0xa855f7|label:A|37.7,-122.4",
                "color:0xec4899|label:B|37.8,-122.2",
                "color:0x9333ea|label:1|37.76,-122.3",
                "color:0x9333ea|label:2|37.74,-122.31",
            ]
        );
    }

    #[test]
    fn test_missing_key() {
        let map = StaticMapBuilder::new(None).build(&results());
        assert_eq!(map.image, MapImage::Unavailable(MISSING_KEY_MESSAGE.to_string()));
        // The legend is still useful without a picture
        assert_eq!(map.legend.len(), 4);

        let blank = StaticMapBuilder::new(Some("  ".to_string())).build(&results());
        assert!(matches!(blank.image, MapImage::Unavailable(_)));
    }

    #[test]
    fn test_legend() {
        let legend = StaticMapBuilder::default().build(&results()).legend;

        let titles: Vec<_> = legend.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Your Start", "Friend 2's Start", "Cafe X", "Bar Y"]);
        assert_eq!(legend[1].color, ODD_FRIEND_COLOR);
        assert_eq!(legend[3].marker, "2");
        assert_eq!(legend[3].detail.as_deref(), Some("9 High St"));
        assert_eq!(legend[0].kind, LegendKind::Start);
    }
}
