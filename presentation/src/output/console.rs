//! Console output formatter for search results

use colored::Colorize;
use midi_application::{RatingOutcome, SessionSnapshot};
use midi_domain::{
    MAX_STARS, Participant, RankedSuggestion, ResultSet, Stars, SuggestionKind, Verdict,
};
use midi_infrastructure::{LegendKind, MapImage, StaticMap};
use serde_json::json;

/// Formats session state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the current results, grouped into podium and ordinary list
    pub fn format_results(snapshot: &SessionSnapshot) -> String {
        let Some(results) = snapshot.results.as_ref() else {
            return match snapshot.error.as_deref() {
                Some(error) => Self::format_error(error),
                None => "No search yet.\n".to_string(),
            };
        };
        let Some(grouping) = snapshot.grouping() else {
            return String::new();
        };

        let mut output = String::new();

        output.push_str(&Self::header("Here's What I Found For You!"));
        output.push('\n');
        if !results.summary().is_empty() {
            output.push_str(&format!("\n{}\n", results.summary().italic()));
        }

        if let Some(error) = snapshot.error.as_deref() {
            output.push('\n');
            output.push_str(&Self::format_error(error));
        }

        if grouping.has_podium() {
            output.push_str(&Self::section_header("It's a Tie! Your Top Choices"));
            output.push_str(&format!(
                "{}\n",
                "You all gave these spots a perfect rating!".dimmed()
            ));
            for ranked in &grouping.podium {
                output.push('\n');
                output.push_str(&Self::format_card(ranked, results, snapshot));
            }
            if !grouping.others.is_empty() {
                output.push_str(&format!("\n{}\n", "- - - - - - - - - - - - - - - -".magenta()));
            }
        }

        if grouping.is_exhausted() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                "Looks like we've run out of ideas!".magenta().bold(),
                "Try a new search with different vibes to find more spots.".dimmed()
            ));
        }

        for ranked in &grouping.others {
            output.push('\n');
            output.push_str(&Self::format_card(ranked, results, snapshot));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format one suggestion card
    pub fn format_card(
        ranked: &RankedSuggestion<'_>,
        results: &ResultSet,
        snapshot: &SessionSnapshot,
    ) -> String {
        let suggestion = ranked.suggestion;
        let id = suggestion.id();
        let mut output = String::new();

        let title = format!("[{}] {}", ranked.number, suggestion.name);
        match ranked.verdict.badge() {
            Some(badge) if ranked.verdict == Verdict::PerfectMatch => {
                output.push_str(&format!("{}  {}\n", title.bold(), badge.green().bold()));
            }
            Some(badge) => {
                output.push_str(&format!("{}  {}\n", title.bold(), badge.yellow().bold()));
            }
            None => output.push_str(&format!("{}\n", title.bold())),
        }

        let mut line = vec![suggestion.kind.label().to_uppercase().magenta().to_string()];
        line.push(suggestion.venue.clone());
        if let Some(price) = &suggestion.price_level {
            line.push(price.clone());
        }
        output.push_str(&format!("    {}\n", line.join(" · ")));

        if let SuggestionKind::Event { date: Some(date) } = &suggestion.kind {
            output.push_str(&format!("    {}\n", date.red()));
        }
        output.push_str(&format!("    {}\n", suggestion.address.dimmed()));

        if let Some(description) = &suggestion.description {
            output.push_str(&Self::indent(description, "    "));
            output.push('\n');
        }
        if let Some(url) = &suggestion.url {
            output.push_str(&format!("    {}\n", url.underline()));
        }

        for (i, travel) in suggestion.travel_info.iter().enumerate() {
            output.push_str(&format!(
                "    From {}: {} · {}\n",
                Participant::label(i),
                travel.distance,
                travel.duration
            ));
        }

        let ratings = (0..results.participant_count())
            .map(|i| {
                format!(
                    "{} {}",
                    Participant::label(i),
                    Self::stars(snapshot.ratings.rating(&id, i))
                )
            })
            .collect::<Vec<_>>()
            .join("   ");
        output.push_str(&format!("    {}\n", ratings));

        if snapshot.is_refining(&id) {
            output.push_str(&format!("    {}\n", "Finding a new idea...".cyan().italic()));
        }

        output
    }

    /// Format as JSON
    pub fn format_json(snapshot: &SessionSnapshot) -> String {
        let Some(results) = snapshot.results.as_ref() else {
            return serde_json::to_string_pretty(&json!({ "error": snapshot.error }))
                .unwrap_or_else(|_| "{}".to_string());
        };
        let mut ranked: Vec<RankedSuggestion<'_>> = snapshot
            .grouping()
            .map(|g| g.podium.into_iter().chain(g.others).collect())
            .unwrap_or_default();
        let has_podium = snapshot.grouping().is_some_and(|g| g.has_podium());
        let podium: Vec<usize> = if has_podium {
            ranked
                .iter()
                .filter(|r| r.verdict == Verdict::PerfectMatch)
                .map(|r| r.number)
                .collect()
        } else {
            Vec::new()
        };
        ranked.sort_by_key(|r| r.number);

        let suggestions: Vec<_> = ranked
            .iter()
            .map(|r| {
                let id = r.suggestion.id();
                json!({
                    "number": r.number,
                    "id": id,
                    "verdict": r.verdict.to_string(),
                    "ratings": snapshot.ratings.ratings_for(&id),
                    "refining": snapshot.is_refining(&id),
                    "suggestion": r.suggestion,
                })
            })
            .collect();

        let value = json!({
            "summary": results.summary(),
            "midpoint": results.midpoint(),
            "locations": results.locations(),
            "podium": podium,
            "suggestions": suggestions,
            "error": snapshot.error,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a static map: image URL (or why there is none) plus legend
    pub fn format_map(map: &StaticMap) -> String {
        let mut output = Self::section_header("All Suggestions on Map");

        match &map.image {
            MapImage::Url(url) => output.push_str(&format!("{}\n", url.underline())),
            MapImage::Unavailable(reason) => output.push_str(&format!("{}\n", reason.red())),
        }

        output.push_str(&format!("\n{}\n", "Legend".bold()));
        for entry in &map.legend {
            match entry.kind {
                LegendKind::Start => {
                    output.push_str(&format!("  ({}) {}\n", entry.marker.bold(), entry.title));
                }
                LegendKind::Suggestion => {
                    output.push_str(&format!(
                        "  [{}] {}  {}\n",
                        entry.marker.bold(),
                        entry.title,
                        entry.detail.as_deref().unwrap_or_default().dimmed()
                    ));
                }
            }
        }
        output
    }

    /// Format an error banner
    pub fn format_error(message: &str) -> String {
        format!(
            "{}\n{}\n",
            "Oops, something went wrong!".red().bold(),
            message.red()
        )
    }

    /// One-line feedback after a rating
    pub fn format_outcome(outcome: &RatingOutcome) -> String {
        match outcome {
            RatingOutcome::Recorded { stars: 0, .. } => "Rating cleared.".to_string(),
            RatingOutcome::Recorded { stars, verdict } => match verdict.badge() {
                Some(badge) => format!("{} {}", Self::stars(*stars), badge.green().bold()),
                None => Self::stars(*stars),
            },
            RatingOutcome::Removed => "Nobody liked that one, so it's gone.".to_string(),
            RatingOutcome::AlreadyRefining => {
                "Already finding a new idea for that one.".to_string()
            }
            RatingOutcome::Replaced { .. } => {
                format!("{}", "Swapped in a new idea!".green())
            }
            RatingOutcome::Exhausted => {
                "No new ideas for that one, so it was removed.".to_string()
            }
            RatingOutcome::ReplacementFailed { message } => format!("{}", message.red()),
            RatingOutcome::Discarded => "That suggestion is no longer in the list.".to_string(),
        }
    }

    /// Render a 0-5 rating as stars
    pub fn stars(stars: Stars) -> String {
        let filled = stars.min(MAX_STARS) as usize;
        format!(
            "{}{}",
            "★".repeat(filled).yellow(),
            "☆".repeat(MAX_STARS as usize - filled)
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.magenta(), title.bold(), line.magenta())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.magenta().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).magenta())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midi_application::Session;
    use midi_domain::{Coordinates, FriendLocation, SearchParams, Suggestion, TravelInfo};

    fn suggestion(name: &str) -> Suggestion {
        Suggestion::place(
            name,
            format!("{} Venue", name),
            format!("{} Street", name),
            Coordinates::new(0.0, 0.0),
        )
    }

    fn snapshot(names: &[&str], ratings: &[(&str, usize, Stars)]) -> SessionSnapshot {
        let mut session = Session::new();
        let generation = session.begin_search();
        session.install(
            generation,
            ResultSet::new(
                SearchParams {
                    participants: vec![Participant::new("A"), Participant::new("B")],
                },
                vec![
                    FriendLocation::new("A", Coordinates::new(0.0, 0.0)),
                    FriendLocation::new("B", Coordinates::new(1.0, 1.0)),
                ],
                Coordinates::new(0.5, 0.5),
                "Spots for everyone.",
                names.iter().map(|n| suggestion(n)).collect(),
            ),
        );
        for (name, participant, stars) in ratings {
            session
                .apply_rating(&suggestion(name).id(), *participant, *stars)
                .unwrap();
        }
        session.snapshot()
    }

    #[test]
    fn test_stars() {
        colored::control::set_override(false);
        assert_eq!(ConsoleFormatter::stars(3), "★★★☆☆");
        assert_eq!(ConsoleFormatter::stars(0), "☆☆☆☆☆");
    }

    #[test]
    fn test_results_without_podium() {
        let output = ConsoleFormatter::format_results(&snapshot(
            &["S1", "S2"],
            &[("S1", 0, 5), ("S1", 1, 5)],
        ));

        assert!(output.contains("Here's What I Found For You!"));
        assert!(output.contains("Spots for everyone."));
        assert!(output.contains("Perfect Match!"));
        assert!(!output.contains("It's a Tie!"));
        assert!(output.find("S1 Venue").unwrap() < output.find("S2 Venue").unwrap());
    }

    #[test]
    fn test_results_with_podium() {
        let output = ConsoleFormatter::format_results(&snapshot(
            &["S1", "S2", "S3"],
            &[("S1", 0, 5), ("S1", 1, 5), ("S3", 0, 5), ("S3", 1, 5)],
        ));

        assert!(output.contains("It's a Tie! Your Top Choices"));
        // Podium comes first, ordinary list after
        assert!(output.find("S3 Venue").unwrap() < output.find("S2 Venue").unwrap());
    }

    #[test]
    fn test_exhausted_results() {
        let output = ConsoleFormatter::format_results(&snapshot(
            &["S1"],
            &[("S1", 0, 1), ("S1", 1, 2)],
        ));
        assert!(output.contains("Looks like we've run out of ideas!"));
    }

    #[test]
    fn test_card_details() {
        let mut snap = snapshot(&["S1"], &[("S1", 0, 4)]);
        let mut results = snap.results.take().unwrap();
        let event = Suggestion::event(
            "Jazz",
            "The Hall",
            "5 Oak Ave",
            Coordinates::new(0.0, 0.0),
            Some("Friday 8pm".to_string()),
        )
        .with_price_level("$$")
        .with_description("Live music.")
        .with_travel_info(vec![
            TravelInfo::new("3 km", "10 mins"),
            TravelInfo::new("5 km", "20 mins"),
        ]);
        results.replace(&suggestion("S1").id(), event);
        snap.results = Some(results);

        let grouping = snap.grouping().unwrap();
        let card = ConsoleFormatter::format_card(
            &grouping.others[0],
            snap.results.as_ref().unwrap(),
            &snap,
        );

        assert!(card.contains("[1] Jazz"));
        assert!(card.contains("EVENT"));
        assert!(card.contains("Friday 8pm"));
        assert!(card.contains("From Friend 2: 5 km · 20 mins"));
        assert!(card.contains("Live music."));
    }

    #[test]
    fn test_error_only() {
        let snap = SessionSnapshot {
            error: Some("Could not find one or more locations.".to_string()),
            ..Default::default()
        };
        let output = ConsoleFormatter::format_results(&snap);
        assert!(output.contains("Oops, something went wrong!"));
        assert!(output.contains("Could not find one or more locations."));
    }

    #[test]
    fn test_json_output() {
        let snap = snapshot(
            &["S1", "S2", "S3"],
            &[("S1", 0, 5), ("S1", 1, 5), ("S3", 0, 5), ("S3", 1, 5), ("S2", 0, 3)],
        );

        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&snap)).unwrap();

        assert_eq!(value["summary"], "Spots for everyone.");
        assert_eq!(value["podium"], json!([1, 3]));
        assert_eq!(value["suggestions"][1]["number"], 2);
        assert_eq!(value["suggestions"][1]["id"], "S2-S2 Street");
        assert_eq!(value["suggestions"][1]["ratings"]["0"], 3);
        assert_eq!(value["suggestions"][0]["verdict"], "perfect-match");
        assert_eq!(value["suggestions"][0]["suggestion"]["type"], "place");
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            ConsoleFormatter::format_outcome(&RatingOutcome::Recorded {
                stars: 0,
                verdict: Verdict::Pending
            }),
            "Rating cleared."
        );
        assert!(ConsoleFormatter::format_outcome(&RatingOutcome::Exhausted).contains("removed"));
    }
}
