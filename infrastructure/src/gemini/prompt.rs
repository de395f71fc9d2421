//! Prompt templates and response schemas

use midi_application::SuggestionQuery;
use midi_domain::{Coordinates, Participant};
use serde_json::{Value, json};

/// Geocoding prompt for a batch of free-text locations
pub fn geocode_prompt(locations: &[String]) -> String {
    let numbered = locations
        .iter()
        .enumerate()
        .map(|(i, loc)| format!("{}. \"{}\"", i + 1, loc))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"For the following locations, provide their latitude and longitude.

Locations:
{numbered}

Respond ONLY with a JSON object with the structure: {{"locations": [{{"lat": <number>, "lng": <number>}}, ...]}}.
The array must have the same number of items as the input locations, in the same order.
If a location cannot be found, make its corresponding item in the array null."#
    )
}

pub fn geocode_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "locations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "lat": { "type": "NUMBER" },
                        "lng": { "type": "NUMBER" }
                    },
                    "nullable": true
                }
            }
        }
    })
}

/// Reverse-geocoding prompt; the answer is plain text
pub fn reverse_geocode_prompt(coords: Coordinates) -> String {
    format!(
        "Provide the most precise street address for the coordinates: latitude {}, longitude {}. \
         Respond with ONLY the address as a single string, for example: \
         '1600 Amphitheatre Parkway, Mountain View, CA 94043, USA'. \
         Do not include any other text or labels.",
        coords.lat, coords.lng
    )
}

/// One line describing a participant and their preferences
pub fn friend_line(index: usize, participant: &Participant) -> String {
    let mut line = format!("- Friend {} is at: \"{}\"", index + 1, participant.location);
    let preferences = &participant.preferences;
    if let Some(vibe) = &preferences.vibe {
        line.push_str(&format!(" and wants to do something like \"{}\".", vibe));
    }
    if let Some(price) = &preferences.price {
        line.push_str(&format!(" Their price preference is for {}.", price));
    }
    if let Some(distance) = &preferences.distance {
        line.push_str(&format!(" Their travel preference is for {}.", distance));
    }
    line
}

/// Exclusion paragraph, empty when nothing is excluded
pub fn exclusion_block(query: &SuggestionQuery) -> String {
    if query.exclude.is_empty() {
        return String::new();
    }
    let names = query
        .exclude
        .iter()
        .map(|s| format!("\"{} at {}\"", s.name, s.address))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "IMPORTANT: The users have already considered and rejected the following places. \
         Do NOT suggest them again: {}.",
        names
    )
}

/// Suggestion prompt for a query
pub fn suggestion_prompt(query: &SuggestionQuery) -> String {
    let group_size = query.participants.len();
    let friends = query
        .participants
        .iter()
        .enumerate()
        .map(|(i, p)| friend_line(i, p))
        .collect::<Vec<_>>()
        .join("\n");

    let task = format!(
        "Your task is to find up to {count} excellent and highly-rated meeting points that cleverly \
         combine or satisfy the desires of this group. Prioritize places that are popular, \
         well-reviewed, unique, or considered local gems. A key requirement is fairness: also \
         prioritize locations that are an even travel distance and time for all friends, but you \
         must also consider each friend's individual travel preference when making suggestions. \
         Avoid suggestions that are very close to one person but very far from another.",
        count = query.count
    );

    format!(
        r#"Act as an expert local guide and super-concierge with impeccable taste. A group of {group_size} friends want to meet up.
{friends}

The geographical center of the group is at latitude {lat} and longitude {lng}.

{task}
{exclusions}

First, in the 'summary' field, provide a brief, friendly, one-sentence summary explaining your matching strategy for the group. If you are finding new suggestions to replace rejected ones, do not mention it in the summary; keep the summary focused on the user preferences.

Then, in the 'suggestions' array, provide the list of suggestions. For each suggestion, you must determine if it's a specific 'place' or a timed 'event'.

For each suggestion, provide all of the following details:
- type, name, venue, address, lat, lng, date (for events only).
- description: In this field, write a compelling sentence or two explaining *why* this is a great choice for this specific group. Mention its highlights, popularity, or what makes it unique to justify your selection.
- A 'priceLevel' field with a rating like "$", "$$", "$$$", or "Free" to indicate the cost. This can be null if not applicable.
- A 'url' field containing a link to a relevant website for the place or event, such as its official website or a Google Maps link. If a good link isn't available, this can be null.
- A 'travelInfo' array. This array MUST contain exactly {group_size} items, one for each friend in the original order.
- Each item in 'travelInfo' must have 'distanceFrom' (e.g., "8.4 km") and 'durationFrom' (e.g., "15 mins") from that specific friend's starting location to the suggestion."#,
        lat = query.midpoint.lat,
        lng = query.midpoint.lng,
        exclusions = exclusion_block(query),
    )
}

pub fn suggestion_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "suggestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "type": { "type": "STRING" },
                        "name": { "type": "STRING" },
                        "venue": { "type": "STRING" },
                        "address": { "type": "STRING" },
                        "lat": { "type": "NUMBER" },
                        "lng": { "type": "NUMBER" },
                        "date": { "type": "STRING", "nullable": true },
                        "description": { "type": "STRING" },
                        "url": { "type": "STRING", "nullable": true },
                        "priceLevel": { "type": "STRING", "nullable": true },
                        "travelInfo": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "distanceFrom": { "type": "STRING" },
                                    "durationFrom": { "type": "STRING" }
                                },
                                "required": ["distanceFrom", "durationFrom"]
                            }
                        }
                    },
                    "required": ["type", "name", "venue", "address", "lat", "lng", "description", "travelInfo"]
                }
            }
        },
        "required": ["summary", "suggestions"]
    })
}
