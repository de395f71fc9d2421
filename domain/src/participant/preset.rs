//! Named preference presets
//!
//! Each preset maps a short name to the descriptive phrase that is sent to
//! the suggestion service. Anything that is not a preset name is used as-is.

/// Vibe presets: (name, phrase)
pub const VIBE_PRESETS: &[(&str, &str)] = &[
    ("chill", "a chill spot for conversation like a quiet cafe or lounge"),
    (
        "active",
        "something fun and active like bowling, mini-golf, or an arcade",
    ),
    (
        "foodie",
        "a unique or highly-rated restaurant, food truck, or dessert spot",
    ),
    ("beer", "a cool brewery or craft beer bar"),
    (
        "nightlife",
        "a great spot for cocktails, wine, or a fun night out",
    ),
    (
        "culture",
        "an art gallery, museum, or a place with live music",
    ),
    (
        "casual",
        "a low-key, casual spot like a boba shop or fast-food place",
    ),
    (
        "different",
        "something unique and interesting like an escape room or a local market",
    ),
];

/// Price presets: (name, phrase)
pub const PRICE_PRESETS: &[(&str, &str)] = &[
    ("$", "cheap or free places"),
    ("$$", "moderately priced places"),
    ("$$$", "splurge-worthy or pricey places"),
];

/// Travel-distance presets: (name, phrase)
pub const DISTANCE_PRESETS: &[(&str, &str)] = &[
    ("short", "a short trip, preferably under 15-20 minutes"),
    ("medium", "a medium trip, around 20-40 minutes"),
    ("long", "a longer trip, as over 40 minutes is fine"),
];

/// Words that mean "no preference"
const NO_PREFERENCE: &[&str] = &["", "any", "none", "no preference"];

/// Resolve user input against a preset table.
///
/// Returns `None` for "no preference", the preset phrase for a known preset
/// name (case-insensitive), and the trimmed input otherwise.
pub fn resolve(presets: &[(&str, &str)], input: &str) -> Option<String> {
    let trimmed = input.trim();
    let lowered = trimmed.to_lowercase();

    if NO_PREFERENCE.contains(&lowered.as_str()) {
        return None;
    }

    presets
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, phrase)| (*phrase).to_string())
        .or_else(|| Some(trimmed.to_string()))
}
