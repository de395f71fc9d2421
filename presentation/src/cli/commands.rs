//! CLI command definitions

use clap::{Parser, ValueEnum};
use midi_domain::{Coordinates, Participant};
use std::path::PathBuf;

/// Output format for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Formatted cards, followed by the rating prompt on a terminal
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for midi
#[derive(Parser, Debug)]
#[command(name = "midi")]
#[command(author, version, about = "Find a fair place to meet up with your friends")]
#[command(long_about = r#"
midi finds places and events that work for the whole group.

Every friend gives a starting location and, optionally, what they feel like
doing, a price band and how far they are willing to travel. midi looks for
spots around the middle of the group that are fair for everybody.

After the results are shown, everyone can rate each suggestion with 0-5
stars. Spots you all dislike disappear, lukewarm ones are swapped for a new
idea, and spots you all love end up on the podium.

Friend syntax:
  "<location>[;vibe=<vibe>][;price=<price>][;distance=<distance>]"

  vibe presets:     chill, active, foodie, beer, nightlife, culture, casual, different
  price presets:    $, $$, $$$
  distance presets: short, medium, long
  Anything else is passed along as free text.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./midi.toml         Project-level config
3. ~/.config/midi/config.toml   Global config
The API key is read from the API_KEY environment variable.

Example:
  midi -f "Mission District, San Francisco;vibe=beer" -f "Downtown Oakland;price=\$\$"
  midi --locate 37.7749,-122.4194
"#)]
pub struct Cli {
    /// A friend's starting location and preferences (repeat for each friend; the first one is you)
    #[arg(short, long = "friend", value_name = "FRIEND", value_parser = parse_friend)]
    pub friends: Vec<Participant>,

    /// Look up the street address for "lat,lng" and exit
    #[arg(long, value_name = "LAT,LNG", value_parser = parse_coordinates)]
    pub locate: Option<Coordinates>,

    /// Number of suggestions to ask for
    #[arg(short = 'n', long, value_name = "N")]
    pub count: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the results and exit without the rating prompt
    #[arg(long)]
    pub no_repl: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

fn parse_friend(value: &str) -> Result<Participant, String> {
    value.parse().map_err(|e: midi_domain::DomainError| e.to_string())
}

fn parse_coordinates(value: &str) -> Result<Coordinates, String> {
    value.parse().map_err(|e: midi_domain::DomainError| e.to_string())
}
