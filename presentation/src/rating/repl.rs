//! REPL for rating suggestions after a search

use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use midi_application::{NoProgress, ProgressNotifier, SessionController, SuggestionService};
use midi_domain::{MAX_STARS, Participant, Stars};
use midi_infrastructure::StaticMapBuilder;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;

/// One parsed REPL line
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Rate suggestion `number` (1-based) for participant `participant` (0-based)
    Rate {
        number: usize,
        participant: usize,
        stars: Stars,
    },
    Show,
    Map,
    /// Search again with the same friends
    New,
    Dismiss,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse one input line
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err("Empty command".to_string());
        };

        match command.to_lowercase().as_str() {
            "rate" | "r" => {
                let args: Vec<&str> = words.collect();
                let [number, who, stars] = args.as_slice() else {
                    return Err("Usage: rate <suggestion> <you|friend number> <1-5>".to_string());
                };
                let number = number
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| format!("Invalid suggestion number: {}", number))?;
                let participant = Self::parse_participant(who)?;
                let stars = stars
                    .parse::<Stars>()
                    .ok()
                    .filter(|s| (1..=MAX_STARS).contains(s))
                    .ok_or_else(|| format!("Stars must be between 1 and {}", MAX_STARS))?;
                Ok(Self::Rate {
                    number,
                    participant,
                    stars,
                })
            }
            "show" | "ls" => Ok(Self::Show),
            "map" => Ok(Self::Map),
            "new" => Ok(Self::New),
            "dismiss" => Ok(Self::Dismiss),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("Unknown command: {}. Type 'help' for commands.", other)),
        }
    }

    /// "you" is the first participant; "Friend N" is number N
    fn parse_participant(word: &str) -> Result<usize, String> {
        if word.eq_ignore_ascii_case("you") {
            return Ok(0);
        }
        word.parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(|n| n - 1)
            .ok_or_else(|| format!("Invalid participant: {} (use 'you' or a friend number)", word))
    }
}

/// Interactive rating REPL
pub struct RatingRepl<S: SuggestionService + 'static> {
    controller: Arc<SessionController<S>>,
    participants: Vec<Participant>,
    maps: StaticMapBuilder,
    config: ReplConfig,
}

impl<S: SuggestionService + 'static> RatingRepl<S> {
    pub fn new(
        controller: Arc<SessionController<S>>,
        participants: Vec<Participant>,
        maps: StaticMapBuilder,
    ) -> Self {
        Self {
            controller,
            participants,
            maps,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        Self::print_help();

        loop {
            match rl.readline("rate> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    match ReplCommand::parse(line) {
                        Ok(ReplCommand::Quit) => {
                            println!("Bye!");
                            break;
                        }
                        Ok(command) => self.handle(command).await,
                        Err(message) => println!("{}", message),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.config.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    async fn handle(&self, command: ReplCommand) {
        match command {
            ReplCommand::Rate {
                number,
                participant,
                stars,
            } => self.rate(number, participant, stars).await,
            ReplCommand::Show => {
                println!("{}", ConsoleFormatter::format_results(&self.controller.snapshot()));
            }
            ReplCommand::Map => {
                let snapshot = self.controller.snapshot();
                match snapshot.results.as_ref() {
                    Some(results) => {
                        println!("{}", ConsoleFormatter::format_map(&self.maps.build(results)))
                    }
                    None => println!("No results to map yet."),
                }
            }
            ReplCommand::New => self.search_again().await,
            ReplCommand::Dismiss => self.controller.dismiss_error(),
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Quit => {}
        }
    }

    async fn search_again(&self) {
        let reporter = ProgressReporter::new();
        let result = self
            .controller
            .search_with_progress(self.participants.clone(), self.progress(&reporter))
            .await;

        match result {
            Ok(_) => println!("{}", ConsoleFormatter::format_results(&self.controller.snapshot())),
            Err(e) => println!("{}", ConsoleFormatter::format_error(&e.to_string())),
        }
    }

    fn progress<'a>(&self, reporter: &'a ProgressReporter) -> &'a dyn ProgressNotifier {
        if self.config.show_progress {
            reporter
        } else {
            &NoProgress
        }
    }

    async fn rate(&self, number: usize, participant: usize, stars: Stars) {
        let snapshot = self.controller.snapshot();
        let Some(id) = snapshot
            .results
            .as_ref()
            .and_then(|results| results.at(number - 1))
            .map(|suggestion| suggestion.id())
        else {
            println!("No suggestion number {}", number);
            return;
        };

        let reporter = ProgressReporter::new();
        match self
            .controller
            .rate_with_progress(&id, participant, stars, self.progress(&reporter))
            .await
        {
            Ok(outcome) => {
                println!(
                    "{} rated [{}]: {}",
                    Participant::label(participant),
                    number,
                    ConsoleFormatter::format_outcome(&outcome)
                );
                println!("{}", ConsoleFormatter::format_results(&self.controller.snapshot()));
            }
            Err(e) => println!("{}", ConsoleFormatter::format_error(&e.to_string())),
        }
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  rate <n> <you|friend> <1-5>  - Rate suggestion n (same stars again clears)");
        println!("  show                         - Show the current results");
        println!("  map                          - Show the static map link and legend");
        println!("  dismiss                      - Hide the error banner");
        println!("  new                          - Search again with the same friends");
        println!("  help                         - Show this help");
        println!("  quit                         - Exit");
        println!();
    }
}
