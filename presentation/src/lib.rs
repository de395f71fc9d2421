//! Presentation layer for midi
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive rating REPL.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod rating;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressMode, ProgressReporter, SimpleProgress};
pub use rating::repl::{RatingRepl, ReplCommand};
