//! Presentation-level configuration
//!
//! Configuration for the rating REPL.

use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: dirs::data_dir().map(|p| p.join("midi").join("history.txt")),
        }
    }
}
