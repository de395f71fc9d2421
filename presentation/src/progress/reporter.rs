//! Progress reporting while a search or replacement runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use midi_application::{NoProgress, ProgressNotifier, SearchStage};
use std::fmt::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Messages shown in turn while a search runs
pub const LOADING_MESSAGES: [&str; 6] = [
    "Calculating the halfway point...",
    "Scanning the area for the best spots...",
    "Comparing travel times for you...",
    "Asking local robots for recommendations...",
    "Checking traffic conditions...",
    "Finding the perfect place to meet...",
];

/// How long each loading message stays on screen
const MESSAGE_INTERVAL: Duration = Duration::from_millis(2500);

/// Loading message for a given elapsed time
pub fn loading_message(elapsed: Duration) -> &'static str {
    let index = (elapsed.as_millis() / MESSAGE_INTERVAL.as_millis()) as usize;
    LOADING_MESSAGES[index % LOADING_MESSAGES.len()]
}

/// Reports progress with an animated spinner
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn search_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.magenta} {loading:.bold}")
            .unwrap()
            .with_key("loading", |state: &ProgressState, w: &mut dyn Write| {
                let _ = w.write_str(loading_message(state.elapsed()));
            })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.magenta} {msg}")
            .unwrap()
    }

    fn slot(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start(&self, style: ProgressStyle, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(style);
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(120));
        if let Some(old) = self.slot().replace(pb) {
            old.finish_and_clear();
        }
    }

    fn finish(&self) {
        if let Some(pb) = self.slot().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: SearchStage) {
        // One spinner spans both stages
        if stage == SearchStage::Geocoding || self.slot().is_none() {
            self.start(Self::search_style(), String::new());
        }
    }

    fn on_stage_complete(&self, stage: SearchStage, success: bool) {
        if !success || stage == SearchStage::Suggesting {
            self.finish();
        }
    }

    fn on_refine_start(&self, name: &str) {
        self.start(
            Self::spinner_style(),
            format!("Finding a new idea to replace {}...", name.bold()),
        );
    }

    fn on_refine_complete(&self, _name: &str, _success: bool) {
        self.finish();
    }
}

/// How search progress is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Animated spinner on an interactive terminal
    Spinner,
    /// One line per stage when stderr is redirected
    Lines,
    /// Nothing (`--quiet`)
    Off,
}

impl ProgressMode {
    pub fn detect(quiet: bool, stderr_is_terminal: bool) -> Self {
        match (quiet, stderr_is_terminal) {
            (true, _) => Self::Off,
            (false, true) => Self::Spinner,
            (false, false) => Self::Lines,
        }
    }

    pub fn notifier(self) -> Box<dyn ProgressNotifier> {
        match self {
            Self::Spinner => Box::new(ProgressReporter::new()),
            Self::Lines => Box::new(SimpleProgress),
            Self::Off => Box::new(NoProgress),
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: SearchStage) {
        let message = match stage {
            SearchStage::Geocoding => LOADING_MESSAGES[0],
            SearchStage::Suggesting => LOADING_MESSAGES[1],
        };
        eprintln!("{} {}", "->".magenta(), message);
    }

    fn on_stage_complete(&self, stage: SearchStage, success: bool) {
        if !success {
            eprintln!("  {} {}", "x".red(), stage.as_str());
        }
    }

    fn on_refine_start(&self, name: &str) {
        eprintln!("{} Finding a new idea to replace {}...", "->".magenta(), name);
    }
}
