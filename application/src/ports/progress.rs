//! Progress notification port
//!
//! Defines the interface for reporting progress while a search runs.

/// Stages of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    /// Resolving every participant's location
    Geocoding,
    /// Asking for meeting suggestions around the midpoint
    Suggesting,
}

impl SearchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStage::Geocoding => "geocoding",
            SearchStage::Suggesting => "suggesting",
        }
    }
}

/// Callback for progress updates during a search
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: SearchStage);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: SearchStage, success: bool);

    /// Called when a replacement for one suggestion is requested
    fn on_refine_start(&self, _name: &str) {}

    /// Called when a replacement request finishes
    fn on_refine_complete(&self, _name: &str, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: SearchStage) {}
    fn on_stage_complete(&self, _stage: SearchStage, _success: bool) {}
}
