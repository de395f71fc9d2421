//! Infrastructure layer for midi
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, the static map builder and configuration
//! file loading.

pub mod config;
pub mod gemini;
pub mod maps;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileGeminiConfig, FileMapsConfig,
    FileOutputConfig, FileSearchConfig,
};
pub use gemini::{GeminiClient, GeminiConfig, GeminiError, GeminiSuggestionService};
pub use maps::{LegendEntry, LegendKind, MapImage, StaticMap, StaticMapBuilder};
