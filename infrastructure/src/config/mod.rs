//! Configuration file loading for midi
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `API_KEY`, `MAPS_API_KEY`, `MIDI_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./midi.toml` or `./.midi.toml`
//! 4. Global: `~/.config/midi/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, FileConfig,
    FileGeminiConfig, FileMapsConfig, FileOutputConfig, FileSearchConfig,
};
pub use loader::ConfigLoader;
