//! Gemini adapter
//!
//! - [`client`]: `generateContent` over `reqwest`
//! - [`protocol`]: request/response and payload types
//! - [`prompt`]: prompt templates and response schemas
//! - [`service`]: the [`SuggestionService`](midi_application::SuggestionService) implementation

pub mod client;
pub mod error;
pub mod prompt;
pub mod protocol;
pub mod service;

pub use client::{GeminiClient, GeminiConfig};
pub use error::GeminiError;
pub use service::GeminiSuggestionService;
