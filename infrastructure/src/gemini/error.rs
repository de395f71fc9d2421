//! Error types for the Gemini adapter

use midi_application::ServiceError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when talking to the Gemini REST API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    Parse { error: String, raw: String },

    #[error("Gemini returned no text")]
    EmptyResponse,
}

impl From<GeminiError> for ServiceError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey => ServiceError::MissingCredentials,
            GeminiError::Http(e) if e.is_timeout() => ServiceError::Timeout,
            GeminiError::Http(e) if e.is_connect() => ServiceError::Connection(e.to_string()),
            GeminiError::Http(e) => ServiceError::RequestFailed(e.to_string()),
            e @ GeminiError::Api { .. } => ServiceError::RequestFailed(e.to_string()),
            GeminiError::Serialization(e) => ServiceError::Parse(e.to_string()),
            GeminiError::Parse { error, .. } => ServiceError::Parse(error),
            GeminiError::EmptyResponse => ServiceError::EmptyResponse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_mapping() {
        assert_eq!(
            ServiceError::from(GeminiError::MissingApiKey),
            ServiceError::MissingCredentials
        );
        assert_eq!(
            ServiceError::from(GeminiError::EmptyResponse),
            ServiceError::EmptyResponse
        );
        assert_eq!(
            ServiceError::from(GeminiError::Api {
                status: 429,
                message: "quota".to_string()
            }),
            ServiceError::RequestFailed("Gemini API error (status 429): quota".to_string())
        );
        assert_eq!(
            ServiceError::from(GeminiError::Parse {
                error: "bad".to_string(),
                raw: "{".to_string()
            }),
            ServiceError::Parse("bad".to_string())
        );
    }
}
