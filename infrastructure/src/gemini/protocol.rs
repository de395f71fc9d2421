//! Gemini REST protocol types.
//!
//! Only the subset of `generateContent` used here is modelled:
//!
//! - **Request**: one user turn with a single text part, optionally asking
//!   for JSON output constrained by a response schema
//! - **Response**: candidates whose first text parts carry the answer
//! - **Payloads**: the JSON documents the prompts ask the model to return

use crate::gemini::error::{GeminiError, Result};
use midi_domain::Coordinates;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// `generateContent` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A plain-text request
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            generation_config: None,
        }
    }

    /// A request whose answer must be JSON matching `schema`
    pub fn json(prompt: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            }),
        }
    }
}

/// One conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

/// A content part. Non-text parts are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Output constraints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

/// `generateContent` response body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, `None` when there is none
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

// ==================== Payloads ====================

/// Answer to a geocoding prompt
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodePayload {
    #[serde(default)]
    pub locations: Vec<Option<PartialCoordinates>>,
}

/// A geocoding entry; either half may be missing
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PartialCoordinates {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl PartialCoordinates {
    /// Coordinates when both halves are present and finite
    pub fn complete(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(Coordinates::new(lat, lng))
            }
            _ => None,
        }
    }
}

impl GeocodePayload {
    pub fn into_coordinates(self) -> Vec<Option<Coordinates>> {
        self.locations
            .into_iter()
            .map(|entry| entry.and_then(|c| c.complete()))
            .collect()
    }
}

/// Answer to a suggestion prompt.
///
/// Suggestions stay raw so one malformed entry does not sink the batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionPayload {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub suggestions: Vec<serde_json::Value>,
}

/// Remove a surrounding Markdown code fence, if any
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string (e.g. "json")
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse a JSON payload out of model text
pub fn parse_payload<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(strip_code_fences(text)).map_err(|e| GeminiError::Parse {
        error: e.to_string(),
        raw: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_request_serialization() {
        let request = GenerateContentRequest::json("hello", json!({"type": "OBJECT"}));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_text_request_has_no_generation_config() {
        let value = serde_json::to_value(GenerateContentRequest::text("hi")).unwrap();
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": "1}"}]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();

        assert!(response.text().is_none());
        assert_eq!(
            response.prompt_feedback.unwrap().block_reason.as_deref(),
            Some("SAFETY")
        );
    }

    #[test]
    fn test_geocode_payload_with_gaps() {
        let payload: GeocodePayload = parse_payload(
            r#"{"locations": [{"lat": 37.7, "lng": -122.4}, null, {"lat": 1.0}]}"#,
        )
        .unwrap();

        assert_eq!(
            payload.into_coordinates(),
            vec![Some(Coordinates::new(37.7, -122.4)), None, None]
        );
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n[]\n```\n"), "[]");
        assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_payload_error_keeps_raw_text() {
        let err = parse_payload::<GeocodePayload>("not json").unwrap_err();
        assert!(matches!(err, GeminiError::Parse { raw, .. } if raw == "not json"));
    }

    #[test]
    fn test_api_error_envelope() {
        let envelope: ApiErrorEnvelope = serde_json::from_str(
            r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.error.code, 400);
        assert_eq!(envelope.error.message, "API key not valid");
    }
}
