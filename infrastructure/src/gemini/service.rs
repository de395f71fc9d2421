//! [`SuggestionService`] backed by Gemini

use crate::gemini::client::{GeminiClient, GeminiConfig};
use crate::gemini::error::{GeminiError, Result};
use crate::gemini::prompt;
use crate::gemini::protocol::{GenerateContentRequest, GeocodePayload, SuggestionPayload, parse_payload};
use async_trait::async_trait;
use midi_application::{ServiceError, SuggestionBatch, SuggestionQuery, SuggestionService};
use midi_domain::{Coordinates, Suggestion};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Geocoding, reverse geocoding and suggestions through one Gemini model
pub struct GeminiSuggestionService {
    client: GeminiClient,
}

impl GeminiSuggestionService {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = GeminiClient::new(config)?;
        info!("GeminiSuggestionService initialized ({})", client.model());
        Ok(Self { client })
    }
}

/// Decode a geocoding answer, padding nothing and trimming nothing
fn decode_geocode(text: &str) -> Result<Vec<Option<Coordinates>>> {
    let payload: GeocodePayload = parse_payload(text)?;
    Ok(payload.into_coordinates())
}

/// Decode a suggestion answer.
///
/// Malformed entries, repeats and anything on the exclusion list are dropped.
fn decode_suggestions(text: &str, query: &SuggestionQuery) -> Result<SuggestionBatch> {
    let payload: SuggestionPayload = parse_payload(text)?;
    let mut seen: HashSet<_> = query.excluded_ids().into_iter().collect();

    let suggestions = payload
        .suggestions
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<Suggestion>(raw) {
            Ok(suggestion) => Some(suggestion),
            Err(e) => {
                warn!("Skipping malformed suggestion: {}", e);
                None
            }
        })
        .filter(|suggestion| {
            let fresh = seen.insert(suggestion.id());
            if !fresh {
                debug!("Skipping repeated suggestion '{}'", suggestion.name);
            }
            fresh
        })
        .collect();

    Ok(SuggestionBatch {
        summary: payload.summary.trim().to_string(),
        suggestions,
    })
}

#[async_trait]
impl SuggestionService for GeminiSuggestionService {
    fn has_credentials(&self) -> bool {
        self.client.has_api_key()
    }

    async fn geocode(&self, locations: &[String]) -> std::result::Result<Vec<Option<Coordinates>>, ServiceError> {
        if locations.is_empty() {
            return Ok(Vec::new());
        }
        let request =
            GenerateContentRequest::json(prompt::geocode_prompt(locations), prompt::geocode_schema());
        let text = self.client.generate(&request).await?;
        Ok(decode_geocode(&text)?)
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> std::result::Result<String, ServiceError> {
        let request = GenerateContentRequest::text(prompt::reverse_geocode_prompt(coords));
        let text = self.client.generate(&request).await?;
        let address = text.trim().trim_matches(|c| c == '\'' || c == '"').trim();
        if address.is_empty() {
            return Err(GeminiError::EmptyResponse.into());
        }
        Ok(address.to_string())
    }

    async fn find_suggestions(
        &self,
        query: &SuggestionQuery,
    ) -> std::result::Result<SuggestionBatch, ServiceError> {
        let request =
            GenerateContentRequest::json(prompt::suggestion_prompt(query), prompt::suggestion_schema());
        let text = self.client.generate(&request).await?;
        let batch = decode_suggestions(&text, query)?;
        debug!(
            "Gemini proposed {} suggestions (asked for {})",
            batch.suggestions.len(),
            query.count
        );
        Ok(batch)
    }
}
