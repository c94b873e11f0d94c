//! Gemini-backed intent extraction.
//!
//! Sends user text plus a fixed instruction set to the Gemini REST API and
//! parses the response into an `ActionSuggestion`. The model is treated as
//! a black box returning text that must parse as JSON; anything else is an
//! extraction error and the request fails without retry.

mod prompt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use calvox_core::{ActionSuggestion, CalvoxError, CalvoxResult, ExtractIntent};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Intent extractor backed by the Gemini `generateContent` endpoint.
pub struct GeminiExtractor {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiExtractor {
    pub fn new(api_key: impl Into<String>) -> Self {
        GeminiExtractor {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the extractor at a different host. Used by tests to run
    /// against a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn generate(&self, instructions: String, user_text: &str) -> CalvoxResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: user_text.to_string(),
                }],
            }],
            system_instruction: Instruction {
                parts: vec![Part { text: instructions }],
            },
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| CalvoxError::Extraction(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CalvoxError::Extraction(format!("Failed to read Gemini response: {e}")))?;

        if !status.is_success() {
            tracing::warn!(%status, "Gemini returned an error response");
            return Err(CalvoxError::Extraction(format!(
                "Gemini request failed with status {status}"
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            CalvoxError::Extraction(format!("Failed to parse Gemini response: {e}"))
        })?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| CalvoxError::Extraction("Gemini returned no candidates".into()))
    }
}

#[async_trait]
impl ExtractIntent for GeminiExtractor {
    async fn extract(
        &self,
        text: &str,
        reference: DateTime<Utc>,
    ) -> CalvoxResult<ActionSuggestion> {
        let instructions = prompt::system_prompt(reference);
        let raw = self.generate(instructions, text).await?;

        tracing::debug!(response = %raw, "raw model output");
        parse_suggestion(&raw)
    }
}

/// Parse model output into a suggestion, tolerating markdown code fences.
///
/// Malformed JSON is an extraction error, never a partially populated
/// suggestion.
pub fn parse_suggestion(raw: &str) -> CalvoxResult<ActionSuggestion> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(cleaned)
        .map_err(|e| CalvoxError::Extraction(format!("Model returned invalid JSON: {e}")))
}

/// Models often wrap their JSON in ```json fences despite instructions.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line, then the closing fence.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

// Wire types for the Gemini generateContent endpoint.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Instruction,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Instruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use calvox_core::ActionKind;
    use chrono::TimeZone;

    #[test]
    fn parses_bare_json() {
        let raw = r#"{"valid": true, "kind": "read", "rangeStart": "2024-01-01", "rangeEnd": "2024-01-01"}"#;
        let suggestion = parse_suggestion(raw).unwrap();

        assert!(suggestion.valid);
        assert_eq!(suggestion.kind, ActionKind::Read);
    }

    #[test]
    fn parses_fenced_json() {
        let raw = "```json\n{\"valid\": true, \"kind\": \"create\", \"summary\": \"launch meeting\", \"startMoment\": \"2024-01-02T15:00:00Z\"}\n```";
        let suggestion = parse_suggestion(raw).unwrap();

        assert_eq!(suggestion.summary, "launch meeting");
        assert_eq!(
            suggestion.start_moment,
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 15, 0, 0).unwrap())
        );
    }

    #[test]
    fn parses_fenced_json_without_language_tag() {
        let raw = "```\n{\"valid\": false, \"message\": \"Not about calendars.\"}\n```";
        let suggestion = parse_suggestion(raw).unwrap();

        assert!(!suggestion.valid);
        assert_eq!(suggestion.message.as_deref(), Some("Not about calendars."));
    }

    #[test]
    fn malformed_json_is_an_extraction_error() {
        let err = parse_suggestion("I'd be happy to schedule that for you!").unwrap_err();
        assert!(matches!(err, CalvoxError::Extraction(_)));
    }

    #[test]
    fn truncated_json_is_an_extraction_error() {
        let err = parse_suggestion(r#"{"valid": true, "kind": "crea"#).unwrap_err();
        assert!(matches!(err, CalvoxError::Extraction(_)));
    }
}
