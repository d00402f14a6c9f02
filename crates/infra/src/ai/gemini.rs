//! Gemini `generateContent` adapter.
//!
//! Requests JSON output (`responseMimeType: application/json`) constrained by a
//! response schema, then re-validates the returned object against the same
//! `OutputSchema` before handing it to the flows.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, instrument, warn};

use shopdesk_ai::{GenerationError, OutputSchema, StructuredGenerator};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    /// Without a key every call fails with `GenerationError::NotConfigured`.
    pub api_key: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

pub struct GeminiGenerator {
    config: GeminiConfig,
    client: Client,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl StructuredGenerator for GeminiGenerator {
    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn generate(
        &self,
        instruction: &str,
        schema: &OutputSchema,
    ) -> Result<JsonValue, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenerationError::NotConfigured)?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request_body(instruction, schema))
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = error_message(&text);
            warn!(status = status.as_u16(), error = %message, "generation service rejected request");
            return Err(GenerationError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Transport(format!("invalid response body: {e}")))?;

        let output = extract_output(body)?;
        schema.validate(&output)?;
        debug!("generation succeeded");
        Ok(output)
    }
}

fn request_body(instruction: &str, schema: &OutputSchema) -> JsonValue {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": instruction }],
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(schema),
        },
    })
}

/// Gemini's OpenAPI-subset dialect of the JSON Schema contract: upper-case
/// type names and an explicit property ordering.
fn response_schema(schema: &OutputSchema) -> JsonValue {
    let mut rendered = schema.to_json_schema();
    upper_case_types(&mut rendered);

    let names: Vec<&str> = schema.fields().iter().map(|f| f.name).collect();
    if let Some(object) = rendered.as_object_mut() {
        object.insert("propertyOrdering".to_string(), json!(names));
    }
    rendered
}

fn upper_case_types(value: &mut JsonValue) {
    match value {
        JsonValue::Object(map) => {
            for (key, child) in map.iter_mut() {
                match child {
                    JsonValue::String(name) if key == "type" => *name = name.to_uppercase(),
                    _ => upper_case_types(child),
                }
            }
        }
        JsonValue::Array(items) => items.iter_mut().for_each(upper_case_types),
        _ => {}
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

fn extract_output(body: GenerateContentResponse) -> Result<JsonValue, GenerationError> {
    let candidate = body.candidates.into_iter().next().ok_or(GenerationError::Empty)?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        if let Some(reason) = candidate.finish_reason {
            warn!(finish_reason = %reason, "generation returned no text");
        }
        return Err(GenerationError::Empty);
    }

    serde_json::from_str(&text)
        .map_err(|e| GenerationError::SchemaViolation(format!("output is not valid JSON: {e}")))
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "no error body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast_like_schema() -> OutputSchema {
        OutputSchema::new()
            .text("forecastedStockNeeds", "restock plan")
            .text("analysis", "trend analysis")
    }

    fn response(value: JsonValue) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn endpoint_joins_base_url_and_model() {
        let generator = GeminiGenerator::new(GeminiConfig {
            base_url: "http://localhost:9000/".to_string(),
            model: "gemini-test".to_string(),
            api_key: Some("k".to_string()),
        });
        assert_eq!(
            generator.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn request_body_requests_json_with_schema() {
        let body = request_body("forecast please", &forecast_like_schema());

        assert_eq!(body["contents"][0]["parts"][0]["text"], "forecast please");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");

        let schema = &body["generationConfig"]["responseSchema"];
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"]["analysis"]["type"], "STRING");
        assert_eq!(schema["required"], json!(["forecastedStockNeeds", "analysis"]));
        assert_eq!(schema["propertyOrdering"], json!(["forecastedStockNeeds", "analysis"]));
    }

    #[test]
    fn list_fields_render_as_upper_case_arrays() {
        let schema = response_schema(&OutputSchema::new().text_list("names", "product names"));

        assert_eq!(schema["properties"]["names"]["type"], "ARRAY");
        assert_eq!(schema["properties"]["names"]["items"]["type"], "STRING");
        assert_eq!(schema["properties"]["names"]["description"], "product names");
    }

    #[test]
    fn extracts_json_from_candidate_text_parts() {
        let body = response(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "{\"forecastedStockNeeds\": \"[]\"," },
                    { "text": " \"analysis\": \"flat\"}" }
                ]},
                "finishReason": "STOP"
            }]
        }));

        let output = extract_output(body).unwrap();
        assert_eq!(output["analysis"], "flat");
        assert!(forecast_like_schema().validate(&output).is_ok());
    }

    #[test]
    fn no_candidates_or_empty_text_is_empty() {
        assert_eq!(
            extract_output(response(json!({ "candidates": [] }))),
            Err(GenerationError::Empty)
        );
        assert_eq!(
            extract_output(response(json!({ "candidates": [{ "finishReason": "SAFETY" }] }))),
            Err(GenerationError::Empty)
        );
    }

    #[test]
    fn non_json_text_is_a_schema_violation() {
        let body = response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Sure! Here is your forecast" }] } }]
        }));
        assert!(matches!(
            extract_output(body),
            Err(GenerationError::SchemaViolation(_))
        ));
    }

    #[test]
    fn error_message_prefers_google_envelope() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(error_message(body), "Resource has been exhausted");
        assert_eq!(error_message("upstream down"), "upstream down");
        assert_eq!(error_message(""), "no error body");
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_network() {
        let generator = GeminiGenerator::new(GeminiConfig::default());
        assert_eq!(
            generator.generate("x", &forecast_like_schema()).await,
            Err(GenerationError::NotConfigured)
        );
    }
}
