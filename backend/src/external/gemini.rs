//! Gemini Client
//!
//! Client for the Google Generative Language `generateContent` endpoint with
//! JSON-schema constrained output.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{GenerationError, GenerationRequest, GenerativeModel};
use crate::config::AiConfig;

/// Client for the hosted Gemini models
#[derive(Clone)]
pub struct GeminiClient {
    api_base_url: String,
    api_key: String,
    http_client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a new client. No request timeout is set.
    pub fn new(api_base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http_client: Client::new(),
        }
    }

    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.api_key.clone())
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base_url, model, self.api_key
        )
    }
}

fn build_request(request: GenerationRequest) -> GeminiRequest {
    let mut parts = vec![Part::Text {
        text: request.prompt,
    }];
    if let Some(media) = request.media {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: media.mime_type,
                data: media.data,
            },
        });
    }

    GeminiRequest {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: request.response_schema,
        },
    }
}

/// JSON document in the first candidate's first text part
fn extract_json(response: GeminiResponse) -> Result<Value, GenerationError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
        .filter(|t| !t.trim().is_empty())
        .ok_or(GenerationError::EmptyResponse)?;

    serde_json::from_str(&text).map_err(|e| GenerationError::InvalidJson(e.to_string()))
}

impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<Value, GenerationError> {
        if !self.is_configured() {
            return Err(GenerationError::NotConfigured);
        }

        let url = self.endpoint(&request.model);
        tracing::debug!(model = %request.model, "Calling generative model");

        let response = self
            .http_client
            .post(&url)
            .json(&build_request(request))
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidJson(e.without_url().to_string()))?;

        extract_json(gemini_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::DataUri;

    fn request(media: Option<DataUri>) -> GenerationRequest {
        GenerationRequest {
            model: "gemini-2.5-flash".to_string(),
            prompt: "Describe the leaf".to_string(),
            media,
            response_schema: json!({ "type": "object" }),
        }
    }

    #[test]
    fn test_request_body_with_image() {
        let media = DataUri::from_bytes("image/png", b"leaf");
        let body = serde_json::to_value(build_request(request(Some(media)))).unwrap();

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "Describe the leaf");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "bGVhZg==");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "object");
    }

    #[test]
    fn test_request_body_text_only() {
        let body = serde_json::to_value(build_request(request(None))).unwrap();
        assert_eq!(body["contents"][0]["parts"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_extract_json() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"estimatedProfit\": 1200.5}" }] }
            }]
        }))
        .unwrap();
        let value = extract_json(response).unwrap();
        assert_eq!(value["estimatedProfit"], 1200.5);
    }

    #[test]
    fn test_extract_json_empty() {
        let response: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            extract_json(response),
            Err(GenerationError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_json_not_json() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Sorry, I cannot help" }] } }]
        }))
        .unwrap();
        assert!(matches!(
            extract_json(response),
            Err(GenerationError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new("https://example.test/v1beta/", "k");
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent?key=k"
        );
    }

    #[tokio::test]
    async fn test_unconfigured_client_fails_fast() {
        let client = GeminiClient::new("https://example.test", "");
        let result = client.generate(request(None)).await;
        assert!(matches!(result, Err(GenerationError::NotConfigured)));
    }
}
