//! Primary multimodal advisory provider (Gemini `generateContent` API)
//!
//! Sends title + description (+ inline image when the report carries one)
//! in a single multimodal call and expects a raw JSON AdvisoryRecord back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::AdvisoryRecord;

use super::provider::{AdvisoryInput, AdvisoryProvider, ProviderError, build_prompt, parse_record};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(client: reqwest::Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model,
        }
    }

    /// Override the API base URL (tests point this at a local stub).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn request_body(&self, input: &AdvisoryInput) -> GenerateContentRequest {
        let mut parts = vec![Part::Text {
            text: build_prompt(input),
        }];
        if let Some(image) = &input.image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            });
        }
        GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: 0.4,
                max_output_tokens: 500,
            },
        }
    }
}

#[async_trait]
impl AdvisoryProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn attempt(&self, input: &AdvisoryInput) -> Result<AdvisoryRecord, ProviderError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&self.request_body(input))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Shape(format!("invalid response body: {e}")))?;

        let raw_text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| ProviderError::Shape("empty candidates".to_string()))?;

        parse_record(&raw_text)
    }
}

// ========== Wire types ==========

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
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
    temperature: f32,
    max_output_tokens: u32,
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
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_includes_inline_image_when_present() {
        let provider = GeminiProvider::new(
            reqwest::Client::new(),
            "k".to_string(),
            "gemini-1.5-flash".to_string(),
        );
        let input = AdvisoryInput {
            title: Some("Pothole".to_string()),
            description: "deep crater".to_string(),
            image: Some(shared::request::ImagePayload {
                mime_type: "image/jpeg".to_string(),
                data: "QUJD".to_string(),
            }),
        };
        let body = serde_json::to_value(provider.request_body(&input)).unwrap();
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts[0]["text"].as_str().unwrap().contains("deep crater"));
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 500);
    }
}
