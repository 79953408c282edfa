//! Google Gemini image-generation client.
//!
//! Calls the Generative Language API `generateContent` endpoint for an image model
//! and returns the decoded inline image bytes.

use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing;

/// Default Generative Language API base URL.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default image model.
pub const DEFAULT_MODEL: &str = "imagen-3.0-generate-002";

/// Masks an API token for safe logging: first 7 + "***" + last 4 chars;
/// tokens of length <= 11 are fully masked as "***".
pub fn mask_token(token: &str) -> String {
    if token.len() <= 11 {
        "***".to_string()
    } else {
        format!(
            "{}***{}",
            &token[..7.min(token.len())],
            &token[token.len().saturating_sub(4)..]
        )
    }
}

/// A generated image: raw bytes plus the mime type reported by the API.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

// --- generateContent wire types (camelCase on the wire) ---

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    sample_count: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Gemini image-generation client.
#[derive(Clone)]
pub struct GeminiImageClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl GeminiImageClient {
    /// Creates a client with the default API base and model.
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Sets a custom API base URL (used by tests and proxy setups).
    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Sets the image model.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// The configured image model.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates one image for the given prompt.
    ///
    /// Returns the first inline image of the first candidate, base64-decoded.
    #[tracing::instrument(skip(self, prompt))]
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedImage> {
        tracing::info!(
            model = %self.model,
            prompt_preview = %prompt.chars().take(100).collect::<String>(),
            api_key = %mask_token(&self.api_key),
            "Gemini image generation request"
        );

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig { sample_count: 1 },
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.api_base, self.model
        );
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API returned {}: {}", status, body);
        }

        let body: GenerateContentResponse = response.json().await?;
        let inline = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|content| content.parts.into_iter().find_map(|p| p.inline_data))
            .ok_or_else(|| anyhow::anyhow!("No image data in response"))?;

        let bytes = BASE64.decode(inline.data.as_bytes())?;

        tracing::info!(
            mime_type = %inline.mime_type,
            image_bytes = bytes.len(),
            "Gemini image generation completed"
        );

        Ok(GeneratedImage {
            bytes,
            mime_type: inline.mime_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "a red fox" }],
            }],
            generation_config: GenerationConfig { sample_count: 1 },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "a red fox");
        assert_eq!(json["generationConfig"]["sampleCount"], 1);
    }

    #[test]
    fn response_deserializes_inline_data() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "image/png", "data": "aGk="}}]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let inline = response.candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts[0]
            .inline_data
            .as_ref()
            .unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "aGk=");
    }

    #[tokio::test]
    #[ignore] // needs a real API key
    async fn generate_live() {
        let api_key = std::env::var("GEMINI_API_KEY").unwrap();
        let client = GeminiImageClient::new(api_key);
        let image = client
            .generate("a cute cat playing with a ball")
            .await
            .unwrap();
        assert!(!image.bytes.is_empty());
        println!("Generated {} bytes, {}", image.bytes.len(), image.mime_type);
    }
}
