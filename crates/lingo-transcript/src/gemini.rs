//! Gemini client for video transcription.
//!
//! Sends the public video URL as `fileData` next to a text instruction and
//! returns the generated text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TranscriptConfig;
use crate::error::{TranscriptError, TranscriptResult};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// One generation request referencing a video by URL.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoPrompt {
    pub video_url: String,
    pub instruction: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Hosted multimodal generation service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &VideoPrompt) -> TranscriptResult<String>;
}

/// Gemini API request.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    File {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
struct FileData {
    #[serde(rename = "fileUri")]
    file_uri: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// Gemini API response. Every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
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
struct ResponsePart {
    text: Option<String>,
}

/// Flatten the first candidate's text parts.
fn text_from_response(response: GeminiResponse) -> TranscriptResult<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(TranscriptError::invalid_response("No content in Gemini response"));
    }
    Ok(text)
}

/// Gemini API client.
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> TranscriptResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TranscriptError::from)?;

        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Create from pipeline config. Fails when no credential is configured.
    pub fn from_config(config: &TranscriptConfig) -> TranscriptResult<Self> {
        let api_key = config
            .gemini_api_key
            .as_deref()
            .ok_or_else(|| TranscriptError::not_configured("GEMINI_API_KEY not set"))?;
        Self::new(
            api_key,
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
            config.ai_timeout,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &VideoPrompt) -> TranscriptResult<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::File {
                        file_data: FileData {
                            file_uri: prompt.video_url.clone(),
                        },
                    },
                    Part::Text {
                        text: prompt.instruction.clone(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: prompt.temperature,
                max_output_tokens: prompt.max_output_tokens,
            },
        };

        debug!(model = %self.model, video_url = %prompt.video_url, "Sending Gemini transcription request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranscriptError::request_failed(format!(
                "Gemini API returned {}: {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            TranscriptError::invalid_response(format!("Failed to parse Gemini response: {}", e))
        })?;

        text_from_response(gemini_response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn prompt() -> VideoPrompt {
        VideoPrompt {
            video_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            instruction: "Transcribe verbatim.".to_string(),
            temperature: 0.1,
            max_output_tokens: 8192,
        }
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = TranscriptConfig::default();
        assert!(matches!(
            GeminiClient::from_config(&config),
            Err(TranscriptError::NotConfigured(_))
        ));

        let client = GeminiClient::from_config(&config.with_gemini_api_key("k")).unwrap();
        assert_eq!(client.model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_request_shape() {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::File {
                        file_data: FileData {
                            file_uri: "https://example.com/v".to_string(),
                        },
                    },
                    Part::Text {
                        text: "go".to_string(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.5,
                max_output_tokens: 10,
            },
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{"parts": [
                    {"fileData": {"fileUri": "https://example.com/v"}},
                    {"text": "go"}
                ]}],
                "generationConfig": {"temperature": 0.5, "maxOutputTokens": 10}
            })
        );
    }

    #[test]
    fn test_text_from_response_joins_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "Hello "}, {"text": "world."}]}}]
        }))
        .unwrap();
        assert_eq!(text_from_response(response).unwrap(), "Hello world.");

        let empty: GeminiResponse = serde_json::from_value(json!({"promptFeedback": {}})).unwrap();
        assert!(matches!(
            text_from_response(empty),
            Err(TranscriptError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_against_mock_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-test:generateContent"))
            .and(header("x-goog-api-key", "secret"))
            .and(body_partial_json(json!({
                "generationConfig": {"maxOutputTokens": 8192}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "Welcome to the lesson."}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            GeminiClient::new("secret", "gemini-test", server.uri(), Duration::from_secs(5)).unwrap();
        let text = client.generate(&prompt()).await.unwrap();

        assert_eq!(text, "Welcome to the lesson.");
    }

    #[tokio::test]
    async fn test_generate_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota"))
            .mount(&server)
            .await;

        let client =
            GeminiClient::new("secret", "gemini-test", server.uri(), Duration::from_secs(5)).unwrap();
        let err = client.generate(&prompt()).await.unwrap_err();

        assert!(matches!(err, TranscriptError::RequestFailed(ref msg) if msg.contains("429")));
    }
}
