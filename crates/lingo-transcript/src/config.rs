//! Pipeline configuration.

use std::time::Duration;

/// Language hints swept by the caption strategy, in order. An empty entry
/// means "no hint".
pub const DEFAULT_LANGUAGE_HINTS: [&str; 5] = ["", "en", "en-US", "en-GB", "auto"];

/// Transcript pipeline configuration.
///
/// Passed explicitly to the extractor; the pipeline itself never reads the
/// environment.
#[derive(Debug, Clone)]
pub struct TranscriptConfig {
    /// Credential for the hosted model; `None` disables AI transcription
    pub gemini_api_key: Option<String>,
    /// Model used for video transcription
    pub gemini_model: String,
    /// Base URL of the generative language API
    pub gemini_base_url: String,
    /// Base URL of the captions service
    pub captions_base_url: String,
    /// Caption language hints, `None` = unhinted
    pub language_hints: Vec<Option<String>>,
    /// Timeout for one AI transcription request
    pub ai_timeout: Duration,
    /// Timeout for one caption request
    pub caption_timeout: Duration,
    /// Budget for all real sources together; past it the simulated
    /// fallback is returned
    pub deadline: Duration,
    /// Shortest transcript accepted as authentic
    pub min_transcript_chars: usize,
    /// Shortest AI response accepted as a transcription
    pub min_ai_chars: usize,
    /// Sampling temperature for transcription
    pub temperature: f32,
    /// Output token ceiling for transcription
    pub max_output_tokens: u32,
    /// Fixed seed for the simulated fallback (tests, demos)
    pub simulated_seed: Option<u64>,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            captions_base_url: "http://localhost:8002".to_string(),
            language_hints: parse_language_hints(&DEFAULT_LANGUAGE_HINTS.join(",")),
            ai_timeout: Duration::from_secs(90),
            caption_timeout: Duration::from_secs(15),
            deadline: Duration::from_secs(100),
            min_transcript_chars: 100,
            min_ai_chars: 50,
            temperature: 0.1,
            max_output_tokens: 8192,
            simulated_seed: None,
        }
    }
}

impl TranscriptConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: std::env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            captions_base_url: std::env::var("CAPTIONS_SERVICE_URL")
                .unwrap_or(defaults.captions_base_url),
            language_hints: std::env::var("CAPTION_LANGUAGES")
                .map(|s| parse_language_hints(&s))
                .unwrap_or(defaults.language_hints),
            ai_timeout: Duration::from_secs(
                std::env::var("TRANSCRIPT_AI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(90),
            ),
            caption_timeout: Duration::from_secs(
                std::env::var("TRANSCRIPT_CAPTION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(15),
            ),
            deadline: std::env::var("TRANSCRIPT_DEADLINE_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.deadline),
            min_transcript_chars: std::env::var("TRANSCRIPT_MIN_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_transcript_chars),
            min_ai_chars: std::env::var("TRANSCRIPT_MIN_AI_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_ai_chars),
            temperature: std::env::var("GEMINI_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.temperature),
            max_output_tokens: std::env::var("GEMINI_MAX_OUTPUT_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_output_tokens),
            simulated_seed: std::env::var("TRANSCRIPT_SIMULATED_SEED")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }

    /// Set the AI credential.
    pub fn with_gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    /// Set the simulated fallback seed.
    pub fn with_simulated_seed(mut self, seed: u64) -> Self {
        self.simulated_seed = Some(seed);
        self
    }
}

/// Parse a comma-separated hint list. Blank items mean "no hint".
pub fn parse_language_hints(raw: &str) -> Vec<Option<String>> {
    raw.split(',')
        .map(|s| s.trim())
        .map(|s| (!s.is_empty()).then(|| s.to_string()))
        .collect()
}
