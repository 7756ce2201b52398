//! Application state.

use std::sync::Arc;

use lingo_transcript::{TranscriptConfig, TranscriptExtractor, TranscriptResult};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub extractor: Arc<TranscriptExtractor>,
}

impl AppState {
    /// Create state around an existing extractor.
    pub fn new(config: ApiConfig, extractor: Arc<TranscriptExtractor>) -> Self {
        Self { config, extractor }
    }

    /// Create state with a Gemini and HTTP captions backed extractor.
    pub fn from_config(config: ApiConfig, transcript: TranscriptConfig) -> TranscriptResult<Self> {
        let extractor = TranscriptExtractor::from_config(transcript)?;
        Ok(Self::new(config, Arc::new(extractor)))
    }
}
