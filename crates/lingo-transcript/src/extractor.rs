//! Public entry points.
//!
//! [`TranscriptExtractor::extract_video_transcript`] always returns a
//! well-formed result: real content when a source succeeds with enough
//! text, simulated content otherwise. Real sources share one deadline, so a
//! stalled upstream cannot hold the call past it.
//! [`TranscriptExtractor::get_transcript`] adds duration windowing on top.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use lingo_models::{TranscriptSource, VideoId, VideoTranscriptResult, WindowedTranscript};
use tracing::Level;

use crate::ai::AiTranscriptionStrategy;
use crate::captions::{CaptionFetcher, CaptionStrategy, HttpCaptionFetcher};
use crate::config::TranscriptConfig;
use crate::error::TranscriptResult;
use crate::gemini::{GeminiClient, GenerativeModel};
use crate::logging::{LogContext, TracingLogger, TranscriptLogger};
use crate::metrics;
use crate::orchestrator::{RealTranscript, TranscriptOrchestrator};
use crate::simulated::SimulatedTranscriptGenerator;
use crate::window::window_transcript;

/// Transcript extractor with layered fallbacks.
pub struct TranscriptExtractor {
    config: TranscriptConfig,
    model: Option<Arc<dyn GenerativeModel>>,
    captions: Arc<dyn CaptionFetcher>,
    logger: Arc<dyn TranscriptLogger>,
    simulated: SimulatedTranscriptGenerator,
}

impl TranscriptExtractor {
    /// Create an extractor with explicit collaborators.
    ///
    /// `model` is `None` when AI transcription is unavailable.
    pub fn new(
        config: TranscriptConfig,
        model: Option<Arc<dyn GenerativeModel>>,
        captions: Arc<dyn CaptionFetcher>,
    ) -> Self {
        let simulated = SimulatedTranscriptGenerator::new(config.simulated_seed);
        Self {
            config,
            model,
            captions,
            logger: Arc::new(TracingLogger),
            simulated,
        }
    }

    /// Create an extractor backed by Gemini and the HTTP captions service.
    ///
    /// A missing credential disables AI transcription without failing.
    pub fn from_config(config: TranscriptConfig) -> TranscriptResult<Self> {
        let model: Option<Arc<dyn GenerativeModel>> = match config.gemini_api_key {
            Some(_) => Some(Arc::new(GeminiClient::from_config(&config)?)),
            None => None,
        };
        let captions = Arc::new(HttpCaptionFetcher::from_config(&config)?);
        Ok(Self::new(config, model, captions))
    }

    /// Replace the log sink.
    pub fn with_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &TranscriptConfig {
        &self.config
    }

    /// Whether the AI transcription strategy has a model to call.
    pub fn ai_available(&self) -> bool {
        self.model.is_some()
    }

    /// Strategies hold only cheap handles, so they are rebuilt per call.
    fn orchestrator(&self) -> TranscriptOrchestrator {
        TranscriptOrchestrator::new(
            AiTranscriptionStrategy::new(self.model.clone(), &self.config),
            CaptionStrategy::from_config(Arc::clone(&self.captions), &self.config),
            Arc::clone(&self.logger),
        )
    }

    /// Produce a usable transcript for `video_id`. Never fails.
    pub async fn extract_video_transcript(&self, video_id: &VideoId) -> VideoTranscriptResult {
        let context = LogContext::new(video_id.as_str(), "extractor");
        let orchestrator = self.orchestrator();

        let guarded = AssertUnwindSafe(orchestrator.fetch_real_transcript(video_id)).catch_unwind();
        let real = match tokio::time::timeout(self.config.deadline, guarded).await {
            Ok(Ok(real)) => real,
            Ok(Err(_)) => {
                self.logger
                    .log(Level::ERROR, "Orchestrator panicked", &context);
                RealTranscript::failed()
            }
            Err(_) => {
                self.logger.log(
                    Level::WARN,
                    "Real sources exceeded deadline",
                    &context
                        .clone()
                        .with("deadline_ms", self.config.deadline.as_millis()),
                );
                RealTranscript::failed()
            }
        };

        let result = match self.accept(video_id, real, &context) {
            Some(result) => result,
            None => self.simulated.generate(video_id),
        };

        self.logger.log(
            Level::INFO,
            "Transcript ready",
            &context
                .clone()
                .with("source", result.source)
                .with("authentic", result.is_authentic)
                .with("segments", result.segments.len()),
        );
        metrics::record_result(result.source.as_str());
        result
    }

    /// Quality gate: only successful, long-enough real transcripts pass.
    fn accept(
        &self,
        video_id: &VideoId,
        real: RealTranscript,
        context: &LogContext,
    ) -> Option<VideoTranscriptResult> {
        if !real.success {
            self.logger.log(
                Level::INFO,
                "Using simulated transcript, no real source available",
                context,
            );
            return None;
        }

        let length = real.transcript.trim().chars().count();
        if length < self.config.min_transcript_chars {
            self.logger.log(
                Level::WARN,
                "Discarding short real transcript",
                &context
                    .clone()
                    .with("chars", length)
                    .with("minimum", self.config.min_transcript_chars),
            );
            return None;
        }

        let source = real.source.unwrap_or(TranscriptSource::Captions);
        Some(VideoTranscriptResult::authentic(
            video_id.clone(),
            source,
            real.transcript,
            real.segments,
        ))
    }

    /// Transcript bounded to at most `max_duration_seconds` of content.
    /// Never fails.
    pub async fn get_transcript(
        &self,
        video_id: &VideoId,
        max_duration_seconds: Option<f64>,
    ) -> WindowedTranscript {
        let full = self.extract_video_transcript(video_id).await;
        window_transcript(&full, max_duration_seconds)
    }
}
