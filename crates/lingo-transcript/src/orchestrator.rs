//! Real-source orchestration.
//!
//! Tries AI transcription first and caption extraction second, returning
//! the first non-empty transcript. A panic inside a strategy counts as that
//! strategy's failure.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use lingo_models::{TranscriptSegment, TranscriptSource, VideoId};
use tracing::Level;

use crate::ai::AiTranscriptionStrategy;
use crate::captions::CaptionStrategy;
use crate::logging::{LogContext, StrategyLogger, TranscriptLogger};
use crate::strategy::StrategyOutcome;

/// Outcome of trying every real source.
#[derive(Debug, Clone, PartialEq)]
pub struct RealTranscript {
    pub transcript: String,
    pub segments: Vec<TranscriptSegment>,
    pub success: bool,
    pub source: Option<TranscriptSource>,
}

impl RealTranscript {
    /// No real source produced anything.
    pub fn failed() -> Self {
        Self {
            transcript: String::new(),
            segments: Vec::new(),
            success: false,
            source: None,
        }
    }
}

/// Runs real strategies in priority order.
pub struct TranscriptOrchestrator {
    ai: AiTranscriptionStrategy,
    captions: CaptionStrategy,
    logger: Arc<dyn TranscriptLogger>,
}

impl TranscriptOrchestrator {
    pub fn new(
        ai: AiTranscriptionStrategy,
        captions: CaptionStrategy,
        logger: Arc<dyn TranscriptLogger>,
    ) -> Self {
        Self {
            ai,
            captions,
            logger,
        }
    }

    pub async fn fetch_real_transcript(&self, video_id: &VideoId) -> RealTranscript {
        let ai_logger = StrategyLogger::new(
            Arc::clone(&self.logger),
            video_id.as_str(),
            TranscriptSource::AiTranscription.as_str(),
        );
        let ai_outcome = guarded(self.ai.extract(video_id, &ai_logger), &ai_logger).await;
        if let StrategyOutcome::Found(candidate) = ai_outcome {
            return RealTranscript {
                transcript: candidate.transcript,
                segments: candidate.segments,
                success: true,
                source: Some(candidate.source),
            };
        }

        let caption_logger = StrategyLogger::new(
            Arc::clone(&self.logger),
            video_id.as_str(),
            TranscriptSource::Captions.as_str(),
        );
        let caption_outcome =
            guarded(self.captions.extract(video_id, &caption_logger), &caption_logger).await;
        if let StrategyOutcome::Found(candidate) = caption_outcome {
            return RealTranscript {
                transcript: candidate.transcript,
                segments: candidate.segments,
                success: true,
                source: Some(candidate.source),
            };
        }

        self.logger.log(
            Level::INFO,
            "No real transcript source succeeded",
            &LogContext::new(video_id.as_str(), "orchestrator"),
        );
        RealTranscript::failed()
    }
}

/// Convert a panic inside a strategy into a not-found outcome.
async fn guarded<F>(strategy: F, logger: &StrategyLogger) -> StrategyOutcome
where
    F: std::future::Future<Output = StrategyOutcome>,
{
    match AssertUnwindSafe(strategy).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(_) => {
            logger.error("Strategy panicked", logger.context());
            StrategyOutcome::not_found("strategy panicked")
        }
    }
}
