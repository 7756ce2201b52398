//! Strategy outcome types.

use std::time::Instant;

use lingo_models::{TranscriptSegment, TranscriptSource};

use crate::error::TranscriptResult;
use crate::logging::StrategyLogger;
use crate::metrics;

/// Transcript produced by one real-world strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptCandidate {
    pub transcript: String,
    pub segments: Vec<TranscriptSegment>,
    pub source: TranscriptSource,
}

/// Result of running one strategy. Strategies never return errors.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyOutcome {
    Found(TranscriptCandidate),
    NotFound { reason: String },
}

impl StrategyOutcome {
    /// Convert an internal result into an outcome, logging and recording
    /// metrics on the way.
    pub(crate) fn settle(
        result: TranscriptResult<TranscriptCandidate>,
        logger: &StrategyLogger,
        started: Instant,
    ) -> Self {
        let elapsed = started.elapsed().as_secs_f64();
        match result {
            Ok(candidate) if !candidate.transcript.trim().is_empty() => {
                metrics::record_strategy(logger.strategy(), "found", elapsed);
                logger.info(
                    "Transcript obtained",
                    logger
                        .context()
                        .with("chars", candidate.transcript.len())
                        .with("segments", candidate.segments.len()),
                );
                StrategyOutcome::Found(candidate)
            }
            Ok(_) => {
                metrics::record_strategy(logger.strategy(), "empty", elapsed);
                logger.warn("Strategy returned an empty transcript", logger.context());
                StrategyOutcome::not_found("empty transcript")
            }
            Err(e) => {
                metrics::record_strategy(logger.strategy(), e.kind(), elapsed);
                logger.warn(
                    "Strategy failed",
                    logger.context().with("kind", e.kind()).with("error", &e),
                );
                StrategyOutcome::not_found(e.to_string())
            }
        }
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        StrategyOutcome::NotFound {
            reason: reason.into(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, StrategyOutcome::Found(_))
    }

    pub fn into_candidate(self) -> Option<TranscriptCandidate> {
        match self {
            StrategyOutcome::Found(candidate) => Some(candidate),
            StrategyOutcome::NotFound { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tracing::Level;

    use super::*;
    use crate::error::TranscriptError;
    use crate::logging::testing::RecordingLogger;

    fn candidate(text: &str) -> TranscriptCandidate {
        TranscriptCandidate {
            transcript: text.to_string(),
            segments: Vec::new(),
            source: TranscriptSource::Captions,
        }
    }

    #[test]
    fn test_settle_found() {
        let sink = Arc::new(RecordingLogger::default());
        let logger = StrategyLogger::new(sink.clone(), "vid", "captions");

        let outcome = StrategyOutcome::settle(Ok(candidate("hello")), &logger, Instant::now());

        assert!(outcome.is_found());
        assert_eq!(sink.messages_at(Level::INFO), vec!["Transcript obtained"]);
    }

    #[test]
    fn test_settle_blank_transcript_is_not_found() {
        let logger = StrategyLogger::new(Arc::new(RecordingLogger::default()), "vid", "captions");
        let outcome = StrategyOutcome::settle(Ok(candidate("   ")), &logger, Instant::now());
        assert_eq!(outcome, StrategyOutcome::not_found("empty transcript"));
    }

    #[test]
    fn test_settle_error_logs_reason() {
        let sink = Arc::new(RecordingLogger::default());
        let logger = StrategyLogger::new(sink.clone(), "vid", "ai_transcription");

        let outcome = StrategyOutcome::settle(
            Err(TranscriptError::not_configured("GEMINI_API_KEY not set")),
            &logger,
            Instant::now(),
        );

        assert!(!outcome.is_found());
        let records = sink.records();
        assert_eq!(records[0].2.field("kind"), Some("not_configured"));
        assert!(outcome.into_candidate().is_none());
    }
}
