//! AI-transcription strategy.
//!
//! Asks a hosted multimodal model to transcribe the video from its public
//! URL, rejects refusals and short answers, and rebuilds approximate timed
//! segments from sentence boundaries.
//!
//! Segment timing here is a heuristic: durations are proportional to
//! sentence length and offsets advance by a fixed step per sentence. They
//! are not measured against the video and must not be treated as real
//! timestamps.

use std::sync::Arc;
use std::time::{Duration, Instant};

use lingo_models::{TranscriptSegment, TranscriptSource, VideoId};

use crate::clean::{clean_ai_transcript, contains_refusal, split_sentences};
use crate::config::TranscriptConfig;
use crate::error::{TranscriptError, TranscriptResult};
use crate::gemini::{GenerativeModel, VideoPrompt};
use crate::logging::StrategyLogger;
use crate::strategy::{StrategyOutcome, TranscriptCandidate};

/// Instruction sent with every transcription request.
pub const TRANSCRIPTION_INSTRUCTION: &str = "Transcribe the spoken audio of this video verbatim. \
Return only the exact words that are spoken, as continuous prose. \
Do not summarize, paraphrase, translate, or add commentary, headings, timestamps, \
speaker labels, or descriptions of sounds or visuals.";

/// Offset step between consecutive sentences.
const SENTENCE_STEP_MS: u64 = 5_000;
/// Synthetic duration bounds per sentence.
const MIN_SENTENCE_MS: u64 = 2_000;
const MAX_SENTENCE_MS: u64 = 8_000;
/// Ten characters per second of speech, i.e. 100 ms per character.
const MS_PER_CHAR: u64 = 100;

/// AI-transcription strategy.
pub struct AiTranscriptionStrategy {
    model: Option<Arc<dyn GenerativeModel>>,
    timeout: Duration,
    temperature: f32,
    max_output_tokens: u32,
    min_chars: usize,
}

impl AiTranscriptionStrategy {
    /// `model` is `None` when no credential is configured.
    pub fn new(model: Option<Arc<dyn GenerativeModel>>, config: &TranscriptConfig) -> Self {
        Self {
            model,
            timeout: config.ai_timeout,
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            min_chars: config.min_ai_chars,
        }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    pub async fn extract(&self, video_id: &VideoId, logger: &StrategyLogger) -> StrategyOutcome {
        let started = Instant::now();
        StrategyOutcome::settle(self.transcribe(video_id, logger).await, logger, started)
    }

    async fn transcribe(
        &self,
        video_id: &VideoId,
        logger: &StrategyLogger,
    ) -> TranscriptResult<TranscriptCandidate> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| TranscriptError::not_configured("AI transcription credential missing"))?;

        let prompt = VideoPrompt {
            video_url: video_id.watch_url(),
            instruction: TRANSCRIPTION_INSTRUCTION.to_string(),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        };

        logger.debug(
            "Requesting AI transcription",
            logger.context().with("video_url", &prompt.video_url),
        );

        let raw = tokio::time::timeout(self.timeout, model.generate(&prompt))
            .await
            .map_err(|_| TranscriptError::Timeout(self.timeout))??;

        validate_response(&raw, self.min_chars)?;

        let transcript = clean_ai_transcript(&raw);
        if transcript.chars().count() < self.min_chars {
            return Err(TranscriptError::rejected(format!(
                "cleaned transcript has {} chars, minimum is {}",
                transcript.chars().count(),
                self.min_chars
            )));
        }

        let segments = sentence_segments(&transcript);
        Ok(TranscriptCandidate {
            transcript,
            segments,
            source: TranscriptSource::AiTranscription,
        })
    }
}

/// Reject short answers and refusals.
pub fn validate_response(raw: &str, min_chars: usize) -> TranscriptResult<()> {
    let length = raw.trim().chars().count();
    if length < min_chars {
        return Err(TranscriptError::rejected(format!(
            "response has {} chars, minimum is {}",
            length, min_chars
        )));
    }
    if contains_refusal(raw) {
        return Err(TranscriptError::rejected("model declined to transcribe"));
    }
    Ok(())
}

/// One segment per sentence with approximate timing.
pub fn sentence_segments(text: &str) -> Vec<TranscriptSegment> {
    split_sentences(text)
        .into_iter()
        .enumerate()
        .map(|(index, sentence)| {
            let duration = (sentence.chars().count() as u64 * MS_PER_CHAR)
                .clamp(MIN_SENTENCE_MS, MAX_SENTENCE_MS);
            let offset = index as u64 * SENTENCE_STEP_MS;
            TranscriptSegment::new(sentence, duration, offset)
        })
        .collect()
}
