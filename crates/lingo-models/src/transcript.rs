//! Transcript result models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::segment::{max_end_ms, TranscriptSegment};
use crate::timestamp::format_duration_label;
use crate::video::VideoId;

/// Where a transcript came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptSource {
    /// Hosted multimodal model transcribed the video from its URL
    AiTranscription,
    /// Officially published captions
    Captions,
    /// Generated placeholder content
    Simulated,
}

impl TranscriptSource {
    /// Real-world sources only.
    pub fn is_authentic(&self) -> bool {
        !matches!(self, TranscriptSource::Simulated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptSource::AiTranscription => "ai_transcription",
            TranscriptSource::Captions => "captions",
            TranscriptSource::Simulated => "simulated",
        }
    }
}

impl fmt::Display for TranscriptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a full transcript extraction.
///
/// Built fresh on every call. Derived views (see `WindowedTranscript`) are
/// new values; the full result is never modified after it is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoTranscriptResult {
    pub video_id: VideoId,
    /// Display label, not authoritative metadata
    pub title: String,
    /// `mm:ss`, or `Unknown` when not computable
    pub duration_label: String,
    /// Cleaned, flattened text
    pub transcript: String,
    pub segments: Vec<TranscriptSegment>,
    /// True only for AI transcription or caption content
    pub is_authentic: bool,
    pub source: TranscriptSource,
}

impl VideoTranscriptResult {
    /// Wrap content obtained from a real-world source.
    pub fn authentic(
        video_id: VideoId,
        source: TranscriptSource,
        transcript: String,
        segments: Vec<TranscriptSegment>,
    ) -> Self {
        let title = format!("YouTube Video {}", video_id);
        Self::build(video_id, title, source, transcript, segments)
    }

    /// Wrap generated placeholder content.
    pub fn simulated(
        video_id: VideoId,
        topic: &str,
        transcript: String,
        segments: Vec<TranscriptSegment>,
    ) -> Self {
        let title = format!("Practice Video: {}", topic);
        Self::build(video_id, title, TranscriptSource::Simulated, transcript, segments)
    }

    fn build(
        video_id: VideoId,
        title: String,
        source: TranscriptSource,
        transcript: String,
        segments: Vec<TranscriptSegment>,
    ) -> Self {
        let duration_ms = (!segments.is_empty()).then(|| max_end_ms(&segments));
        Self {
            video_id,
            title,
            duration_label: format_duration_label(duration_ms),
            transcript,
            segments,
            is_authentic: source.is_authentic(),
            source,
        }
    }

    /// Total covered duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        max_end_ms(&self.segments)
    }
}

/// Transcript bounded to a maximum source duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WindowedTranscript {
    pub transcript: String,
    /// Whole seconds covered by the kept segments
    pub duration_seconds: u64,
    pub segments: Vec<TranscriptSegment>,
    /// Carried over unchanged from the full result
    pub is_authentic: bool,
}
