//! Timed transcript fragments.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One timed fragment of spoken content.
///
/// Segments from a single source are produced in non-decreasing offset
/// order; nothing enforces monotonicity across sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSegment {
    /// Spoken words in this fragment
    pub text: String,
    /// How long this fragment spans
    pub duration_ms: u64,
    /// Start time relative to the video start
    pub offset_ms: u64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, duration_ms: u64, offset_ms: u64) -> Self {
        Self {
            text: text.into(),
            duration_ms,
            offset_ms,
        }
    }

    /// End of this fragment (offset + duration).
    pub fn end_ms(&self) -> u64 {
        self.offset_ms.saturating_add(self.duration_ms)
    }
}

/// Join segment texts with single spaces, skipping blank fragments.
pub fn join_segment_text(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Latest end time across all segments, 0 when empty.
pub fn max_end_ms(segments: &[TranscriptSegment]) -> u64 {
    segments.iter().map(TranscriptSegment::end_ms).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let segment = TranscriptSegment::new("hello", 3000, 6000);
        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "hello", "durationMs": 3000, "offsetMs": 6000})
        );
    }

    #[test]
    fn test_join_and_max_end() {
        let segments = vec![
            TranscriptSegment::new("one two", 3000, 0),
            TranscriptSegment::new("  ", 1000, 3000),
            TranscriptSegment::new("three", 2500, 6000),
        ];
        assert_eq!(join_segment_text(&segments), "one two three");
        assert_eq!(max_end_ms(&segments), 8500);
        assert_eq!(max_end_ms(&[]), 0);
    }
}
