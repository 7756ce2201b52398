//! Duration windowing.

use lingo_models::segment::{join_segment_text, max_end_ms};
use lingo_models::{millis_to_whole_seconds, TranscriptSegment, VideoTranscriptResult, WindowedTranscript};

/// Bound a full result to segments starting before `max_duration_seconds`.
///
/// Without a bound the full transcript and segments are returned. With a
/// bound, segments with `offset_ms < max * 1000` are kept, the text is
/// rebuilt from them and the duration is the latest `offset + duration`
/// among kept segments, in whole seconds (rounded up). Non-finite or
/// negative bounds keep nothing. The input is only borrowed.
pub fn window_transcript(
    full: &VideoTranscriptResult,
    max_duration_seconds: Option<f64>,
) -> WindowedTranscript {
    let Some(max_seconds) = max_duration_seconds else {
        return WindowedTranscript {
            transcript: full.transcript.clone(),
            duration_seconds: millis_to_whole_seconds(max_end_ms(&full.segments)),
            segments: full.segments.clone(),
            is_authentic: full.is_authentic,
        };
    };

    let cutoff_ms = if max_seconds.is_finite() && max_seconds > 0.0 {
        max_seconds * 1000.0
    } else {
        0.0
    };

    let kept: Vec<TranscriptSegment> = full
        .segments
        .iter()
        .filter(|segment| (segment.offset_ms as f64) < cutoff_ms)
        .cloned()
        .collect();

    WindowedTranscript {
        transcript: join_segment_text(&kept),
        duration_seconds: millis_to_whole_seconds(max_end_ms(&kept)),
        segments: kept,
        is_authentic: full.is_authentic,
    }
}
