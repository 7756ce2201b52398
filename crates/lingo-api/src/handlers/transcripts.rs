//! Transcript handlers.
//!
//! Acquisition itself never fails; only malformed input is rejected.

use axum::extract::{Path, Query, State};
use axum::Json;
use lingo_models::{VideoId, VideoTranscriptResult, WindowedTranscript};
use serde::Deserialize;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query for the windowed endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowQuery {
    pub max_duration_seconds: Option<f64>,
}

impl WindowQuery {
    /// Reject bounds the windowing rule cannot use.
    pub fn validated(&self) -> ApiResult<Option<f64>> {
        match self.max_duration_seconds {
            Some(max) if !max.is_finite() || max < 0.0 => Err(ApiError::bad_request(format!(
                "maxDurationSeconds must be a finite non-negative number, got {}",
                max
            ))),
            other => Ok(other),
        }
    }
}

/// Full transcript for a video id or YouTube URL.
pub async fn get_video_transcript(
    State(state): State<AppState>,
    Path(video): Path<String>,
) -> ApiResult<Json<VideoTranscriptResult>> {
    let video_id = VideoId::from_input(&video)?;
    let result = state.extractor.extract_video_transcript(&video_id).await;

    info!(
        video_id = %video_id,
        source = %result.source,
        segments = result.segments.len(),
        "Served transcript"
    );

    Ok(Json(result))
}

/// Transcript bounded to `maxDurationSeconds` of content.
pub async fn get_windowed_transcript(
    State(state): State<AppState>,
    Path(video): Path<String>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<Json<WindowedTranscript>> {
    let video_id = VideoId::from_input(&video)?;
    let max_duration_seconds = query.validated()?;
    let windowed = state
        .extractor
        .get_transcript(&video_id, max_duration_seconds)
        .await;

    info!(
        video_id = %video_id,
        max_duration_seconds = ?max_duration_seconds,
        duration_seconds = windowed.duration_seconds,
        segments = windowed.segments.len(),
        "Served windowed transcript"
    );

    Ok(Json(windowed))
}
