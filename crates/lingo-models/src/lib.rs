//! Shared data models for the transcript service.
//!
//! This crate provides Serde-serializable types for:
//! - Video identifiers and YouTube URL parsing
//! - Timed transcript segments
//! - Full and duration-windowed transcript results
//! - Duration label formatting

pub mod error;
pub mod segment;
pub mod timestamp;
pub mod transcript;
pub mod video;
pub mod youtube;

// Re-export common types
pub use error::{ModelError, ModelResult};
pub use segment::TranscriptSegment;
pub use timestamp::{format_duration_label, millis_to_whole_seconds, UNKNOWN_DURATION_LABEL};
pub use transcript::{TranscriptSource, VideoTranscriptResult, WindowedTranscript};
pub use video::VideoId;
pub use youtube::{extract_youtube_id, looks_like_url};
