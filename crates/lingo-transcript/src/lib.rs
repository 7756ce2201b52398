//! Transcript acquisition pipeline.
//!
//! This crate provides:
//! - AI transcription through a hosted multimodal model
//! - Caption extraction with a language-hint sweep
//! - Simulated practice content as the last fallback
//! - Duration windowing of the final result
//!
//! [`TranscriptExtractor`] is the entry point. Its operations never fail:
//! every error is logged and converted into the next fallback.

pub mod ai;
pub mod captions;
pub mod clean;
pub mod config;
pub mod error;
pub mod extractor;
pub mod gemini;
pub mod logging;
pub mod metrics;
pub mod orchestrator;
pub mod simulated;
pub mod strategy;
pub mod window;

pub use ai::AiTranscriptionStrategy;
pub use captions::{CaptionFetcher, CaptionFragment, CaptionStrategy, HttpCaptionFetcher};
pub use config::TranscriptConfig;
pub use error::{TranscriptError, TranscriptResult};
pub use extractor::TranscriptExtractor;
pub use gemini::{GeminiClient, GenerativeModel, VideoPrompt};
pub use logging::{LogContext, SilentLogger, StrategyLogger, TracingLogger, TranscriptLogger};
pub use orchestrator::{RealTranscript, TranscriptOrchestrator};
pub use simulated::SimulatedTranscriptGenerator;
pub use strategy::{StrategyOutcome, TranscriptCandidate};
pub use window::window_transcript;
