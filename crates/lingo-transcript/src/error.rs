//! Transcript pipeline error types.
//!
//! These never escape the extractor: each strategy converts them into an
//! explicit not-found outcome at its boundary.

use std::time::Duration;

use thiserror::Error;

pub type TranscriptResult<T> = Result<T, TranscriptError>;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Service not configured: {0}")]
    NotConfigured(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Transcript rejected: {0}")]
    Rejected(String),

    #[error("Transcript not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(reqwest::Error),
}

/// Request URLs can carry credentials, so they never reach error text.
impl From<reqwest::Error> for TranscriptError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url())
    }
}

impl TranscriptError {
    pub fn not_configured(msg: impl Into<String>) -> Self {
        Self::NotConfigured(msg.into())
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            TranscriptError::NotConfigured(_) => "not_configured",
            TranscriptError::RequestFailed(_) => "request_failed",
            TranscriptError::InvalidResponse(_) => "invalid_response",
            TranscriptError::Timeout(_) => "timeout",
            TranscriptError::Rejected(_) => "rejected",
            TranscriptError::NotFound(_) => "not_found",
            TranscriptError::Network(_) => "network",
        }
    }
}
