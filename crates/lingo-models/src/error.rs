//! Model validation errors.

use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Video id cannot be empty")]
    EmptyVideoId,

    #[error("URL is not a valid YouTube URL: {0}")]
    InvalidYoutubeUrl(String),

    #[error("Video id not found in URL: {0}")]
    VideoIdNotFound(String),

    #[error("Video id has invalid format: {0}")]
    InvalidVideoId(String),
}
