//! Video identifier.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModelError, ModelResult};
use crate::youtube::{extract_youtube_id, looks_like_url};

const WATCH_URL_BASE: &str = "https://www.youtube.com/watch";

/// Opaque external video identifier. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Parse a bare identifier. Surrounding whitespace is trimmed.
    pub fn parse(raw: &str) -> ModelResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyVideoId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Accept either a YouTube URL or a bare identifier.
    ///
    /// URLs are reduced to their 11-character video id; anything that does
    /// not look like a URL is treated as an opaque id.
    pub fn from_input(input: &str) -> ModelResult<Self> {
        let trimmed = input.trim();
        if looks_like_url(trimmed) {
            return extract_youtube_id(trimmed).map(Self);
        }
        Self::parse(trimmed)
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public watch URL for this video.
    pub fn watch_url(&self) -> String {
        match url::Url::parse_with_params(WATCH_URL_BASE, &[("v", self.0.as_str())]) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}?v={}", WATCH_URL_BASE, self.0),
        }
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for VideoId {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_rejects_empty() {
        assert_eq!(VideoId::parse("  abc123  ").unwrap().as_str(), "abc123");
        assert_eq!(VideoId::parse("   "), Err(ModelError::EmptyVideoId));
        assert_eq!(VideoId::parse(""), Err(ModelError::EmptyVideoId));
    }

    #[test]
    fn test_from_input_accepts_url_and_bare_id() {
        let from_url = VideoId::from_input("https://youtu.be/dQw4w9WgXcQ?t=30").unwrap();
        assert_eq!(from_url.as_str(), "dQw4w9WgXcQ");

        let bare = VideoId::from_input("not-a-real-video").unwrap();
        assert_eq!(bare.as_str(), "not-a-real-video");
    }

    #[test]
    fn test_from_input_keeps_www_prefixed_id_opaque() {
        let id = VideoId::from_input("www.lesson-42").unwrap();
        assert_eq!(id.as_str(), "www.lesson-42");
    }

    #[test]
    fn test_from_input_rejects_foreign_url() {
        assert!(matches!(
            VideoId::from_input("https://vimeo.com/123"),
            Err(ModelError::InvalidYoutubeUrl(_))
        ));
    }

    #[test]
    fn test_watch_url_encodes_id() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");

        let odd = VideoId::parse("a b&c").unwrap();
        assert_eq!(odd.watch_url(), "https://www.youtube.com/watch?v=a+b%26c");
    }

    #[test]
    fn test_serde_is_transparent_string() {
        let id = VideoId::parse("xyz").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"xyz\"");
        assert!(serde_json::from_str::<VideoId>("\"\"").is_err());
    }
}
