//! YouTube URL parsing.
//!
//! Supports all common URL shapes:
//! - https://youtube.com/watch?v=VIDEO_ID
//! - https://youtu.be/VIDEO_ID
//! - https://youtube.com/embed/VIDEO_ID
//! - https://youtube.com/v/VIDEO_ID
//! - https://youtube.com/shorts/VIDEO_ID

use url::Url;

use crate::error::{ModelError, ModelResult};

/// YouTube video ids are exactly this long.
const YOUTUBE_ID_LEN: usize = 11;

/// Scheme-less prefixes treated as YouTube URLs.
const HOST_PREFIXES: [&str; 5] = [
    "youtube.com/",
    "www.youtube.com/",
    "m.youtube.com/",
    "music.youtube.com/",
    "youtu.be/",
];

/// Whether user input should be parsed as a URL rather than an opaque id.
///
/// Requires a scheme or a known YouTube host prefix.
pub fn looks_like_url(input: &str) -> bool {
    let lower = input.trim().to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || HOST_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

/// Extract the 11-character video id from a YouTube URL.
pub fn extract_youtube_id(input: &str) -> ModelResult<String> {
    let trimmed = input.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme)
        .map_err(|_| ModelError::InvalidYoutubeUrl(trimmed.to_string()))?;
    let host = url
        .host_str()
        .ok_or_else(|| ModelError::InvalidYoutubeUrl(trimmed.to_string()))?;
    if !is_youtube_host(host) {
        return Err(ModelError::InvalidYoutubeUrl(trimmed.to_string()));
    }

    let candidate = if host.eq_ignore_ascii_case("youtu.be") {
        first_path_segment(&url)
    } else if url.path().starts_with("/watch") {
        url.query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.trim().to_string())
    } else {
        prefixed_path_segment(&url)
    };

    match candidate {
        Some(id) if !id.is_empty() => validate_youtube_id(id),
        _ => Err(ModelError::VideoIdNotFound(trimmed.to_string())),
    }
}

fn is_youtube_host(host: &str) -> bool {
    let h = host.to_ascii_lowercase();
    h == "youtube.com" || h == "youtu.be" || h.ends_with(".youtube.com")
}

fn first_path_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .next()
        .map(|s| s.trim().to_string())
}

/// /embed/<id>, /v/<id>, /shorts/<id>
fn prefixed_path_segment(url: &Url) -> Option<String> {
    let mut segs = url.path_segments()?;
    let prefix = segs.next()?;
    let id = segs.next()?;
    matches!(prefix, "embed" | "v" | "shorts").then(|| id.trim().to_string())
}

fn validate_youtube_id(id: String) -> ModelResult<String> {
    let valid_chars = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if id.len() != YOUTUBE_ID_LEN || !valid_chars {
        return Err(ModelError::InvalidVideoId(id));
    }
    Ok(id)
}
