//! Caption-extraction strategy.
//!
//! Sweeps an ordered list of language hints against a captions service and
//! stops at the first hint that yields text. One unhinted attempt runs as a
//! last resort after the sweep.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lingo_models::{TranscriptSegment, TranscriptSource, VideoId};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::clean::{clean_caption_text, collapse_whitespace};
use crate::config::TranscriptConfig;
use crate::error::{TranscriptError, TranscriptResult};
use crate::logging::StrategyLogger;
use crate::strategy::{StrategyOutcome, TranscriptCandidate};

/// Caption fragment as reported by the captions service.
///
/// Timing values are milliseconds and may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionFragment {
    pub text: String,
    pub duration_ms: Option<f64>,
    pub offset_ms: Option<f64>,
}

impl CaptionFragment {
    pub fn new(text: impl Into<String>, duration_ms: Option<f64>, offset_ms: Option<f64>) -> Self {
        Self {
            text: text.into(),
            duration_ms,
            offset_ms,
        }
    }
}

/// Source of raw captions for a video.
#[async_trait]
pub trait CaptionFetcher: Send + Sync {
    /// Fetch captions, optionally restricted to a language. An empty list
    /// means "no captions for this hint".
    async fn fetch_captions(
        &self,
        video_id: &str,
        language: Option<&str>,
    ) -> TranscriptResult<Vec<CaptionFragment>>;
}

/// Map an untyped captions payload into fragments.
///
/// Accepts a bare array or an object wrapping the array under
/// `transcript`, `segments` or `captions`. Entries without usable text are
/// skipped; timing fields may be numbers or numeric strings.
pub fn fragments_from_payload(payload: Value) -> TranscriptResult<Vec<CaptionFragment>> {
    let entries = match payload {
        Value::Array(entries) => entries,
        Value::Object(mut map) => ["transcript", "segments", "captions"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(entries)) => Some(entries),
                _ => None,
            })
            .ok_or_else(|| TranscriptError::invalid_response("captions payload has no fragment list"))?,
        Value::Null => Vec::new(),
        other => {
            return Err(TranscriptError::invalid_response(format!(
                "unexpected captions payload: {}",
                type_name(&other)
            )))
        }
    };

    Ok(entries.into_iter().filter_map(fragment_from_value).collect())
}

fn fragment_from_value(value: Value) -> Option<CaptionFragment> {
    let text = match value.get("text")? {
        Value::String(s) if !s.trim().is_empty() => s.clone(),
        _ => return None,
    };
    Some(CaptionFragment {
        text,
        duration_ms: value.get("duration").and_then(number_from_value),
        offset_ms: value.get("offset").and_then(number_from_value),
    })
}

fn number_from_value(value: &Value) -> Option<f64> {
    let number: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// HTTP client for the captions service.
///
/// `GET {base}/captions/{video_id}?lang={hint}` returning a JSON fragment
/// list. A 404 means the video has no captions for that hint.
pub struct HttpCaptionFetcher {
    http: Client,
    base_url: Url,
}

impl HttpCaptionFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> TranscriptResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            TranscriptError::not_configured(format!("invalid captions service URL: {}", e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TranscriptError::not_configured(
                "captions service URL cannot be a base",
            ));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TranscriptError::from)?;

        Ok(Self { http, base_url })
    }

    /// Create from pipeline config.
    pub fn from_config(config: &TranscriptConfig) -> TranscriptResult<Self> {
        Self::new(&config.captions_base_url, config.caption_timeout)
    }

    fn captions_url(&self, video_id: &str, language: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("captions").push(video_id);
        }
        if let Some(lang) = language {
            url.query_pairs_mut().append_pair("lang", lang);
        }
        url
    }
}

#[async_trait]
impl CaptionFetcher for HttpCaptionFetcher {
    async fn fetch_captions(
        &self,
        video_id: &str,
        language: Option<&str>,
    ) -> TranscriptResult<Vec<CaptionFragment>> {
        let url = self.captions_url(video_id, language);
        let response = self.http.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptError::request_failed(format!(
                "captions service returned {}: {}",
                status, body
            )));
        }

        let payload: Value = response.json().await?;
        fragments_from_payload(payload)
    }
}

/// Build a cleaned transcript and segments from raw fragments.
pub fn build_caption_transcript(fragments: &[CaptionFragment]) -> TranscriptCandidate {
    let segments: Vec<TranscriptSegment> = fragments
        .iter()
        .filter_map(|fragment| {
            let text = clean_caption_text(&fragment.text);
            (!text.is_empty()).then(|| {
                TranscriptSegment::new(
                    text,
                    to_millis(fragment.duration_ms),
                    to_millis(fragment.offset_ms),
                )
            })
        })
        .collect();

    let joined = segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    TranscriptCandidate {
        transcript: collapse_whitespace(&joined),
        segments,
        source: TranscriptSource::Captions,
    }
}

fn to_millis(value: Option<f64>) -> u64 {
    value
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v.round() as u64)
        .unwrap_or(0)
}

/// Caption-extraction strategy.
pub struct CaptionStrategy {
    fetcher: Arc<dyn CaptionFetcher>,
    language_hints: Vec<Option<String>>,
    timeout: Duration,
}

impl CaptionStrategy {
    pub fn new(
        fetcher: Arc<dyn CaptionFetcher>,
        language_hints: Vec<Option<String>>,
        timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            language_hints,
            timeout,
        }
    }

    /// Create from pipeline config with the given fetcher.
    pub fn from_config(fetcher: Arc<dyn CaptionFetcher>, config: &TranscriptConfig) -> Self {
        Self::new(fetcher, config.language_hints.clone(), config.caption_timeout)
    }

    /// Run the language sweep, then the unhinted last resort.
    pub async fn extract(&self, video_id: &VideoId, logger: &StrategyLogger) -> StrategyOutcome {
        let started = Instant::now();

        for (index, hint) in self.language_hints.iter().enumerate() {
            let hint = hint.as_deref();
            if let Some(candidate) = self.attempt(video_id, hint, index + 1, logger).await {
                return StrategyOutcome::settle(Ok(candidate), logger, started);
            }
        }

        logger.debug(
            "Language sweep exhausted, trying unhinted request",
            logger.context().with("hints", self.language_hints.len()),
        );
        let last_resort = self.language_hints.len() + 1;
        if let Some(candidate) = self.attempt(video_id, None, last_resort, logger).await {
            return StrategyOutcome::settle(Ok(candidate), logger, started);
        }

        StrategyOutcome::settle(
            Err(TranscriptError::not_found(format!(
                "no captions after {} attempts",
                last_resort
            ))),
            logger,
            started,
        )
    }

    /// One request. Failures are logged and reported as `None`.
    async fn attempt(
        &self,
        video_id: &VideoId,
        hint: Option<&str>,
        attempt: usize,
        logger: &StrategyLogger,
    ) -> Option<TranscriptCandidate> {
        let lang = hint.unwrap_or("unspecified");
        logger.debug(
            "Requesting captions",
            logger.context().with("lang", lang).with("attempt", attempt),
        );

        let fetched = tokio::time::timeout(
            self.timeout,
            self.fetcher.fetch_captions(video_id.as_str(), hint),
        )
        .await
        .unwrap_or(Err(TranscriptError::Timeout(self.timeout)));

        match fetched {
            Ok(fragments) => {
                let candidate = build_caption_transcript(&fragments);
                if candidate.transcript.is_empty() {
                    logger.debug(
                        "No captions for language hint",
                        logger.context().with("lang", lang).with("attempt", attempt),
                    );
                    None
                } else {
                    logger.info(
                        "Captions found",
                        logger
                            .context()
                            .with("lang", lang)
                            .with("attempt", attempt)
                            .with("fragments", fragments.len()),
                    );
                    Some(candidate)
                }
            }
            Err(e) => {
                logger.warn(
                    "Caption request failed, trying next hint",
                    logger
                        .context()
                        .with("lang", lang)
                        .with("attempt", attempt)
                        .with("error", e),
                );
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Scripted captions source recording every requested hint.
    #[derive(Default)]
    pub struct ScriptedCaptions {
        responses: HashMap<Option<String>, Vec<CaptionFragment>>,
        failing: Vec<Option<String>>,
        calls: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedCaptions {
        pub fn respond(mut self, hint: Option<&str>, fragments: Vec<CaptionFragment>) -> Self {
            self.responses.insert(hint.map(str::to_string), fragments);
            self
        }

        pub fn fail(mut self, hint: Option<&str>) -> Self {
            self.failing.push(hint.map(str::to_string));
            self
        }

        pub fn calls(&self) -> Vec<Option<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CaptionFetcher for ScriptedCaptions {
        async fn fetch_captions(
            &self,
            _video_id: &str,
            language: Option<&str>,
        ) -> TranscriptResult<Vec<CaptionFragment>> {
            let key = language.map(str::to_string);
            self.calls.lock().unwrap().push(key.clone());
            if self.failing.contains(&key) {
                return Err(TranscriptError::request_failed("scripted failure"));
            }
            Ok(self.responses.get(&key).cloned().unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::testing::ScriptedCaptions;
    use super::*;
    use crate::config::DEFAULT_LANGUAGE_HINTS;
    use crate::logging::SilentLogger;

    fn hints() -> Vec<Option<String>> {
        DEFAULT_LANGUAGE_HINTS
            .iter()
            .map(|h| (!h.is_empty()).then(|| h.to_string()))
            .collect()
    }

    fn logger() -> StrategyLogger {
        StrategyLogger::new(Arc::new(SilentLogger), "vid12345678", "captions")
    }

    fn video() -> VideoId {
        VideoId::parse("vid12345678").unwrap()
    }

    fn sample_fragments() -> Vec<CaptionFragment> {
        vec![
            CaptionFragment::new("[Music]", Some(1500.0), Some(0.0)),
            CaptionFragment::new("Hello   and welcome", Some(2000.0), Some(1500.0)),
            CaptionFragment::new("to the show [Applause]", None, Some(3500.0)),
        ]
    }

    #[test]
    fn test_fragments_from_payload_variants() {
        let bare = json!([
            {"text": "one", "duration": 1200, "offset": "300"},
            {"text": "   "},
            {"duration": 5},
            "garbage",
            {"text": "two"}
        ]);
        let fragments = fragments_from_payload(bare).unwrap();
        assert_eq!(
            fragments,
            vec![
                CaptionFragment::new("one", Some(1200.0), Some(300.0)),
                CaptionFragment::new("two", None, None),
            ]
        );

        let wrapped = json!({"segments": [{"text": "three", "offset": 10.5}]});
        assert_eq!(fragments_from_payload(wrapped).unwrap().len(), 1);

        assert!(fragments_from_payload(Value::Null).unwrap().is_empty());
        assert!(fragments_from_payload(json!({"error": "nope"})).is_err());
        assert!(fragments_from_payload(json!("text")).is_err());
    }

    #[test]
    fn test_build_caption_transcript_cleans_and_preserves_timing() {
        let candidate = build_caption_transcript(&sample_fragments());

        assert_eq!(candidate.transcript, "Hello and welcome to the show");
        assert_eq!(candidate.source, TranscriptSource::Captions);
        assert_eq!(
            candidate.segments,
            vec![
                TranscriptSegment::new("Hello and welcome", 2000, 1500),
                TranscriptSegment::new("to the show", 0, 3500),
            ]
        );
    }

    #[tokio::test]
    async fn test_sweep_stops_at_first_success() {
        let fetcher = Arc::new(
            ScriptedCaptions::default()
                .fail(None)
                .fail(Some("en"))
                .respond(Some("en-US"), sample_fragments()),
        );
        let strategy = CaptionStrategy::new(fetcher.clone(), hints(), Duration::from_secs(5));

        let outcome = strategy.extract(&video(), &logger()).await;

        assert!(outcome.is_found());
        assert_eq!(
            fetcher.calls(),
            vec![None, Some("en".to_string()), Some("en-US".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unhinted_last_resort_after_sweep() {
        struct LastResortOnly {
            calls: std::sync::atomic::AtomicUsize,
        }

        #[async_trait]
        impl CaptionFetcher for LastResortOnly {
            async fn fetch_captions(
                &self,
                _video_id: &str,
                _language: Option<&str>,
            ) -> TranscriptResult<Vec<CaptionFragment>> {
                let n = self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                if n < 5 {
                    Ok(Vec::new())
                } else {
                    Ok(vec![CaptionFragment::new("finally here", Some(1000.0), Some(0.0))])
                }
            }
        }

        let fetcher = Arc::new(LastResortOnly {
            calls: std::sync::atomic::AtomicUsize::new(0),
        });
        let strategy = CaptionStrategy::new(fetcher.clone(), hints(), Duration::from_secs(5));

        let outcome = strategy.extract(&video(), &logger()).await;

        let candidate = outcome.into_candidate().unwrap();
        assert_eq!(candidate.transcript, "finally here");
        assert_eq!(fetcher.calls.load(std::sync::atomic::Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_total_failure_is_not_found() {
        let fetcher = Arc::new(
            ScriptedCaptions::default()
                .fail(None)
                .fail(Some("en"))
                .fail(Some("en-US"))
                .fail(Some("en-GB"))
                .fail(Some("auto")),
        );
        let strategy = CaptionStrategy::new(fetcher.clone(), hints(), Duration::from_secs(5));

        let outcome = strategy.extract(&video(), &logger()).await;

        assert!(matches!(outcome, StrategyOutcome::NotFound { .. }));
        assert_eq!(fetcher.calls().len(), 6);
    }

    #[tokio::test]
    async fn test_slow_fetch_times_out_and_moves_on() {
        struct Slow;

        #[async_trait]
        impl CaptionFetcher for Slow {
            async fn fetch_captions(
                &self,
                _video_id: &str,
                language: Option<&str>,
            ) -> TranscriptResult<Vec<CaptionFragment>> {
                if language.is_none() {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                }
                Ok(vec![CaptionFragment::new("fast enough", None, None)])
            }
        }

        let strategy = CaptionStrategy::new(Arc::new(Slow), hints(), Duration::from_millis(20));
        let outcome = strategy.extract(&video(), &logger()).await;

        assert_eq!(outcome.into_candidate().unwrap().transcript, "fast enough");
    }

    #[tokio::test]
    async fn test_http_fetcher_reads_captions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/captions/dQw4w9WgXcQ"))
            .and(query_param("lang", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"text": "never gonna", "duration": 1800, "offset": 0},
                {"text": "give you up", "duration": 2100, "offset": 1800}
            ])))
            .mount(&server)
            .await;

        let fetcher = HttpCaptionFetcher::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let fragments = fetcher.fetch_captions("dQw4w9WgXcQ", Some("en")).await.unwrap();

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[1].offset_ms, Some(1800.0));
    }

    #[tokio::test]
    async fn test_http_fetcher_not_found_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpCaptionFetcher::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let fragments = fetcher.fetch_captions("missing", None).await.unwrap();

        assert!(fragments.is_empty());
    }

    #[tokio::test]
    async fn test_http_fetcher_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let fetcher = HttpCaptionFetcher::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let err = fetcher.fetch_captions("vid", None).await.unwrap_err();

        assert!(matches!(err, TranscriptError::RequestFailed(_)));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_captions_url_building() {
        let fetcher =
            HttpCaptionFetcher::new("http://captions.local/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            fetcher.captions_url("a/b", Some("en-US")).as_str(),
            "http://captions.local/api/captions/a%2Fb?lang=en-US"
        );
        assert_eq!(
            fetcher.captions_url("abc", None).as_str(),
            "http://captions.local/api/captions/abc"
        );
    }

    #[test]
    fn test_invalid_base_url_is_not_configured() {
        assert!(matches!(
            HttpCaptionFetcher::new("not a url", Duration::from_secs(1)),
            Err(TranscriptError::NotConfigured(_))
        ));
    }
}
