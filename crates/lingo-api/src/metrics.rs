//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "lingo_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "lingo_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "lingo_http_requests_in_flight";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Collapse video identifiers so label cardinality stays bounded.
fn sanitize_path(path: &str) -> String {
    const PREFIX: &str = "/api/transcripts/";

    match path.strip_prefix(PREFIX) {
        Some(rest) if rest.ends_with("/window") => format!("{}:video/window", PREFIX),
        Some(_) => format!("{}:video", PREFIX),
        None => path.to_string(),
    }
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);
    let response = next.run(request).await;
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path() {
        assert_eq!(
            sanitize_path("/api/transcripts/dQw4w9WgXcQ"),
            "/api/transcripts/:video"
        );
        assert_eq!(
            sanitize_path("/api/transcripts/https%3A%2F%2Fyoutu.be%2FdQw4w9WgXcQ/window"),
            "/api/transcripts/:video/window"
        );
        assert_eq!(sanitize_path("/health"), "/health");
    }
}
