//! Transcript pipeline metrics.
//!
//! Recorded through the `metrics` facade; the host binary decides whether a
//! recorder (e.g. Prometheus) is installed.

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Strategy attempts by strategy and outcome.
    pub const STRATEGY_TOTAL: &str = "lingo_transcript_strategy_total";

    /// Strategy latency in seconds by strategy.
    pub const STRATEGY_DURATION_SECONDS: &str = "lingo_transcript_strategy_duration_seconds";

    /// Final results by source.
    pub const RESULTS_TOTAL: &str = "lingo_transcript_results_total";
}

/// Record one strategy attempt.
pub fn record_strategy(strategy: &str, outcome: &str, duration_secs: f64) {
    counter!(
        names::STRATEGY_TOTAL,
        "strategy" => strategy.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    histogram!(
        names::STRATEGY_DURATION_SECONDS,
        "strategy" => strategy.to_string()
    )
    .record(duration_secs);
}

/// Record the source of a returned transcript.
pub fn record_result(source: &str) {
    counter!(names::RESULTS_TOTAL, "source" => source.to_string()).increment(1);
}
