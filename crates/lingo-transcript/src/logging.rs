//! Injectable structured logging for the transcript pipeline.
//!
//! Strategies never call `tracing` directly; they log through a
//! [`TranscriptLogger`] so tests can run silently and production output
//! stays structured.

use std::fmt::{self, Display};
use std::sync::Arc;

use tracing::{debug, error, info, warn, Level};

/// Context attached to every pipeline log record.
#[derive(Debug, Clone, PartialEq)]
pub struct LogContext {
    pub video_id: String,
    pub strategy: &'static str,
    /// Ordered extra fields (language hint, error kind, ...)
    pub fields: Vec<(&'static str, String)>,
}

impl LogContext {
    pub fn new(video_id: impl Into<String>, strategy: &'static str) -> Self {
        Self {
            video_id: video_id.into(),
            strategy,
            fields: Vec::new(),
        }
    }

    /// Add a key/value field.
    pub fn with(mut self, key: &'static str, value: impl Display) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    /// Look up a field by key.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.fields {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", key, value)?;
            first = false;
        }
        Ok(())
    }
}

/// Sink for pipeline log records.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, level: Level, message: &str, context: &LogContext);
}

/// Forwards records to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TranscriptLogger for TracingLogger {
    fn log(&self, level: Level, message: &str, context: &LogContext) {
        let video_id = context.video_id.as_str();
        let strategy = context.strategy;
        match level {
            Level::ERROR => error!(video_id, strategy, context = %context, "{}", message),
            Level::WARN => warn!(video_id, strategy, context = %context, "{}", message),
            Level::INFO => info!(video_id, strategy, context = %context, "{}", message),
            _ => debug!(video_id, strategy, context = %context, "{}", message),
        }
    }
}

/// Drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentLogger;

impl TranscriptLogger for SilentLogger {
    fn log(&self, _level: Level, _message: &str, _context: &LogContext) {}
}

/// Logger bound to one video and one strategy.
#[derive(Clone)]
pub struct StrategyLogger {
    sink: Arc<dyn TranscriptLogger>,
    video_id: String,
    strategy: &'static str,
}

impl StrategyLogger {
    pub fn new(sink: Arc<dyn TranscriptLogger>, video_id: &str, strategy: &'static str) -> Self {
        Self {
            sink,
            video_id: video_id.to_string(),
            strategy,
        }
    }

    /// Start a context for this video/strategy pair.
    pub fn context(&self) -> LogContext {
        LogContext::new(self.video_id.clone(), self.strategy)
    }

    pub fn debug(&self, message: &str, context: LogContext) {
        self.sink.log(Level::DEBUG, message, &context);
    }

    pub fn info(&self, message: &str, context: LogContext) {
        self.sink.log(Level::INFO, message, &context);
    }

    pub fn warn(&self, message: &str, context: LogContext) {
        self.sink.log(Level::WARN, message, &context);
    }

    pub fn error(&self, message: &str, context: LogContext) {
        self.sink.log(Level::ERROR, message, &context);
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn strategy(&self) -> &'static str {
        self.strategy
    }
}

impl fmt::Debug for StrategyLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyLogger")
            .field("video_id", &self.video_id)
            .field("strategy", &self.strategy)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingLogger;
    use super::*;

    #[test]
    fn test_context_display_and_lookup() {
        let context = LogContext::new("abc", "captions")
            .with("lang", "en-US")
            .with("attempt", 3);
        assert_eq!(context.to_string(), "lang=en-US attempt=3");
        assert_eq!(context.field("attempt"), Some("3"));
        assert_eq!(context.field("missing"), None);
    }

    #[test]
    fn test_strategy_logger_binds_video_and_strategy() {
        let sink = Arc::new(RecordingLogger::default());
        let logger = StrategyLogger::new(sink.clone(), "abc", "ai_transcription");

        logger.warn("model declined", logger.context().with("reason", "refusal"));

        let records = sink.records();
        assert_eq!(records.len(), 1);
        let (level, message, context) = &records[0];
        assert_eq!(*level, Level::WARN);
        assert_eq!(message, "model declined");
        assert_eq!(context.video_id, "abc");
        assert_eq!(context.strategy, "ai_transcription");
        assert_eq!(context.field("reason"), Some("refusal"));
    }

    #[test]
    fn test_silent_logger_accepts_records() {
        let logger = StrategyLogger::new(Arc::new(SilentLogger), "abc", "simulated");
        logger.info("nothing to see", logger.context());
        assert_eq!(logger.video_id(), "abc");
        assert_eq!(logger.strategy(), "simulated");
    }
}
