//! Port for structured event logging.
//!
//! Defines the [`EventLogger`] trait for recording orchestration events
//! (fallback attempts, research queries, consensus responses) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable trail (JSONL) for later analysis.

use serde_json::Value;

/// A structured event for logging.
pub struct LogEvent {
    /// Event type identifier (e.g., "fallback_attempt", "research_query").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl LogEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging events to a structured log.
///
/// `log` is synchronous and infallible; implementations swallow write errors.
pub trait EventLogger: Send + Sync {
    /// Record an event.
    fn log(&self, event: LogEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoEventLogger;

impl EventLogger for NoEventLogger {
    fn log(&self, _event: LogEvent) {}
}
