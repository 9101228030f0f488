//! Structured event logging.
//!
//! Provides [`JsonlEventLogger`], an append-only JSONL writer implementing
//! the [`EventLogger`](chorus_application::EventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlEventLogger;
