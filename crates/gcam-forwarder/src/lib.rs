//! Best-effort delivery of gesture events to the external backend.
//!
//! This crate provides:
//! - A bounded in-process queue fed from the capture loop's hot path
//! - A small fixed pool of async workers, each attempting one delivery per
//!   event with a short timeout
//! - Drop-and-count overflow behavior instead of unbounded concurrency
//!
//! Delivery failures are logged and absorbed here; they never reach the
//! capture loop and are never retried.

pub mod config;
pub mod error;
pub mod forwarder;

pub use config::ForwarderConfig;
pub use error::{ForwarderError, ForwarderResult};
pub use forwarder::EventForwarder;

/// Metric names as constants for consistency.
pub mod metric_names {
    pub const EVENTS_FORWARDED_TOTAL: &str = "gcam_events_forwarded_total";
    pub const EVENTS_FAILED_TOTAL: &str = "gcam_events_failed_total";
    pub const EVENTS_DROPPED_TOTAL: &str = "gcam_events_dropped_total";
}
