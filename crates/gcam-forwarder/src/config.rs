//! Forwarder configuration.

use std::time::Duration;

/// Event forwarder configuration.
#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    /// Base URL of the event backend
    pub base_url: String,
    /// Per-delivery timeout
    pub timeout: Duration,
    /// Bounded queue capacity; events beyond this are dropped and counted
    pub queue_capacity: usize,
    /// Number of delivery workers
    pub workers: usize,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(2),
            queue_capacity: 64,
            workers: 2,
        }
    }
}

impl ForwarderConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("EVENT_BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            timeout: Duration::from_millis(
                std::env::var("EVENT_TIMEOUT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2000),
            ),
            queue_capacity: std::env::var("EVENT_QUEUE_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(64),
            workers: std::env::var("EVENT_WORKERS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        }
    }

    /// Full URL events are posted to.
    pub fn log_url(&self) -> String {
        format!("{}/api/log", self.base_url.trim_end_matches('/'))
    }
}
