//! Bounded event delivery with a fixed worker pool.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use metrics::counter;
use reqwest::Client;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use gcam_models::GestureEvent;

use crate::config::ForwarderConfig;
use crate::error::ForwarderResult;
use crate::metric_names;

/// Handle for enqueueing events toward the backend.
///
/// `forward` never blocks the caller: events go into a bounded queue drained
/// by the worker pool, and overflow is dropped and counted. Clones share the
/// same queue and counters. Callable from any thread.
#[derive(Clone)]
pub struct EventForwarder {
    tx: mpsc::Sender<GestureEvent>,
    dropped: Arc<AtomicU64>,
}

impl EventForwarder {
    /// Build the queue and spawn the delivery workers on the current runtime.
    pub fn spawn(config: ForwarderConfig, shutdown: watch::Receiver<bool>) -> ForwarderResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));
        let url = config.log_url();

        info!(
            url = %url,
            workers = config.workers,
            capacity = config.queue_capacity,
            "Starting event forwarder"
        );

        for worker_id in 0..config.workers {
            let client = client.clone();
            let url = url.clone();
            let rx = Arc::clone(&rx);
            let shutdown = shutdown.clone();
            tokio::spawn(delivery_worker(worker_id, client, url, rx, shutdown));
        }

        Ok(Self {
            tx,
            dropped: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Enqueue an event for delivery. Never blocks; a full queue drops the
    /// event and bumps the dropped counter.
    pub fn forward(&self, event: GestureEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                counter!(metric_names::EVENTS_DROPPED_TOTAL).increment(1);
                warn!(event_type = %event.event_type, "Event queue full, dropping event");
            }
            Err(TrySendError::Closed(event)) => {
                warn!(event_type = %event.event_type, "Event forwarder stopped, dropping event");
            }
        }
    }

    /// Total events dropped due to a full queue.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// One delivery worker: pull an event, attempt a single POST, move on.
async fn delivery_worker(
    worker_id: usize,
    client: Client,
    url: String,
    rx: Arc<Mutex<mpsc::Receiver<GestureEvent>>>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        // The receiver lock is held only while waiting for the next event,
        // never across a delivery, so workers deliver concurrently.
        let event = {
            let mut rx = rx.lock().await;
            tokio::select! {
                _ = shutdown.changed() => None,
                event = rx.recv() => event,
            }
        };

        let Some(event) = event else {
            debug!(worker_id, "Delivery worker stopping");
            return;
        };

        deliver(&client, &url, &event).await;
    }
}

/// One delivery attempt. Success is any 2xx; everything else is logged and
/// dropped, no retry.
async fn deliver(client: &Client, url: &str, event: &GestureEvent) {
    match client.post(url).json(event).send().await {
        Ok(response) if response.status().is_success() => {
            counter!(metric_names::EVENTS_FORWARDED_TOTAL).increment(1);
            info!(event_type = %event.event_type, "Event sent to backend");
        }
        Ok(response) => {
            counter!(metric_names::EVENTS_FAILED_TOTAL).increment(1);
            warn!(
                event_type = %event.event_type,
                status = %response.status(),
                "Backend rejected event"
            );
        }
        Err(e) => {
            counter!(metric_names::EVENTS_FAILED_TOTAL).increment(1);
            warn!(event_type = %event.event_type, error = %e, "Failed to send event to backend");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use gcam_models::GestureLabel;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str, workers: usize) -> ForwarderConfig {
        ForwarderConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_millis(500),
            queue_capacity: 8,
            workers,
        }
    }

    async fn wait_for_requests(server: &MockServer, count: usize) {
        for _ in 0..50 {
            let received = server.received_requests().await.unwrap_or_default();
            if received.len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("backend never received {count} request(s)");
    }

    #[tokio::test]
    async fn test_delivers_event_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/log"))
            .and(body_partial_json(serde_json::json!({
                "event_type": "ROCK Detected",
                "camera_id": "Camera 1"
            })))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let (_stop, shutdown) = watch::channel(false);
        let forwarder = EventForwarder::spawn(test_config(&server.uri(), 2), shutdown).unwrap();

        forwarder.forward(GestureEvent::gesture_change(GestureLabel::Rock, "Camera 1"));
        wait_for_requests(&server, 1).await;
        assert_eq!(forwarder.dropped(), 0);
    }

    #[tokio::test]
    async fn test_backend_error_is_absorbed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/log"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (_stop, shutdown) = watch::channel(false);
        let forwarder = EventForwarder::spawn(test_config(&server.uri(), 1), shutdown).unwrap();

        forwarder.forward(GestureEvent::gesture_change(GestureLabel::Paper, "Camera 1"));
        forwarder.forward(GestureEvent::gesture_change(GestureLabel::Rock, "Camera 1"));

        // Both attempts reach the backend; failures are not retried
        wait_for_requests(&server, 2).await;
        assert_eq!(forwarder.dropped(), 0);
    }

    #[tokio::test]
    async fn test_timeout_is_absorbed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/log"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let (_stop, shutdown) = watch::channel(false);
        let mut config = test_config(&server.uri(), 1);
        config.timeout = Duration::from_millis(50);
        let forwarder = EventForwarder::spawn(config, shutdown).unwrap();

        forwarder.forward(GestureEvent::gesture_change(GestureLabel::Scissors, "Camera 1"));
        tokio::time::sleep(Duration::from_millis(200)).await;

        // A timed-out delivery is a failure, not a drop, and the forwarder
        // keeps accepting events
        assert_eq!(forwarder.dropped(), 0);
        forwarder.forward(GestureEvent::gesture_change(GestureLabel::Rock, "Camera 1"));
    }

    #[tokio::test]
    async fn test_overflow_drops_and_counts() {
        // No workers: nothing drains the queue
        let (_stop, shutdown) = watch::channel(false);
        let config = ForwarderConfig {
            base_url: "http://localhost:9".to_string(),
            timeout: Duration::from_millis(100),
            queue_capacity: 2,
            workers: 0,
        };
        let forwarder = EventForwarder::spawn(config, shutdown).unwrap();

        for _ in 0..5 {
            forwarder.forward(GestureEvent::gesture_change(GestureLabel::Rock, "Camera 1"));
        }
        assert_eq!(forwarder.dropped(), 3);
    }
}
