//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod metric_names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "gcam_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "gcam_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "gcam_http_requests_in_flight";

    // Stream metrics
    pub const STREAM_CLIENTS_ACTIVE: &str = "gcam_stream_clients_active";
    pub const STREAM_FRAMES_SENT_TOTAL: &str = "gcam_stream_frames_sent_total";

    // Rate limiting metrics
    pub const RATE_LIMIT_HITS_TOTAL: &str = "gcam_rate_limit_hits_total";
}

/// Record an HTTP request. All routes are static paths, so the raw path is a
/// safe label value.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(metric_names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(metric_names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a frame emitted on the MJPEG stream.
pub fn record_stream_frame() {
    counter!(metric_names::STREAM_FRAMES_SENT_TOTAL).increment(1);
}

/// Track a stream client connecting/disconnecting.
pub fn stream_client_delta(delta: f64) {
    gauge!(metric_names::STREAM_CLIENTS_ACTIVE).increment(delta);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(metric_names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(metric_names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(metric_names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
