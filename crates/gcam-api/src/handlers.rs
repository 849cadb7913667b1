//! HTTP handlers.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use gcam_models::{GestureEvent, GestureLabel};
use gcam_vision::encode::encode_jpeg;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Gesture Camera Stream</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            text-align: center;
            background-color: #1a1a1a;
            color: white;
            margin: 0;
            padding: 20px;
        }
        h1 {
            margin-bottom: 20px;
        }
        img {
            max-width: 100%;
            height: auto;
            border: 2px solid #333;
            border-radius: 8px;
        }
    </style>
</head>
<body>
    <h1>Gesture Camera Stream</h1>
    <img src="/video_feed" alt="Video Stream">
</body>
</html>
"#;

/// Serve the main page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Liveness endpoint.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Full pipeline status.
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.status())
}

#[derive(Serialize)]
pub struct GestureResponse {
    gesture: Option<GestureLabel>,
    rock_detected: bool,
    paper_detected: bool,
    scissors_detected: bool,
    middle_finger_detected: bool,
    label: String,
}

/// Current gesture and per-gesture flags.
pub async fn get_gesture(State(state): State<AppState>) -> impl IntoResponse {
    let status = state.store.status();
    Json(GestureResponse {
        gesture: status.gesture,
        rock_detected: status.rock_detected,
        paper_detected: status.paper_detected,
        scissors_detected: status.scissors_detected,
        middle_finger_detected: status.middle_finger_detected,
        label: status.label,
    })
}

#[derive(Serialize)]
pub struct FistResponse {
    fist_detected: bool,
    label: String,
}

/// Legacy fist check, kept for existing consumers. Mirrors `rock_detected`.
pub async fn get_fist(State(state): State<AppState>) -> impl IntoResponse {
    let status = state.store.status();
    Json(FistResponse {
        fist_detected: status.rock_detected,
        label: status.label,
    })
}

/// Pending events; reading clears them.
pub async fn drain_events(State(state): State<AppState>) -> Json<Vec<GestureEvent>> {
    Json(state.store.drain_events())
}

/// Decrements the active-clients gauge when a stream response is dropped,
/// however the connection ends.
struct StreamClientGuard;

impl Drop for StreamClientGuard {
    fn drop(&mut self) {
        metrics::stream_client_delta(-1.0);
    }
}

/// MJPEG stream of the latest frame.
///
/// Paced at `stream_fps`; ticks with no frame in the store emit nothing.
/// Frames are encoded after the store copy, outside any lock. Runs until the
/// client disconnects or shutdown is signalled.
pub async fn video_feed(State(state): State<AppState>) -> ApiResult<Response> {
    metrics::stream_client_delta(1.0);
    let guard = StreamClientGuard;
    let quality = state.config.jpeg_quality;
    let interval = state.config.stream_interval();
    let store = state.store;
    let mut shutdown = state.shutdown;

    let stream = async_stream::stream! {
        let _guard = guard;
        let mut ticker = tokio::time::interval(interval);
        // A stalled consumer gets the next frame late, never a burst of
        // back-to-back frames above the target rate
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    debug!("Stream closing on shutdown");
                    break;
                }
                _ = ticker.tick() => {}
            }

            let Some(frame) = store.latest_frame() else {
                continue;
            };
            let jpeg = match encode_jpeg(&frame, quality) {
                Ok(jpeg) => jpeg,
                Err(e) => {
                    warn!(error = %e, "Failed to encode stream frame");
                    continue;
                }
            };

            let mut part = Vec::with_capacity(jpeg.len() + 64);
            part.extend_from_slice(b"--frame\r\n");
            part.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
            part.extend_from_slice(&jpeg);
            part.extend_from_slice(b"\r\n");

            metrics::record_stream_frame();
            yield Ok::<Bytes, std::convert::Infallible>(Bytes::from(part));
        }
    };

    Response::builder()
        .header(
            header::CONTENT_TYPE,
            "multipart/x-mixed-replace; boundary=frame",
        )
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::internal(e.to_string()))
}
