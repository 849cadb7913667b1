//! API integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tokio::sync::watch;
use tower::ServiceExt;

use gcam_api::{create_router, ApiConfig, AppState};
use gcam_models::{Frame, GestureEvent, GestureLabel, PixelFormat};
use gcam_store::SharedStore;

fn test_app(store: Arc<SharedStore>, config: ApiConfig) -> (Router, watch::Sender<bool>) {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let app = create_router(AppState::new(config, store, shutdown_rx), None);
    (app, shutdown_tx)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _shutdown) = test_app(Arc::new(SharedStore::new()), ApiConfig::default());

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_status_endpoint_reflects_store() {
    let store = Arc::new(SharedStore::new());
    store.update_status(|s| {
        s.apply_gesture(Some(GestureLabel::Rock), "ROCK (FIST)");
        s.frame_count = 42;
        s.fps = 14.5;
    });
    let (app, _shutdown) = test_app(store, ApiConfig::default());

    let response = app.oneshot(get("/api/status")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["gesture"], "rock");
    assert_eq!(json["rock_detected"], true);
    assert_eq!(json["label"], "ROCK (FIST)");
    assert_eq!(json["frame_count"], 42);
    assert_eq!(json["fps"], 14.5);
}

#[tokio::test]
async fn test_gesture_endpoint_flags() {
    let store = Arc::new(SharedStore::new());
    store.update_status(|s| s.apply_gesture(Some(GestureLabel::Paper), "PAPER (OPEN HAND)"));
    let (app, _shutdown) = test_app(store, ApiConfig::default());

    let response = app.oneshot(get("/api/gesture")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["gesture"], "paper");
    assert_eq!(json["paper_detected"], true);
    assert_eq!(json["rock_detected"], false);
    assert_eq!(json["label"], "PAPER (OPEN HAND)");
    // Full-status fields stay off this endpoint
    assert!(json.get("frame_count").is_none());
}

#[tokio::test]
async fn test_fist_endpoint_mirrors_rock() {
    let store = Arc::new(SharedStore::new());
    store.update_status(|s| s.apply_gesture(Some(GestureLabel::Rock), "ROCK (FIST)"));
    let (app, _shutdown) = test_app(store, ApiConfig::default());

    let response = app.oneshot(get("/api/fist")).await.unwrap();

    let json = body_json(response).await;
    assert_eq!(json["fist_detected"], true);
    assert_eq!(json["label"], "ROCK (FIST)");
}

#[tokio::test]
async fn test_events_endpoint_drains() {
    let store = Arc::new(SharedStore::new());
    store.push_event(GestureEvent::gesture_change(GestureLabel::Rock, "Camera 1"));
    store.push_event(GestureEvent::gesture_change(GestureLabel::Paper, "Camera 1"));
    let (app, _shutdown) = test_app(store, ApiConfig::default());

    let response = app.clone().oneshot(get("/events")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["event_type"], "ROCK Detected");
    assert_eq!(json[0]["camera_id"], "Camera 1");

    // Reading cleared them
    let response = app.oneshot(get("/events")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_video_feed_headers() {
    let store = Arc::new(SharedStore::new());
    store.publish_frame(Frame::filled(8, 8, PixelFormat::Bgr, [0, 0, 0]));
    let (app, _shutdown) = test_app(store, ApiConfig::default());

    let response = app.oneshot(get("/video_feed")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "multipart/x-mixed-replace; boundary=frame"
    );
    assert_eq!(response.headers().get("cache-control").unwrap(), "no-cache");
}

#[tokio::test]
async fn test_stream_emits_multipart_jpeg_parts() {
    use futures_util::StreamExt;

    let store = Arc::new(SharedStore::new());
    store.publish_frame(Frame::filled(8, 8, PixelFormat::Bgr, [0, 128, 255]));
    let config = ApiConfig {
        stream_fps: 100,
        ..ApiConfig::default()
    };
    let (app, _shutdown) = test_app(store, config);

    let response = app.oneshot(get("/video_feed")).await.unwrap();
    let mut body = response.into_body().into_data_stream();

    let part = tokio::time::timeout(std::time::Duration::from_secs(1), body.next())
        .await
        .expect("stream should emit a frame")
        .unwrap()
        .unwrap();
    assert!(part.starts_with(b"--frame\r\nContent-Type: image/jpeg\r\n\r\n"));
    // JPEG SOI marker follows the part headers
    let payload = &part[b"--frame\r\nContent-Type: image/jpeg\r\n\r\n".len()..];
    assert_eq!(&payload[..2], &[0xff, 0xd8]);
}

#[tokio::test]
async fn test_stream_is_silent_without_frames() {
    use futures_util::StreamExt;

    let (app, _shutdown) = test_app(Arc::new(SharedStore::new()), ApiConfig::default());

    // The response itself arrives immediately even though no frame exists
    let response = app.oneshot(get("/video_feed")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut body = response.into_body().into_data_stream();
    let first = tokio::time::timeout(std::time::Duration::from_millis(200), body.next()).await;
    assert!(first.is_err(), "empty store must not produce stream parts");
}

#[tokio::test]
async fn test_stream_pacing_bounds_emission_rate() {
    use futures_util::StreamExt;
    use std::time::Instant;

    let store = Arc::new(SharedStore::new());
    store.publish_frame(Frame::filled(8, 8, PixelFormat::Rgb, [10, 10, 10]));
    // 5 fps: parts at least ~200ms apart regardless of publish rate
    let config = ApiConfig {
        stream_fps: 5,
        ..ApiConfig::default()
    };
    let (app, _shutdown) = test_app(store, config);

    let response = app.oneshot(get("/video_feed")).await.unwrap();
    let mut body = response.into_body().into_data_stream();

    let start = Instant::now();
    for _ in 0..3 {
        tokio::time::timeout(std::time::Duration::from_secs(2), body.next())
            .await
            .expect("stream should keep emitting")
            .unwrap()
            .unwrap();
    }
    // First part is immediate; the next two are paced
    assert!(start.elapsed() >= std::time::Duration::from_millis(350));
}

#[tokio::test]
async fn test_stream_stays_paced_after_consumer_stall() {
    use futures_util::StreamExt;
    use std::time::{Duration, Instant};

    let store = Arc::new(SharedStore::new());
    store.publish_frame(Frame::filled(8, 8, PixelFormat::Rgb, [1, 2, 3]));
    // 10 fps: parts at least ~100ms apart
    let config = ApiConfig {
        stream_fps: 10,
        ..ApiConfig::default()
    };
    let (app, _shutdown) = test_app(store, config);

    let response = app.oneshot(get("/video_feed")).await.unwrap();
    let mut body = response.into_body().into_data_stream();

    // Let the stream start, then stall the consumer long enough for many
    // ticks to pass unobserved
    body.next().await.unwrap().unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    // The first post-stall part may arrive at once; after it the pacing
    // must hold, with no burst of queued-up frames
    let mut last = Instant::now();
    let mut gaps = Vec::new();
    for i in 0..4 {
        tokio::time::timeout(Duration::from_secs(2), body.next())
            .await
            .expect("stream should keep emitting")
            .unwrap()
            .unwrap();
        let now = Instant::now();
        if i > 0 {
            gaps.push(now - last);
        }
        last = now;
    }
    assert!(
        gaps.iter().all(|g| *g >= Duration::from_millis(90)),
        "stream emitted faster than target rate after stall: gaps={gaps:?}"
    );
}

#[tokio::test]
async fn test_index_embeds_stream() {
    let (app, _shutdown) = test_app(Arc::new(SharedStore::new()), ApiConfig::default());

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("/video_feed"));
}

#[tokio::test]
async fn test_api_routes_are_rate_limited() {
    let config = ApiConfig {
        rate_limit_rps: 1,
        ..ApiConfig::default()
    };
    let (app, _shutdown) = test_app(Arc::new(SharedStore::new()), config);

    let request = |_| {
        Request::builder()
            .uri("/api/status")
            .header("X-Forwarded-For", "192.168.1.100")
            .body(Body::empty())
            .unwrap()
    };

    let first = app.clone().oneshot(request(0)).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.oneshot(request(1)).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_events_are_not_rate_limited() {
    let config = ApiConfig {
        rate_limit_rps: 1,
        ..ApiConfig::default()
    };
    let (app, _shutdown) = test_app(Arc::new(SharedStore::new()), config);

    for _ in 0..5 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/events")
                    .header("X-Forwarded-For", "192.168.1.101")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_cors_headers() {
    let (app, _shutdown) = test_app(Arc::new(SharedStore::new()), ApiConfig::default());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("Origin", "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}
