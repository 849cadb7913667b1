//! Axum API server binary.
//!
//! Wires together the shared store, the capture & classification loop, the
//! event forwarder, and the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gcam_api::{create_router, metrics, ApiConfig, AppState};
use gcam_forwarder::{EventForwarder, ForwarderConfig};
use gcam_store::SharedStore;
use gcam_vision::synthetic::{fist, open_hand, ScriptedDetector, SyntheticProvider};
use gcam_vision::{CaptureConfig, CaptureLoop, LandmarkDetector, SourceProvider, VisionError};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("gcam=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting gcam-api");

    // Load configuration
    let api_config = ApiConfig::from_env();
    let capture_config = CaptureConfig::from_env();
    let forwarder_config = ForwarderConfig::from_env();
    info!("API config: host={}, port={}", api_config.host, api_config.port);

    let store = Arc::new(SharedStore::new());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Start the event forwarder worker pool
    let forwarder = match EventForwarder::spawn(forwarder_config, shutdown_rx.clone()) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to start event forwarder: {}", e);
            std::process::exit(1);
        }
    };

    // Open the camera backend and start the capture loop on its own thread
    let capture = match build_backend().and_then(|(provider, detector)| {
        CaptureLoop::open(
            &capture_config,
            provider.as_ref(),
            detector,
            Arc::clone(&store),
            forwarder,
            shutdown_rx.clone(),
        )
    }) {
        Ok(capture) => capture,
        Err(e) => {
            error!("Failed to start capture: {}", e);
            std::process::exit(1);
        }
    };
    let capture_thread = std::thread::Builder::new()
        .name("capture".into())
        .spawn(move || capture.run())
        .expect("Failed to spawn capture thread");

    // Initialize metrics
    let metrics_handle = if api_config.metrics_enabled {
        info!("Prometheus metrics enabled at /metrics");
        Some(metrics::init_metrics())
    } else {
        None
    };

    // Create router
    let state = AppState::new(api_config.clone(), store, shutdown_rx);
    let app = create_router(state, metrics_handle);

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", api_config.host, api_config.port)
        .parse()
        .expect("Invalid bind address");

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await
        .unwrap();

    // Shutdown was already broadcast, so the loop is on its way out
    if capture_thread.join().is_err() {
        error!("Capture thread panicked");
    }

    info!("Server shutdown complete");
}

/// Select the camera/detector backend.
///
/// Only the synthetic backend ships in-tree; physical camera and landmark
/// model backends plug in through the `SourceProvider` and `LandmarkDetector`
/// traits.
fn build_backend() -> Result<(Box<dyn SourceProvider>, Box<dyn LandmarkDetector>), VisionError> {
    let backend = std::env::var("CAMERA_BACKEND").unwrap_or_else(|_| "synthetic".to_string());
    match backend.as_str() {
        "synthetic" => {
            let provider = Box::new(SyntheticProvider::with_devices(&[0]));
            // Cycle through recognizable poses so the stream and the event
            // feed have something to show
            let detector = Box::new(ScriptedDetector::cycling(vec![
                Some(fist()),
                None,
                Some(open_hand()),
                None,
            ]));
            Ok((provider, detector))
        }
        other => Err(VisionError::UnknownBackend(other.to_string())),
    }
}

/// Resolves on CTRL+C and broadcasts shutdown to the capture loop, the
/// forwarder workers, and open stream responses. Axum stops accepting new
/// connections once this resolves.
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    info!("Received shutdown signal");
    let _ = shutdown_tx.send(true);
}
