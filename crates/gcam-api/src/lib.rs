//! Axum HTTP server for the gesture camera pipeline.
//!
//! This crate provides:
//! - The MJPEG live stream (`/video_feed`)
//! - Gesture status and event JSON endpoints
//! - Rate limiting and CORS
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
