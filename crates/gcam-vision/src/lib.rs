//! Gesture classification and the capture/classification loop.
//!
//! This crate provides:
//! - The pure landmark-to-gesture classifier
//! - `VideoSource`/`SourceProvider` and `LandmarkDetector` seams for the
//!   camera driver and the hand-landmark model
//! - Device probing, classification pacing, frame overlay and JPEG encoding
//! - The long-lived capture & classification loop feeding the shared store
//!   and the event forwarder
//! - A deterministic synthetic backend for development and tests

pub mod capture;
pub mod classifier;
pub mod config;
pub mod detector;
pub mod encode;
pub mod error;
pub mod overlay;
pub mod pacing;
pub mod source;
pub mod synthetic;

pub use capture::CaptureLoop;
pub use config::{CaptureConfig, CaptureFormat, DeviceSelector};
pub use detector::LandmarkDetector;
pub use error::{VisionError, VisionResult};
pub use pacing::{Pacer, PacingPolicy};
pub use source::{open_source, SourceProvider, VideoSource, PROBE_CANDIDATES};

/// Metric names as constants for consistency.
pub mod metric_names {
    pub const FRAMES_CAPTURED_TOTAL: &str = "gcam_frames_captured_total";
    pub const CLASSIFICATIONS_TOTAL: &str = "gcam_classifications_total";
}
