//! Capture configuration.

use std::time::Duration;

use crate::pacing::PacingPolicy;

/// Which camera device to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceSelector {
    /// An explicit device index
    Index(u32),
    /// Probe the candidate indices in order, first success wins
    Probe,
}

/// Format requested from the video source.
#[derive(Debug, Clone, Copy)]
pub struct CaptureFormat {
    pub width: u32,
    pub height: u32,
    /// Requested capture rate; also the frame count of one fps window
    pub target_fps: u32,
}

impl Default for CaptureFormat {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            target_fps: 15,
        }
    }
}

/// Capture & classification loop configuration.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    pub device: DeviceSelector,
    pub format: CaptureFormat,
    /// Classification pacing strategy
    pub pacing: PacingPolicy,
    /// Source id stamped onto events
    pub camera_id: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device: DeviceSelector::Probe,
            format: CaptureFormat::default(),
            pacing: PacingPolicy::default(),
            camera_id: "Camera 1".to_string(),
        }
    }
}

impl CaptureConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let device = std::env::var("CAMERA_INDEX")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|i| *i >= 0)
            .map(|i| DeviceSelector::Index(i as u32))
            .unwrap_or(DeviceSelector::Probe);

        let format = CaptureFormat {
            width: std::env::var("CAPTURE_WIDTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(640),
            height: std::env::var("CAPTURE_HEIGHT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(480),
            target_fps: std::env::var("CAPTURE_FPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
        };

        Self {
            device,
            format,
            pacing: pacing_from_env(),
            camera_id: std::env::var("CAMERA_ID").unwrap_or_else(|_| "Camera 1".to_string()),
        }
    }
}

/// Pacing policy selection: `PACING_POLICY=interval` (default) gates on
/// elapsed wall time, `PACING_POLICY=stride` gates on frame count.
fn pacing_from_env() -> PacingPolicy {
    let policy = std::env::var("PACING_POLICY").unwrap_or_else(|_| "interval".to_string());
    match policy.to_lowercase().as_str() {
        "stride" => PacingPolicy::EveryNthFrame(
            std::env::var("PROCESS_EVERY_N")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
        ),
        _ => PacingPolicy::Interval(Duration::from_secs_f64(
            std::env::var("PROCESS_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.7),
        )),
    }
}
