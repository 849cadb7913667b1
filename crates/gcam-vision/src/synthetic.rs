//! Deterministic synthetic camera/detector backend.
//!
//! Stands in for the physical camera and the landmark model in tests and
//! when running the pipeline without hardware (`CAMERA_BACKEND=synthetic`).

use gcam_models::{Frame, Landmark, LandmarkSet, PixelFormat, LANDMARK_COUNT};

use crate::config::CaptureFormat;
use crate::detector::LandmarkDetector;
use crate::error::{VisionError, VisionResult};
use crate::source::{SourceProvider, VideoSource};

/// Generates BGR gradient frames, optionally for a bounded number of reads.
pub struct SyntheticSource {
    width: u32,
    height: u32,
    frames_left: Option<u64>,
    tick: u64,
}

impl SyntheticSource {
    pub fn new(format: &CaptureFormat) -> Self {
        Self {
            width: format.width,
            height: format.height,
            frames_left: None,
            tick: 0,
        }
    }

    /// Source that fails its read after `count` frames, like a camera being
    /// unplugged.
    pub fn with_frame_limit(format: &CaptureFormat, count: u64) -> Self {
        Self {
            frames_left: Some(count),
            ..Self::new(format)
        }
    }
}

impl VideoSource for SyntheticSource {
    fn read_frame(&mut self) -> VisionResult<Frame> {
        if let Some(left) = self.frames_left.as_mut() {
            if *left == 0 {
                return Err(VisionError::ReadFailed);
            }
            *left -= 1;
        }
        self.tick = self.tick.wrapping_add(1);

        // Horizontal gradient that shifts per frame, so consecutive frames
        // differ and motion is visible on the stream
        let shift = (self.tick % 256) as u32;
        let mut data = Vec::with_capacity((self.width * self.height * 3) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let v = ((x + shift) % 256) as u8;
                let w = (y % 256) as u8;
                data.extend_from_slice(&[v, w, 64]);
            }
        }
        Ok(Frame::new(data, self.width, self.height, PixelFormat::Bgr))
    }
}

/// Provider with a fixed set of openable device indices.
pub struct SyntheticProvider {
    devices: Vec<u32>,
}

impl SyntheticProvider {
    pub fn with_devices(devices: &[u32]) -> Self {
        Self {
            devices: devices.to_vec(),
        }
    }
}

impl SourceProvider for SyntheticProvider {
    fn open(&self, index: u32, format: &CaptureFormat) -> VisionResult<Box<dyn VideoSource>> {
        if self.devices.contains(&index) {
            Ok(Box::new(SyntheticSource::new(format)))
        } else {
            Err(VisionError::DeviceOpen(index))
        }
    }
}

/// Detector that replays a fixed script of detection results.
///
/// Non-cycling scripts return `None` once exhausted.
pub struct ScriptedDetector {
    script: Vec<Option<LandmarkSet>>,
    position: usize,
    cycle: bool,
}

impl ScriptedDetector {
    pub fn new(script: Vec<Option<LandmarkSet>>) -> Self {
        Self {
            script,
            position: 0,
            cycle: false,
        }
    }

    /// Replay the script forever, wrapping around at the end.
    pub fn cycling(script: Vec<Option<LandmarkSet>>) -> Self {
        Self {
            cycle: true,
            ..Self::new(script)
        }
    }
}

impl LandmarkDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &Frame) -> Option<LandmarkSet> {
        if self.script.is_empty() {
            return None;
        }
        if self.position >= self.script.len() {
            if !self.cycle {
                return None;
            }
            self.position = 0;
        }
        let result = self.script[self.position].clone();
        self.position += 1;
        result
    }
}

/// Build a landmark set from per-finger `(tip_y, pip_y, mcp_y)` values for
/// index, middle, ring, pinky. All other landmarks sit at (0.5, 0.5).
pub fn hand_pose(fingers: [(f32, f32, f32); 4]) -> LandmarkSet {
    use gcam_models::Finger;

    let mut points = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
    for (finger, (tip_y, pip_y, mcp_y)) in Finger::ALL.into_iter().zip(fingers) {
        let (tip, pip, mcp) = finger.indices();
        points[tip] = Landmark::new(0.5, tip_y);
        points[pip] = Landmark::new(0.5, pip_y);
        points[mcp] = Landmark::new(0.5, mcp_y);
    }
    LandmarkSet::new(points)
}

/// A clean fist (classifies as Rock).
pub fn fist() -> LandmarkSet {
    hand_pose([
        (0.80, 0.70, 0.60),
        (0.80, 0.70, 0.60),
        (0.80, 0.70, 0.60),
        (0.80, 0.70, 0.60),
    ])
}

/// An open hand (classifies as Paper).
pub fn open_hand() -> LandmarkSet {
    hand_pose([
        (0.30, 0.50, 0.70),
        (0.30, 0.50, 0.70),
        (0.30, 0.50, 0.70),
        (0.30, 0.50, 0.70),
    ])
}
