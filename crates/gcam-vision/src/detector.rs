//! Hand-landmark detector seam.

use gcam_models::{Frame, LandmarkSet};

/// A stateful single-hand landmark detection session.
///
/// `detect` receives an RGB frame and returns one ordered 21-point set, or
/// `None` when no hand is found. Absence is not an error; it is the normal
/// "no gesture" signal. Session parameters (model paths, confidence
/// thresholds) belong to the backend implementing this trait.
pub trait LandmarkDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Option<LandmarkSet>;
}
