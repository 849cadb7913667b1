//! The status snapshot served by the API.

use serde::{Deserialize, Serialize};

use crate::gesture::GestureLabel;

/// Point-in-time view of the pipeline, overwritten whole on each update.
///
/// The per-gesture boolean flags are derived from `gesture` and kept for
/// wire compatibility with existing consumers. `fps` is refreshed only on
/// fps-window rollovers and is intentionally stale in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Current gesture, `null` when no hand/gesture is present
    pub gesture: Option<GestureLabel>,
    pub rock_detected: bool,
    pub paper_detected: bool,
    pub scissors_detected: bool,
    pub middle_finger_detected: bool,
    /// Display text currently drawn on the frame
    pub label: String,
    /// Total frames read since the loop started
    pub frame_count: u64,
    /// Measured capture rate over the last fps window
    pub fps: f64,
    /// Unix timestamp (seconds) of the last update
    pub timestamp: f64,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            gesture: None,
            rock_detected: false,
            paper_detected: false,
            scissors_detected: false,
            middle_finger_detected: false,
            label: String::new(),
            frame_count: 0,
            fps: 0.0,
            timestamp: 0.0,
        }
    }
}

impl StatusSnapshot {
    /// Set the gesture and rederive all per-gesture flags.
    pub fn apply_gesture(&mut self, gesture: Option<GestureLabel>, label: &str) {
        self.gesture = gesture;
        self.rock_detected = gesture == Some(GestureLabel::Rock);
        self.paper_detected = gesture == Some(GestureLabel::Paper);
        self.scissors_detected = gesture == Some(GestureLabel::Scissors);
        self.middle_finger_detected = gesture == Some(GestureLabel::MiddleFinger);
        if label != self.label {
            self.label = label.to_string();
        }
    }
}
