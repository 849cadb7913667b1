//! Gesture-change events.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::gesture::GestureLabel;

/// An edge-triggered gesture-change event, immutable once created.
///
/// The source-id field is serialized as `camera_id` for compatibility with
/// the existing backend consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub event_type: String,
    pub description: String,
    pub camera_id: String,
    /// Unix timestamp in seconds
    pub timestamp: f64,
}

impl GestureEvent {
    /// Build the event recorded when the latched gesture changes.
    pub fn gesture_change(label: GestureLabel, camera_id: &str) -> Self {
        Self {
            event_type: format!("{} Detected", label.event_name()),
            description: label.event_description().to_string(),
            camera_id: camera_id.to_string(),
            timestamp: Utc::now().timestamp_millis() as f64 / 1000.0,
        }
    }
}
