//! Shared data models for the GestureCam pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Gesture labels and their wire/display names
//! - Hand landmarks (21-point normalized sets)
//! - Raw video frames
//! - The status snapshot served by the API
//! - Gesture-change events

pub mod event;
pub mod frame;
pub mod gesture;
pub mod landmarks;
pub mod status;

// Re-export common types
pub use event::GestureEvent;
pub use frame::{Frame, PixelFormat};
pub use gesture::GestureLabel;
pub use landmarks::{Finger, Landmark, LandmarkError, LandmarkSet, LANDMARK_COUNT};
pub use status::StatusSnapshot;
