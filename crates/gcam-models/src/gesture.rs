//! Gesture labels.

use serde::{Deserialize, Serialize};

/// A recognized hand gesture.
///
/// "No gesture" is represented as `Option::<GestureLabel>::None` rather than
/// a variant, so the type only ever names a positive classification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureLabel {
    /// Fist, all four fingers folded
    Rock,
    /// Open hand, all four fingers extended
    Paper,
    /// Index and middle extended, ring and pinky folded
    Scissors,
    /// Only the middle finger extended
    MiddleFinger,
}

impl GestureLabel {
    /// Wire name used in JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::Rock => "rock",
            GestureLabel::Paper => "paper",
            GestureLabel::Scissors => "scissors",
            GestureLabel::MiddleFinger => "middle_finger",
        }
    }

    /// Fixed uppercase text drawn onto the video frame.
    pub fn display_label(&self) -> &'static str {
        match self {
            GestureLabel::Rock => "ROCK (FIST)",
            GestureLabel::Paper => "PAPER (OPEN HAND)",
            GestureLabel::Scissors => "SCISSORS (PEACE)",
            GestureLabel::MiddleFinger => "MIDDLE FINGER",
        }
    }

    /// Short uppercase name used in event types ("ROCK Detected").
    pub fn event_name(&self) -> &'static str {
        match self {
            GestureLabel::Rock => "ROCK",
            GestureLabel::Paper => "PAPER",
            GestureLabel::Scissors => "SCISSORS",
            GestureLabel::MiddleFinger => "MIDDLE FINGER",
        }
    }

    /// Human-readable description used in events.
    pub fn event_description(&self) -> &'static str {
        match self {
            GestureLabel::Rock => "Fist gesture detected",
            GestureLabel::Paper => "Open hand gesture detected",
            GestureLabel::Scissors => "Peace sign gesture detected",
            GestureLabel::MiddleFinger => "Middle finger gesture detected",
        }
    }
}

impl std::fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
