//! Landmark-to-gesture classification.
//!
//! Pure and deterministic: a 21-point landmark set plus the frame dimensions
//! in, a gesture label plus its display text out.
//!
//! Each finger gets a **curl** value from its tip/pip/mcp y-coordinates in
//! pixel space: `(tip_y - pip_y) / max(|mcp_y - pip_y|, 1)`. More negative
//! means more extended, higher means more curled. The metric is invariant
//! under translation and, because both numerator and denominator scale with
//! the hand, under scale (as long as the pip-mcp span stays above the 1px
//! clamp).
//!
//! The predicates overlap, so evaluation order matters and first match wins:
//! MiddleFinger, then Rock, then Scissors, then Paper. The order and the
//! thresholds are fixed for behavior parity with the deployed classifier,
//! including its known quirks (a fist with exactly two fingers past the
//! middle-curl margin classifies as MiddleFinger; see `is_middle_finger`).

use gcam_models::{Finger, GestureLabel, LandmarkSet};

/// A finger with curl below this is clearly extended.
const EXTENDED_MAX_CURL: f32 = 0.3;
/// The middle finger only has to be loosely extended for MiddleFinger.
const MIDDLE_EXTENDED_MAX_CURL: f32 = 0.6;
/// How much more curled another finger must be than the middle to count.
const FOLD_MARGIN: f32 = 0.1;
/// Ring / pinky fold thresholds for Scissors.
const RING_FOLDED_MIN_CURL: f32 = 0.5;
const PINKY_FOLDED_MIN_CURL: f32 = 0.4;
/// Fist tolerance: tip may sit up to this fraction of the frame above pip.
const FIST_TIP_TOLERANCE: f32 = 0.02;

/// Classify one landmark set.
///
/// Returns the gesture (or `None`) and the fixed uppercase display text
/// (empty when no gesture matched).
pub fn classify(
    landmarks: &LandmarkSet,
    frame_height: u32,
    _frame_width: u32,
) -> (Option<GestureLabel>, &'static str) {
    let h = frame_height as f32;

    let label = if is_middle_finger(landmarks, h) {
        Some(GestureLabel::MiddleFinger)
    } else if is_fist(landmarks, h) {
        Some(GestureLabel::Rock)
    } else if is_scissors(landmarks, h) {
        Some(GestureLabel::Scissors)
    } else if is_paper(landmarks, h) {
        Some(GestureLabel::Paper)
    } else {
        None
    };

    (label, label.map_or("", |l| l.display_label()))
}

/// Relative fold of a finger, in pixel-scaled coordinates.
pub fn finger_curl(landmarks: &LandmarkSet, finger: Finger, h: f32) -> f32 {
    let (tip, pip, mcp) = finger.indices();
    let tip_y = landmarks[tip].y * h;
    let pip_y = landmarks[pip].y * h;
    let mcp_y = landmarks[mcp].y * h;
    (tip_y - pip_y) / (mcp_y - pip_y).abs().max(1.0)
}

/// MiddleFinger: middle loosely extended, and at least two of the other
/// non-thumb fingers clearly more curled than the middle.
fn is_middle_finger(landmarks: &LandmarkSet, h: f32) -> bool {
    let middle = finger_curl(landmarks, Finger::Middle, h);
    if middle >= MIDDLE_EXTENDED_MAX_CURL {
        return false;
    }

    let more_folded = [Finger::Index, Finger::Ring, Finger::Pinky]
        .iter()
        .filter(|&&f| finger_curl(landmarks, f, h) > middle + FOLD_MARGIN)
        .count();
    more_folded >= 2
}

/// Rock: all four fingers folded, tip at or below pip within tolerance.
fn is_fist(landmarks: &LandmarkSet, h: f32) -> bool {
    Finger::ALL.iter().all(|f| {
        let (tip, pip, _) = f.indices();
        let tip_y = landmarks[tip].y * h;
        let pip_y = landmarks[pip].y * h;
        tip_y > pip_y - h * FIST_TIP_TOLERANCE
    })
}

/// Scissors: index and middle clearly extended, ring and pinky clearly folded.
fn is_scissors(landmarks: &LandmarkSet, h: f32) -> bool {
    finger_curl(landmarks, Finger::Index, h) < EXTENDED_MAX_CURL
        && finger_curl(landmarks, Finger::Middle, h) < EXTENDED_MAX_CURL
        && finger_curl(landmarks, Finger::Ring, h) > RING_FOLDED_MIN_CURL
        && finger_curl(landmarks, Finger::Pinky, h) > PINKY_FOLDED_MIN_CURL
}

/// Paper: all four fingers clearly extended.
fn is_paper(landmarks: &LandmarkSet, h: f32) -> bool {
    Finger::ALL
        .iter()
        .all(|&f| finger_curl(landmarks, f, h) < EXTENDED_MAX_CURL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::hand_pose;

    const H: u32 = 480;
    const W: u32 = 640;

    #[test]
    fn test_fist_classifies_as_rock() {
        // All tips well below pips
        let hand = hand_pose([
            (0.80, 0.70, 0.60),
            (0.80, 0.70, 0.60),
            (0.80, 0.70, 0.60),
            (0.80, 0.70, 0.60),
        ]);
        // Every curl is 1.0, so the middle is not extended and the
        // MiddleFinger precedence check cannot capture this set
        assert_eq!(
            classify(&hand, H, W),
            (Some(GestureLabel::Rock), "ROCK (FIST)")
        );
    }

    #[test]
    fn test_fist_tolerance_boundary() {
        // Tips exactly 0.02*h above pips: not folded (strict inequality)
        let hand = hand_pose([
            (0.68, 0.70, 0.40),
            (0.68, 0.70, 0.40),
            (0.68, 0.70, 0.40),
            (0.68, 0.70, 0.40),
        ]);
        let (label, _) = classify(&hand, H, W);
        assert_ne!(label, Some(GestureLabel::Rock));

        // Just inside the tolerance: folded
        let hand = hand_pose([
            (0.69, 0.70, 0.40),
            (0.69, 0.70, 0.40),
            (0.69, 0.70, 0.40),
            (0.69, 0.70, 0.40),
        ]);
        assert_eq!(classify(&hand, H, W).0, Some(GestureLabel::Rock));
    }

    #[test]
    fn test_middle_finger_takes_precedence_over_rock() {
        // Folded fist shape, but the middle tip sits just at its pip
        // (curl 0.0 < 0.6) while index/ring/pinky curls are 1.0: the
        // precedence check fires first and the fist reads as MiddleFinger.
        let hand = hand_pose([
            (0.80, 0.70, 0.60),
            (0.70, 0.70, 0.60),
            (0.80, 0.70, 0.60),
            (0.80, 0.70, 0.60),
        ]);
        assert!(is_fist(&hand, H as f32));
        assert_eq!(classify(&hand, H, W).0, Some(GestureLabel::MiddleFinger));
    }

    #[test]
    fn test_open_hand_classifies_as_paper() {
        let hand = hand_pose([
            (0.30, 0.50, 0.70),
            (0.30, 0.50, 0.70),
            (0.30, 0.50, 0.70),
            (0.30, 0.50, 0.70),
        ]);
        assert_eq!(
            classify(&hand, H, W),
            (Some(GestureLabel::Paper), "PAPER (OPEN HAND)")
        );
    }

    #[test]
    fn test_single_curled_finger_breaks_paper() {
        // Index curl is (0.55-0.50)/|0.70-0.50| = 0.25 < 0.3 -> still paper
        let hand = hand_pose([
            (0.55, 0.50, 0.70),
            (0.30, 0.50, 0.70),
            (0.30, 0.50, 0.70),
            (0.30, 0.50, 0.70),
        ]);
        assert_eq!(classify(&hand, H, W).0, Some(GestureLabel::Paper));

        // Index curl (0.57-0.50)/0.20 = 0.35 >= 0.3 -> no finger group matches
        let hand = hand_pose([
            (0.57, 0.50, 0.70),
            (0.30, 0.50, 0.70),
            (0.30, 0.50, 0.70),
            (0.30, 0.50, 0.70),
        ]);
        assert_eq!(classify(&hand, H, W), (None, ""));
    }

    #[test]
    fn test_scissors_predicate_holds_under_translation_and_scale() {
        let scissors = |offset: f32, scale: f32| {
            hand_pose([
                (0.30 * scale + offset, 0.50 * scale + offset, 0.70 * scale + offset),
                (0.30 * scale + offset, 0.50 * scale + offset, 0.70 * scale + offset),
                (0.80 * scale + offset, 0.60 * scale + offset, 0.50 * scale + offset),
                (0.80 * scale + offset, 0.60 * scale + offset, 0.50 * scale + offset),
            ])
        };

        for (offset, scale) in [(0.0, 1.0), (0.1, 0.8), (-0.2, 0.5)] {
            let hand = scissors(offset, scale);
            assert!(is_scissors(&hand, H as f32), "offset={offset} scale={scale}");
            assert!(!is_fist(&hand, H as f32));
            assert!(!is_paper(&hand, H as f32));
        }
    }

    #[test]
    fn test_scissors_shape_is_captured_by_middle_finger_precedence() {
        // Ring and pinky are far more curled than the extended middle, so
        // the MiddleFinger predicate also matches a scissors hand and, being
        // checked first, wins. Preserved quirk of the deployed classifier.
        let hand = hand_pose([
            (0.30, 0.50, 0.70),
            (0.30, 0.50, 0.70),
            (0.80, 0.60, 0.50),
            (0.80, 0.60, 0.50),
        ]);
        assert!(is_scissors(&hand, H as f32));
        assert_eq!(classify(&hand, H, W).0, Some(GestureLabel::MiddleFinger));
    }

    #[test]
    fn test_no_match_returns_none_with_empty_text() {
        // Half-open hand: index/middle moderately curled, ring/pinky open
        let hand = hand_pose([
            (0.60, 0.50, 0.70),
            (0.60, 0.50, 0.70),
            (0.30, 0.50, 0.70),
            (0.30, 0.50, 0.70),
        ]);
        assert_eq!(classify(&hand, H, W), (None, ""));
    }
}
