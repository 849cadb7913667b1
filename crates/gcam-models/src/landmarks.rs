//! Hand landmark types.
//!
//! A detector produces exactly 21 normalized 2D points per hand, with fixed
//! anatomical indices (wrist = 0, thumb 1-4, index 5-8, middle 9-12,
//! ring 13-16, pinky 17-20).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of landmarks in a single-hand set.
pub const LANDMARK_COUNT: usize = 21;

/// A single normalized hand landmark, `x`/`y` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Error)]
pub enum LandmarkError {
    #[error("expected {LANDMARK_COUNT} landmarks, got {0}")]
    WrongArity(usize),
}

/// An ordered set of exactly [`LANDMARK_COUNT`] landmarks.
///
/// Immutable once built; indices are anatomical and meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build a set from a slice, rejecting anything but exactly 21 points.
    pub fn from_slice(points: &[Landmark]) -> Result<Self, LandmarkError> {
        let points: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| LandmarkError::WrongArity(points.len()))?;
        Ok(Self { points })
    }

    pub fn point(&self, index: usize) -> Landmark {
        self.points[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.points.iter()
    }
}

impl std::ops::Index<usize> for LandmarkSet {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Landmark {
        &self.points[index]
    }
}

/// The four non-thumb fingers, with their (tip, pip, mcp) landmark indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// Landmark indices as (tip, pip, mcp).
    pub fn indices(&self) -> (usize, usize, usize) {
        match self {
            Finger::Index => (8, 6, 5),
            Finger::Middle => (12, 10, 9),
            Finger::Ring => (16, 14, 13),
            Finger::Pinky => (20, 18, 17),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_arity() {
        let points = vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        assert!(LandmarkSet::from_slice(&points).is_ok());

        let short = vec![Landmark::new(0.5, 0.5); 20];
        assert!(matches!(
            LandmarkSet::from_slice(&short),
            Err(LandmarkError::WrongArity(20))
        ));
    }

    #[test]
    fn test_finger_indices() {
        assert_eq!(Finger::Index.indices(), (8, 6, 5));
        assert_eq!(Finger::Middle.indices(), (12, 10, 9));
        assert_eq!(Finger::Ring.indices(), (16, 14, 13));
        assert_eq!(Finger::Pinky.indices(), (20, 18, 17));
    }
}
