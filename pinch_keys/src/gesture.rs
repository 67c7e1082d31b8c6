//! Hand observations and the pinch classifier.
//!
//! A [`HandObservation`] is one detected hand for one frame: the 21 landmarks
//! of the MediaPipe hand model in normalized image coordinates.  Only the
//! index fingertip and the thumb tip drive the keyboard; the rest are kept
//! for the skeleton overlay.

use crate::geometry::NormPoint;

/// Landmark indices (MediaPipe hand model ordering).
pub mod landmarks {
    pub const WRIST:             usize = 0;
    pub const THUMB_CMC:         usize = 1;
    pub const THUMB_MCP:         usize = 2;
    pub const THUMB_IP:          usize = 3;
    pub const THUMB_TIP:         usize = 4;
    pub const INDEX_FINGER_MCP:  usize = 5;
    pub const INDEX_FINGER_PIP:  usize = 6;
    pub const INDEX_FINGER_DIP:  usize = 7;
    pub const INDEX_FINGER_TIP:  usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP:   usize = 13;
    pub const RING_FINGER_PIP:   usize = 14;
    pub const RING_FINGER_DIP:   usize = 15;
    pub const RING_FINGER_TIP:   usize = 16;
    pub const PINKY_MCP:         usize = 17;
    pub const PINKY_PIP:         usize = 18;
    pub const PINKY_DIP:         usize = 19;
    pub const PINKY_TIP:         usize = 20;
}

pub const LANDMARK_COUNT: usize = 21;

/// Fingertip-to-thumb distance (normalized) below which a hand is pinching.
pub const PINCH_THRESHOLD: f32 = 0.04;

/// Bones of the hand model, as landmark index pairs.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (0, 17), (17, 18), (18, 19), (19, 20),
];

// ════════════════════════════════════════════════════════════════════════════
// HandObservation
// ════════════════════════════════════════════════════════════════════════════

/// One detected hand in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    landmarks: [NormPoint; LANDMARK_COUNT],
}

impl HandObservation {
    pub fn new(landmarks: [NormPoint; LANDMARK_COUNT]) -> Self {
        HandObservation { landmarks }
    }

    /// Build from a detector's landmark list.  Returns `None` unless exactly
    /// [`LANDMARK_COUNT`] points are given.
    pub fn from_slice(points: &[NormPoint]) -> Option<Self> {
        let landmarks: [NormPoint; LANDMARK_COUNT] = points.try_into().ok()?;
        Some(HandObservation { landmarks })
    }

    /// A hand reduced to its two active tips.  Every other landmark sits on
    /// the index fingertip.  Used by the pointer simulator and in tests.
    pub fn from_tips(index_tip: NormPoint, thumb_tip: NormPoint) -> Self {
        let mut points = [index_tip; LANDMARK_COUNT];
        points[landmarks::THUMB_TIP] = thumb_tip;
        HandObservation { landmarks: points }
    }

    pub fn landmarks(&self) -> &[NormPoint; LANDMARK_COUNT] { &self.landmarks }

    pub fn index_tip(&self) -> NormPoint { self.landmarks[landmarks::INDEX_FINGER_TIP] }
    pub fn thumb_tip(&self) -> NormPoint { self.landmarks[landmarks::THUMB_TIP] }

    /// Distance between the index fingertip and the thumb tip.
    pub fn pinch_distance(&self) -> f32 {
        self.index_tip().distance(self.thumb_tip())
    }

    /// The same hand seen in a horizontally flipped image.
    pub fn mirrored(&self) -> Self {
        HandObservation { landmarks: self.landmarks.map(NormPoint::mirrored) }
    }
}

/// Single-frame pinch decision: strictly closer than `threshold`.
pub fn is_pinching(hand: &HandObservation, threshold: f32) -> bool {
    hand.pinch_distance() < threshold
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
