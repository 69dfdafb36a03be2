//! Hand-landmark frame types
//!
//! A frame is an ordered set of exactly 21 points in normalized image
//! coordinates (top-left origin, so smaller y is higher in the image),
//! indexed per the standard anatomical convention: wrist, then four joints
//! per digit from thumb to pinky.

use serde::{Deserialize, Serialize};

/// Number of landmarks per tracked hand
pub const LANDMARK_COUNT: usize = 21;

/// One tracked point on a hand, normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in the image plane (x/y only; depth is ignored
    /// because the tracking engine's z estimate is too noisy to threshold)
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Named landmark indices, anatomical convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

/// One hand's landmarks for a single processed video frame.
///
/// Produced externally once per frame, consumed immediately, not retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    points: Vec<Landmark>,
}

impl LandmarkFrame {
    /// Build a frame from exactly [`LANDMARK_COUNT`] points
    pub fn new(points: Vec<Landmark>) -> crate::Result<Self> {
        if points.len() != LANDMARK_COUNT {
            return Err(crate::Error::Collaborator(format!(
                "landmark frame must contain {} points, got {}",
                LANDMARK_COUNT,
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Look up a point by named landmark
    pub fn point(&self, landmark: HandLandmark) -> Landmark {
        self.points[landmark as usize]
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }
}
