//! Keypoint records supplied by the external pose detector.

use serde::{Deserialize, Serialize};

/// Confidence at or below this value marks a joint as absent.
pub const MIN_KEYPOINT_CONFIDENCE: f32 = 0.5;

/// Minimum number of entries a COCO-style pose must carry for the lower-limb joints to exist.
pub const COCO_KEYPOINT_COUNT: usize = 17;

/// COCO joint indices used by the engine.
pub mod joint {
    pub const NOSE: usize = 0;
    pub const LEFT_SHOULDER: usize = 5;
    pub const RIGHT_SHOULDER: usize = 6;
    pub const LEFT_HIP: usize = 11;
    pub const RIGHT_HIP: usize = 12;
    pub const LEFT_KNEE: usize = 13;
    pub const RIGHT_KNEE: usize = 14;
    pub const LEFT_ANKLE: usize = 15;
    pub const RIGHT_ANKLE: usize = 16;
}

/// One estimated 2D joint position with detector confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    /// Detection confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self { x, y, confidence }
    }

    /// Whether the detector was confident enough for this joint to count.
    pub fn is_present(&self) -> bool {
        self.confidence > MIN_KEYPOINT_CONFIDENCE
    }
}

/// Look up a joint, treating out-of-range and low-confidence entries as absent.
pub fn present_joint(keypoints: &[Keypoint], index: usize) -> Option<&Keypoint> {
    keypoints.get(index).filter(|keypoint| keypoint.is_present())
}
