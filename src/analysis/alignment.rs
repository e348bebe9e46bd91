//! Knee-over-ankle alignment classification in raw detector coordinates.

use serde::{Deserialize, Serialize};

use super::keypoints::{COCO_KEYPOINT_COUNT, Keypoint, joint, present_joint};

/// Horizontal knee/ankle offset below which a side counts as well aligned.
pub const GOOD_ALIGNMENT_MAX_OFFSET: f32 = 20.0;
/// Horizontal knee/ankle offset below which a side counts as moderately aligned.
pub const MODERATE_ALIGNMENT_MAX_OFFSET: f32 = 40.0;

/// Alignment category for one knee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KneeAlignment {
    Good,
    Moderate,
    Poor,
    Unknown,
}

impl KneeAlignment {
    /// Contribution of this side to the composite alignment score.
    pub fn score(&self) -> f32 {
        match self {
            Self::Good => 1.0,
            Self::Moderate => 0.6,
            Self::Poor => 0.2,
            Self::Unknown => 0.5,
        }
    }
}

/// Per-side labels plus the knee/ankle width measurements behind them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentResult {
    pub left_knee_alignment: KneeAlignment,
    pub right_knee_alignment: KneeAlignment,
    pub knee_width: f32,
    pub ankle_width: f32,
    /// `knee_width / ankle_width`, rounded to two decimals.
    pub knee_ankle_ratio: f32,
}

impl AlignmentResult {
    /// Result used when knees or ankles were not detected.
    pub fn unknown() -> Self {
        Self {
            left_knee_alignment: KneeAlignment::Unknown,
            right_knee_alignment: KneeAlignment::Unknown,
            knee_width: 0.0,
            ankle_width: 0.0,
            knee_ankle_ratio: 1.0,
        }
    }

    /// Whether either knee falls in the given category.
    pub fn either_side(&self, alignment: KneeAlignment) -> bool {
        self.left_knee_alignment == alignment || self.right_knee_alignment == alignment
    }
}

impl Default for AlignmentResult {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Classify knee alignment from raw keypoints.
pub fn classify_alignment(keypoints: &[Keypoint]) -> AlignmentResult {
    if keypoints.len() < COCO_KEYPOINT_COUNT {
        return AlignmentResult::unknown();
    }
    let (Some(left_knee), Some(right_knee), Some(left_ankle), Some(right_ankle)) = (
        present_joint(keypoints, joint::LEFT_KNEE),
        present_joint(keypoints, joint::RIGHT_KNEE),
        present_joint(keypoints, joint::LEFT_ANKLE),
        present_joint(keypoints, joint::RIGHT_ANKLE),
    ) else {
        return AlignmentResult::unknown();
    };

    let knee_width = (right_knee.x - left_knee.x).abs();
    let ankle_width = (right_ankle.x - left_ankle.x).abs();
    AlignmentResult {
        left_knee_alignment: evaluate_knee_position(left_knee, left_ankle),
        right_knee_alignment: evaluate_knee_position(right_knee, right_ankle),
        knee_width,
        ankle_width,
        knee_ankle_ratio: knee_ankle_ratio(knee_width, ankle_width),
    }
}

/// Classify one side by the horizontal distance between knee and ankle.
pub fn evaluate_knee_position(knee: &Keypoint, ankle: &Keypoint) -> KneeAlignment {
    let horizontal_diff = (knee.x - ankle.x).abs();
    if horizontal_diff < GOOD_ALIGNMENT_MAX_OFFSET {
        KneeAlignment::Good
    } else if horizontal_diff < MODERATE_ALIGNMENT_MAX_OFFSET {
        KneeAlignment::Moderate
    } else {
        KneeAlignment::Poor
    }
}

// Feet stacked on the same x leave the ratio undefined; keep the neutral default.
fn knee_ankle_ratio(knee_width: f32, ankle_width: f32) -> f32 {
    if ankle_width == 0.0 {
        return 1.0;
    }
    round_to_hundredths(knee_width / ankle_width)
}

fn round_to_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
