//! Hip-centred feature vector for the learned scoring path.

use super::keypoints::{Keypoint, joint, present_joint};

/// Number of joints encoded in the feature vector.
pub const FEATURE_JOINT_COUNT: usize = 34;
/// Number of `f32` values in a normalized feature vector.
pub const FEATURE_VECTOR_LEN: usize = FEATURE_JOINT_COUNT * 2;
/// Divisor applied to hip-relative coordinates.
pub const FEATURE_SCALE: f32 = 100.0;

/// Fixed-length, hip-relative joint coordinates.
pub type FeatureVector = [f32; FEATURE_VECTOR_LEN];

/// Map raw keypoints into a pose-invariant feature vector.
///
/// Each joint is emitted as `(x, y)` relative to the hip midpoint and divided
/// by [`FEATURE_SCALE`]. Absent joints emit `(0, 0)`, so the output length never
/// depends on how complete the detection was.
pub fn normalize(keypoints: &[Keypoint]) -> FeatureVector {
    let mut out = [0.0f32; FEATURE_VECTOR_LEN];
    if keypoints.is_empty() {
        return out;
    }

    let (center_x, center_y) = hip_center(keypoints);
    for (index, slot) in out.chunks_exact_mut(2).enumerate() {
        if let Some(keypoint) = present_joint(keypoints, index) {
            slot[0] = (keypoint.x - center_x) / FEATURE_SCALE;
            slot[1] = (keypoint.y - center_y) / FEATURE_SCALE;
        }
    }
    out
}

/// Midpoint of the two hips; an absent hip counts as the origin.
fn hip_center(keypoints: &[Keypoint]) -> (f32, f32) {
    let coords = |index: usize| {
        present_joint(keypoints, index)
            .map(|keypoint| (keypoint.x, keypoint.y))
            .unwrap_or((0.0, 0.0))
    };
    let (left_x, left_y) = coords(joint::LEFT_HIP);
    let (right_x, right_y) = coords(joint::RIGHT_HIP);
    ((left_x + right_x) / 2.0, (left_y + right_y) / 2.0)
}
