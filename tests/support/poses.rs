use formscope::Keypoint;
use formscope::analysis::joint;

/// Full-body pose with every joint confidently detected around a fixed stance.
pub fn standing_pose() -> Vec<Keypoint> {
    let mut keypoints: Vec<Keypoint> = (0..17)
        .map(|i| Keypoint::new(200.0, 50.0 + i as f32 * 20.0, 0.95))
        .collect();
    keypoints[joint::LEFT_HIP] = Keypoint::new(170.0, 250.0, 0.95);
    keypoints[joint::RIGHT_HIP] = Keypoint::new(230.0, 250.0, 0.95);
    set_lower_body(&mut keypoints, 165.0, 160.0, 235.0, 240.0);
    keypoints
}

/// Overwrite knee and ankle x positions, keeping them confidently detected.
pub fn set_lower_body(
    keypoints: &mut [Keypoint],
    left_knee: f32,
    left_ankle: f32,
    right_knee: f32,
    right_ankle: f32,
) {
    keypoints[joint::LEFT_KNEE] = Keypoint::new(left_knee, 330.0, 0.95);
    keypoints[joint::RIGHT_KNEE] = Keypoint::new(right_knee, 330.0, 0.95);
    keypoints[joint::LEFT_ANKLE] = Keypoint::new(left_ankle, 420.0, 0.95);
    keypoints[joint::RIGHT_ANKLE] = Keypoint::new(right_ankle, 420.0, 0.95);
}
