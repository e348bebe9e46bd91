//! Per-frame movement analysis (normalization, alignment, scoring, feedback).

pub mod alignment;
pub mod feedback;
pub mod keypoints;
pub mod normalize;
pub mod scoring;

pub use alignment::{AlignmentResult, KneeAlignment, classify_alignment, evaluate_knee_position};
pub use feedback::{ExerciseType, FeedbackLevel, FeedbackResult, generate_feedback};
pub use keypoints::{Keypoint, joint};
pub use normalize::{FEATURE_VECTOR_LEN, FeatureVector, normalize};
pub use scoring::{compute_overall_score, to_percent};
