//! Scoring backends selected by the engine's fallback policy.
//!
//! The model backend runs the trained knee-in classifier through the full
//! scoring pipeline. The heuristic backend returns canned, internally
//! consistent scenarios so the engine always has an answer when no model is
//! available.

use std::path::PathBuf;

use thiserror::Error;

use crate::analysis::{ExerciseType, FeatureVector, Keypoint};
use crate::results::FrameAssessment;

mod heuristic;
mod model;

pub use heuristic::{HeuristicBackend, Scenario, ScenarioPicker, default_scenarios};
pub use model::ModelBackend;

/// Failures on a backend's scoring path.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend has no loaded model.
    #[error("Scoring backend is not initialized")]
    NotInitialized,
    /// The model file could not be loaded.
    #[error("Failed to load model from {path}: {source}")]
    ModelLoad {
        path: PathBuf,
        source: crate::ml::ModelError,
    },
    /// An in-memory model failed validation.
    #[error("Invalid model: {0}")]
    InvalidModel(String),
    /// No model source was configured.
    #[error("No model path configured")]
    NoModelPath,
    /// The model produced no usable output.
    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Strategy producing a frame assessment from pose data.
pub trait ScoringBackend: Send {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn is_ready(&self) -> bool;

    /// Load whatever resources the backend needs.
    fn initialize(&mut self) -> Result<(), BackendError>;

    /// Score one frame.
    fn assess(
        &mut self,
        features: &FeatureVector,
        keypoints: &[Keypoint],
        exercise: ExerciseType,
    ) -> Result<FrameAssessment, BackendError>;

    /// Release loaded resources; `initialize` must be called again before reuse.
    fn dispose(&mut self);
}
