//! Movement-analysis scoring engine.
//!
//! Turns per-frame pose keypoints into knee-alignment scores, corrective
//! feedback and per-session summaries.
/// Keypoint normalization, alignment classification, scoring and feedback.
pub mod analysis;
/// Application directory helpers.
pub mod app_dirs;
/// Model and heuristic scoring backends.
pub mod backend;
/// TOML engine configuration.
pub mod config;
/// Frame analysis with model-or-heuristic fallback.
pub mod engine;
/// Tracing subscriber setup.
pub mod logging;
/// Trained model formats.
pub mod ml;
/// Result records.
pub mod results;
/// Session history and summaries.
pub mod session;

pub use analysis::{ExerciseType, Keypoint};
pub use engine::MotionEngine;
pub use results::{AnalysisResult, SessionSummary};
pub use session::SessionAggregator;
