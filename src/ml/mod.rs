//! Trained models backing the non-fallback scoring path.

pub mod knee_in;

pub use knee_in::{KNEE_IN_MODEL_VERSION, KneeInModel, ModelError};
