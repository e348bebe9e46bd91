//! Knee-in-toe-out probability model over normalized pose features.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::FEATURE_VECTOR_LEN;

/// Current serialized model format version.
pub const KNEE_IN_MODEL_VERSION: i64 = 1;

/// Errors raised while loading or validating a model file.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to read the model file.
    #[error("Failed to read model {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The model file is not valid JSON for this format.
    #[error("Invalid model JSON at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The model parsed but its dimensions are inconsistent.
    #[error("Invalid model: {0}")]
    Invalid(String),
}

/// Small feed-forward classifier predicting the knee-in-toe-out probability.
///
/// With `hidden_size == 0` the model is a logistic regression over the
/// standardized inputs and `weights2` holds one weight per input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KneeInModel {
    pub model_version: i64,
    pub feature_len_f32: usize,
    pub hidden_size: usize,
    #[serde(default)]
    pub weights1: Vec<f32>,
    #[serde(default)]
    pub bias1: Vec<f32>,
    pub weights2: Vec<f32>,
    pub bias2: f32,
    pub feature_mean: Vec<f32>,
    pub feature_std: Vec<f32>,
}

impl KneeInModel {
    /// Load and validate a model from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_slice(&bytes).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        model.validate().map_err(ModelError::Invalid)?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.model_version != KNEE_IN_MODEL_VERSION {
            return Err(format!(
                "Unsupported model_version {} (expected {})",
                self.model_version, KNEE_IN_MODEL_VERSION
            ));
        }
        if self.feature_len_f32 != FEATURE_VECTOR_LEN {
            return Err(format!(
                "Unsupported feature_len_f32 {} (expected {})",
                self.feature_len_f32, FEATURE_VECTOR_LEN
            ));
        }
        let input = self.feature_len_f32;
        let hidden = self.hidden_size;
        if hidden == 0 {
            if self.weights2.len() != input {
                return Err("weights2 length mismatch".to_string());
            }
        } else {
            if self.weights1.len() != input * hidden {
                return Err("weights1 length mismatch".to_string());
            }
            if self.bias1.len() != hidden {
                return Err("bias1 length mismatch".to_string());
            }
            if self.weights2.len() != hidden {
                return Err("weights2 length mismatch".to_string());
            }
        }
        if self.feature_mean.len() != input {
            return Err("feature_mean length mismatch".to_string());
        }
        if self.feature_std.len() != input {
            return Err("feature_std length mismatch".to_string());
        }
        Ok(())
    }

    /// Probability in `[0, 1]` that the pose shows knee-in-toe-out.
    ///
    /// Returns `None` on a length mismatch or non-finite output.
    pub fn predict(&self, features: &[f32]) -> Option<f32> {
        if features.len() != self.feature_len_f32 {
            return None;
        }
        let input = self.feature_len_f32;
        let normalized: Vec<f32> = (0..input)
            .map(|i| (features[i] - self.feature_mean[i]) / self.feature_std[i].max(1e-6))
            .collect();

        let logit = if self.hidden_size == 0 {
            self.bias2 + dot(&self.weights2, &normalized)
        } else {
            let hidden_act: Vec<f32> = (0..self.hidden_size)
                .map(|h| {
                    let base = h * input;
                    let sum = self.bias1[h] + dot(&self.weights1[base..base + input], &normalized);
                    sum.max(0.0)
                })
                .collect();
            self.bias2 + dot(&self.weights2, &hidden_act)
        };

        let probability = sigmoid(logit);
        probability.is_finite().then_some(probability)
    }
}

fn dot(weights: &[f32], values: &[f32]) -> f32 {
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
