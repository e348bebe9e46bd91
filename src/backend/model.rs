use std::path::{Path, PathBuf};

use crate::analysis::{
    ExerciseType, FeatureVector, Keypoint, classify_alignment, compute_overall_score,
    generate_feedback,
};
use crate::ml::KneeInModel;
use crate::results::FrameAssessment;

use super::{BackendError, ScoringBackend};

/// Where a [`ModelBackend`] loads its model from.
#[derive(Debug, Clone)]
enum ModelSource {
    File(PathBuf),
    Memory(KneeInModel),
}

/// Backend driven by a trained [`KneeInModel`].
#[derive(Debug, Clone, Default)]
pub struct ModelBackend {
    source: Option<ModelSource>,
    model: Option<KneeInModel>,
}

impl ModelBackend {
    /// Backend that loads its model from `path` on initialization.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(ModelSource::File(path.into())),
            model: None,
        }
    }

    /// Backend around an in-memory model, validated on initialization.
    pub fn from_model(model: KneeInModel) -> Self {
        Self {
            source: Some(ModelSource::Memory(model)),
            model: None,
        }
    }

    pub fn model_path(&self) -> Option<&Path> {
        match &self.source {
            Some(ModelSource::File(path)) => Some(path),
            _ => None,
        }
    }
}

impl ScoringBackend for ModelBackend {
    fn name(&self) -> &'static str {
        "model"
    }

    fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    fn initialize(&mut self) -> Result<(), BackendError> {
        if self.model.is_some() {
            return Ok(());
        }
        let model = match self.source.as_ref().ok_or(BackendError::NoModelPath)? {
            ModelSource::File(path) => {
                let model =
                    KneeInModel::load_json(path).map_err(|source| BackendError::ModelLoad {
                        path: path.clone(),
                        source,
                    })?;
                tracing::info!(
                    "Loaded knee-in model v{} (hidden={}) from {}",
                    model.model_version,
                    model.hidden_size,
                    path.display()
                );
                model
            }
            ModelSource::Memory(model) => {
                model.validate().map_err(BackendError::InvalidModel)?;
                model.clone()
            }
        };
        self.model = Some(model);
        Ok(())
    }

    fn assess(
        &mut self,
        features: &FeatureVector,
        keypoints: &[Keypoint],
        exercise: ExerciseType,
    ) -> Result<FrameAssessment, BackendError> {
        let model = self.model.as_ref().ok_or(BackendError::NotInitialized)?;
        let knee_in_toe_out = model
            .predict(features)
            .ok_or_else(|| BackendError::Inference("model returned no probability".to_string()))?;
        let alignment = classify_alignment(keypoints);
        let overall = compute_overall_score(knee_in_toe_out, &alignment);
        let feedback = generate_feedback(overall, &alignment, exercise);
        Ok(FrameAssessment {
            knee_in_toe_out,
            overall,
            alignment,
            feedback,
        })
    }

    fn dispose(&mut self) {
        self.model = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{FEATURE_VECTOR_LEN, FeedbackLevel, KneeAlignment, normalize};
    use crate::ml::KNEE_IN_MODEL_VERSION;
    use tempfile::tempdir;

    fn constant_model(bias: f32) -> KneeInModel {
        KneeInModel {
            model_version: KNEE_IN_MODEL_VERSION,
            feature_len_f32: FEATURE_VECTOR_LEN,
            hidden_size: 0,
            weights1: Vec::new(),
            bias1: Vec::new(),
            weights2: vec![0.0; FEATURE_VECTOR_LEN],
            bias2: bias,
            feature_mean: vec![0.0; FEATURE_VECTOR_LEN],
            feature_std: vec![1.0; FEATURE_VECTOR_LEN],
        }
    }

    #[test]
    fn uninitialized_backend_refuses_to_assess() {
        let mut backend = ModelBackend::from_path("/nonexistent/model.json");
        let err = backend
            .assess(&[0.0; FEATURE_VECTOR_LEN], &[], ExerciseType::Squat)
            .unwrap_err();
        assert!(matches!(err, BackendError::NotInitialized));
        assert!(matches!(
            backend.initialize().unwrap_err(),
            BackendError::ModelLoad { .. }
        ));
    }

    #[test]
    fn default_backend_without_path_fails_to_initialize() {
        let mut backend = ModelBackend::default();
        assert!(matches!(
            backend.initialize().unwrap_err(),
            BackendError::NoModelPath
        ));
    }

    #[test]
    fn confident_clean_model_scores_good() {
        // sigmoid(-6) is close to zero defect.
        let mut backend = ModelBackend::from_model(constant_model(-6.0));
        backend.initialize().unwrap();
        let assessment = backend
            .assess(&normalize(&[]), &[], ExerciseType::Squat)
            .unwrap();
        assert!(assessment.knee_in_toe_out < 0.01);
        assert_eq!(assessment.alignment.left_knee_alignment, KneeAlignment::Unknown);
        // 0.6 * ~1.0 + 0.15 + 0.1
        assert!((assessment.overall - 0.85).abs() < 0.01);
        assert_eq!(assessment.feedback.level, FeedbackLevel::Good);
    }

    #[test]
    fn invalid_in_memory_model_fails_to_initialize() {
        let mut model = constant_model(0.0);
        model.bias1 = vec![0.0];
        model.hidden_size = 2;
        let mut backend = ModelBackend::from_model(model);
        assert!(matches!(
            backend.initialize().unwrap_err(),
            BackendError::InvalidModel(_)
        ));
        assert!(!backend.is_ready());
    }

    #[test]
    fn dispose_unloads_path_backed_model() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, serde_json::to_vec(&constant_model(0.0)).unwrap()).unwrap();

        let mut backend = ModelBackend::from_path(&path);
        backend.initialize().unwrap();
        assert!(backend.is_ready());
        backend.dispose();
        assert!(!backend.is_ready());
        backend.initialize().unwrap();
        assert!(backend.is_ready());
    }
}
