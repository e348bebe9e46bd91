//! Frame analysis entry point with model-or-heuristic fallback.
//!
//! Every public operation is total: model failures are logged and replaced by
//! a heuristic result tagged `is_dummy`, never surfaced to the caller.

use crate::analysis::{ExerciseType, Keypoint, normalize};
use crate::backend::{HeuristicBackend, ModelBackend, ScenarioPicker, ScoringBackend};
use crate::config::EngineConfig;
use crate::results::{AnalysisResult, FrameAssessment, SessionSummary};
use crate::session::SessionAggregator;

/// Scoring engine owning one session's history.
pub struct MotionEngine {
    primary: Option<Box<dyn ScoringBackend>>,
    fallback: HeuristicBackend,
    session: SessionAggregator,
    model_ready: bool,
}

impl MotionEngine {
    /// Engine with no trained model; every frame uses the heuristic path.
    pub fn heuristic_only(fallback: HeuristicBackend) -> Self {
        Self {
            primary: None,
            fallback,
            session: SessionAggregator::new(),
            model_ready: false,
        }
    }

    /// Engine with a primary backend; call [`MotionEngine::initialize_model`] before use.
    pub fn with_backend(primary: Box<dyn ScoringBackend>, fallback: HeuristicBackend) -> Self {
        Self {
            primary: Some(primary),
            fallback,
            session: SessionAggregator::new(),
            model_ready: false,
        }
    }

    /// Wire backends from configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        let picker = match config.heuristic_seed {
            Some(seed) => ScenarioPicker::seeded(seed),
            None => ScenarioPicker::Random,
        };
        let fallback = HeuristicBackend::new(picker);
        match &config.model_path {
            Some(path) => Self::with_backend(Box::new(ModelBackend::from_path(path)), fallback),
            None => Self::heuristic_only(fallback),
        }
    }

    /// Load the primary backend's model. Returns `false` on failure or when none is configured.
    pub fn initialize_model(&mut self) -> bool {
        let Some(primary) = self.primary.as_mut() else {
            tracing::info!("No scoring model configured; using heuristic feedback");
            self.model_ready = false;
            return false;
        };
        match primary.initialize() {
            Ok(()) => {
                self.model_ready = primary.is_ready();
                tracing::info!("Scoring backend '{}' initialized", primary.name());
            }
            Err(err) => {
                self.model_ready = false;
                tracing::warn!(
                    "Scoring backend '{}' failed to initialize: {err}",
                    primary.name()
                );
            }
        }
        self.model_ready
    }

    pub fn is_model_ready(&self) -> bool {
        self.model_ready
    }

    /// Analyze one frame and append the result to the session history.
    pub fn analyze_frame(&mut self, keypoints: &[Keypoint], exercise_label: &str) -> AnalysisResult {
        let exercise = ExerciseType::from_label(exercise_label);
        let result = match self.try_model(keypoints, exercise) {
            Some(assessment) => AnalysisResult::from_assessment(assessment, exercise_label, false),
            None => {
                let assessment = self.fallback.next_assessment(exercise);
                AnalysisResult::from_assessment(assessment, exercise_label, true)
            }
        };
        tracing::debug!(
            "Frame analyzed: overall={} knee_in={} level={:?} dummy={}",
            result.overall_score,
            result.knee_in_toe_out_score,
            result.feedback.level,
            result.is_dummy
        );
        self.session.record(result.clone());
        result
    }

    fn try_model(
        &mut self,
        keypoints: &[Keypoint],
        exercise: ExerciseType,
    ) -> Option<FrameAssessment> {
        if !self.model_ready {
            return None;
        }
        let primary = self.primary.as_mut()?;
        let features = normalize(keypoints);
        match primary.assess(&features, keypoints, exercise) {
            Ok(assessment) => Some(assessment),
            Err(err) => {
                tracing::warn!(
                    "Scoring backend '{}' failed, using heuristic result: {err}",
                    primary.name()
                );
                None
            }
        }
    }

    /// Clear the session history.
    pub fn reset_analysis(&mut self) {
        if !self.session.is_empty() {
            tracing::info!("Resetting session with {} frames", self.session.len());
        }
        self.session.reset();
    }

    /// Summarize every frame analyzed since the last reset.
    pub fn session_summary(&self) -> SessionSummary {
        self.session.summary()
    }

    pub fn history(&self) -> &[AnalysisResult] {
        self.session.history()
    }

    /// Release model resources and clear history.
    ///
    /// Frames analyzed afterwards use the heuristic path until
    /// [`MotionEngine::initialize_model`] succeeds again.
    pub fn dispose(&mut self) {
        if let Some(primary) = self.primary.as_mut() {
            primary.dispose();
            tracing::info!("Scoring backend '{}' disposed", primary.name());
        }
        self.model_ready = false;
        self.session.reset();
    }
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::heuristic_only(HeuristicBackend::default())
    }
}
