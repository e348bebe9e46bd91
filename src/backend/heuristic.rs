use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::analysis::{
    AlignmentResult, ExerciseType, FeatureVector, Keypoint, KneeAlignment, compute_overall_score,
    generate_feedback,
};
use crate::results::FrameAssessment;

use super::{BackendError, ScoringBackend};

/// Canned defect signal and alignment for one realistic pose outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub knee_in_toe_out: f32,
    pub alignment: AlignmentResult,
}

impl Scenario {
    /// Score the scenario through the same pipeline as model-backed frames.
    pub fn assess(&self, exercise: ExerciseType) -> FrameAssessment {
        let overall = compute_overall_score(self.knee_in_toe_out, &self.alignment);
        FrameAssessment {
            knee_in_toe_out: self.knee_in_toe_out,
            overall,
            alignment: self.alignment,
            feedback: generate_feedback(overall, &self.alignment, exercise),
        }
    }
}

/// Good, moderate and poor outcomes, in that order.
pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            knee_in_toe_out: 0.15,
            alignment: AlignmentResult {
                left_knee_alignment: KneeAlignment::Good,
                right_knee_alignment: KneeAlignment::Good,
                knee_width: 98.0,
                ankle_width: 102.0,
                knee_ankle_ratio: 0.96,
            },
        },
        Scenario {
            knee_in_toe_out: 0.35,
            alignment: AlignmentResult {
                left_knee_alignment: KneeAlignment::Good,
                right_knee_alignment: KneeAlignment::Moderate,
                knee_width: 80.0,
                ankle_width: 100.0,
                knee_ankle_ratio: 0.8,
            },
        },
        Scenario {
            knee_in_toe_out: 0.7,
            alignment: AlignmentResult {
                left_knee_alignment: KneeAlignment::Poor,
                right_knee_alignment: KneeAlignment::Moderate,
                knee_width: 52.0,
                ankle_width: 100.0,
                knee_ankle_ratio: 0.52,
            },
        },
    ]
}

/// How the heuristic backend chooses among its scenarios.
pub enum ScenarioPicker {
    /// Thread-local RNG; varies run to run.
    Random,
    /// Reproducible sequence from a fixed seed.
    Seeded(StdRng),
    /// Always the same scenario index (wrapped to the scenario count).
    Fixed(usize),
}

impl ScenarioPicker {
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(StdRng::seed_from_u64(seed))
    }

    fn pick(&mut self, len: usize) -> usize {
        match self {
            Self::Random => rand::rng().random_range(0..len),
            Self::Seeded(rng) => rng.random_range(0..len),
            Self::Fixed(index) => *index % len,
        }
    }
}

/// Fallback backend returning canned scenarios; always ready, never fails.
pub struct HeuristicBackend {
    scenarios: Vec<Scenario>,
    picker: ScenarioPicker,
}

impl HeuristicBackend {
    pub fn new(picker: ScenarioPicker) -> Self {
        Self::with_scenarios(default_scenarios(), picker)
    }

    /// Use a custom scenario set; an empty set falls back to the defaults.
    pub fn with_scenarios(scenarios: Vec<Scenario>, picker: ScenarioPicker) -> Self {
        let scenarios = if scenarios.is_empty() {
            default_scenarios()
        } else {
            scenarios
        };
        Self { scenarios, picker }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Pick the next scenario and score it for `exercise`.
    pub fn next_assessment(&mut self, exercise: ExerciseType) -> FrameAssessment {
        let index = self.picker.pick(self.scenarios.len());
        self.scenarios[index].assess(exercise)
    }
}

impl Default for HeuristicBackend {
    fn default() -> Self {
        Self::new(ScenarioPicker::Random)
    }
}

impl ScoringBackend for HeuristicBackend {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn initialize(&mut self) -> Result<(), BackendError> {
        Ok(())
    }

    fn assess(
        &mut self,
        _features: &FeatureVector,
        _keypoints: &[Keypoint],
        exercise: ExerciseType,
    ) -> Result<FrameAssessment, BackendError> {
        Ok(self.next_assessment(exercise))
    }

    fn dispose(&mut self) {}
}
