//! Rule-based corrective feedback for a scored frame.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::alignment::{AlignmentResult, KneeAlignment};

/// Overall score at or above which form is rated good.
pub const GOOD_SCORE_THRESHOLD: f32 = 0.8;
/// Overall score at or above which form is rated moderate.
pub const MODERATE_SCORE_THRESHOLD: f32 = 0.6;

/// Severity tier of a frame's feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackLevel {
    Good,
    Moderate,
    Poor,
}

impl FeedbackLevel {
    /// Tier an overall `[0, 1]` score.
    pub fn from_score(score: f32) -> Self {
        if score >= GOOD_SCORE_THRESHOLD {
            Self::Good
        } else if score >= MODERATE_SCORE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Poor
        }
    }
}

/// Message and ordered suggestions shown to the patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResult {
    pub level: FeedbackLevel,
    pub message: String,
    pub suggestions: Vec<String>,
}

/// Exercise types the feedback rules know about.
///
/// Parsing never fails; unrecognised labels map to [`ExerciseType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    #[default]
    Squat,
    Lunge,
    StepUp,
    KneeExtension,
    Other,
}

impl ExerciseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::Lunge => "lunge",
            Self::StepUp => "step_up",
            Self::KneeExtension => "knee_extension",
            Self::Other => "other",
        }
    }

    /// Label-based parse that falls back to `Other`.
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "squat" => Self::Squat,
            "lunge" => Self::Lunge,
            "step_up" | "stepup" => Self::StepUp,
            "knee_extension" => Self::KneeExtension,
            _ => Self::Other,
        }
    }

    /// Exercise-specific cue added to moderate-tier feedback.
    fn moderate_cue(&self) -> Option<&'static str> {
        match self {
            Self::Squat => Some(SQUAT_CUE),
            Self::Lunge | Self::StepUp | Self::KneeExtension | Self::Other => None,
        }
    }
}

impl FromStr for ExerciseType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const GOOD_MESSAGE: &str = "Great form! Your knees are tracking well.";
const MAINTAIN_FORM: &str = "Keep up this form for the rest of the set.";

const MODERATE_MESSAGE: &str = "Good effort. A few adjustments will improve your form.";
const KNEE_OPENS_OUTWARD: &str = "Your knees are drifting outward. Keep them in line with your toes.";
const KNEE_COLLAPSES_INWARD: &str =
    "Your knees are caving inward. Push them out so they track over your toes.";
const KNEE_OVER_TOE: &str = "Keep each knee stacked directly above the second toe.";
const SQUAT_CUE: &str = "Sit back into your hips and keep your weight over your heels.";
const ADJUST_FORM: &str = "Make small adjustments to keep your form steady.";

const POOR_MESSAGE: &str = "Your form needs attention. Let's correct it before continuing.";
const STRONG_OUTWARD_WARNING: &str =
    "Your knees are bowing far outward, which strains the joint. Bring them back over your toes.";
const STRONG_INWARD_WARNING: &str =
    "Your knees are collapsing inward, which raises injury risk. Stop and reset your knee position.";
const LEFT_KNEE_CORRECTION: &str = "Straighten your left knee so it lines up over your left ankle.";
const RIGHT_KNEE_CORRECTION: &str =
    "Straighten your right knee so it lines up over your right ankle.";
const SLOW_DOWN: &str = "Slow down and focus on form over speed.";

/// Ratio above which a moderate frame gets the outward-drift suggestion.
const MODERATE_OUTWARD_RATIO: f32 = 1.2;
/// Ratio below which a moderate frame gets the inward-collapse suggestion.
const MODERATE_INWARD_RATIO: f32 = 0.8;
/// Ratio above which a poor frame gets the strong outward warning.
const POOR_OUTWARD_RATIO: f32 = 1.4;
/// Ratio below which a poor frame gets the strong inward warning.
const POOR_INWARD_RATIO: f32 = 0.6;

/// Build feedback for an overall `[0, 1]` score.
pub fn generate_feedback(
    overall_score: f32,
    alignment: &AlignmentResult,
    exercise: ExerciseType,
) -> FeedbackResult {
    let level = FeedbackLevel::from_score(overall_score);
    let (message, suggestions) = match level {
        FeedbackLevel::Good => (GOOD_MESSAGE, vec![MAINTAIN_FORM]),
        FeedbackLevel::Moderate => (MODERATE_MESSAGE, moderate_suggestions(alignment, exercise)),
        FeedbackLevel::Poor => (POOR_MESSAGE, poor_suggestions(alignment)),
    };
    FeedbackResult {
        level,
        message: message.to_string(),
        suggestions: suggestions.into_iter().map(str::to_string).collect(),
    }
}

fn moderate_suggestions(alignment: &AlignmentResult, exercise: ExerciseType) -> Vec<&'static str> {
    let mut suggestions = Vec::new();
    let ratio = alignment.knee_ankle_ratio;
    if ratio > MODERATE_OUTWARD_RATIO {
        suggestions.push(KNEE_OPENS_OUTWARD);
    }
    if ratio < MODERATE_INWARD_RATIO {
        suggestions.push(KNEE_COLLAPSES_INWARD);
    }
    if alignment.either_side(KneeAlignment::Moderate) {
        suggestions.push(KNEE_OVER_TOE);
    }
    if let Some(cue) = exercise.moderate_cue() {
        suggestions.push(cue);
    }
    if suggestions.is_empty() {
        suggestions.push(ADJUST_FORM);
    }
    suggestions
}

fn poor_suggestions(alignment: &AlignmentResult) -> Vec<&'static str> {
    let mut suggestions = Vec::new();
    let ratio = alignment.knee_ankle_ratio;
    if ratio > POOR_OUTWARD_RATIO {
        suggestions.push(STRONG_OUTWARD_WARNING);
    }
    if ratio < POOR_INWARD_RATIO {
        suggestions.push(STRONG_INWARD_WARNING);
    }
    if alignment.left_knee_alignment == KneeAlignment::Poor {
        suggestions.push(LEFT_KNEE_CORRECTION);
    }
    if alignment.right_knee_alignment == KneeAlignment::Poor {
        suggestions.push(RIGHT_KNEE_CORRECTION);
    }
    suggestions.push(SLOW_DOWN);
    suggestions
}
