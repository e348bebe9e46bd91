//! Plain result records handed back to the surrounding application.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::analysis::{AlignmentResult, FeedbackResult, to_percent};

/// Scores and feedback produced by a backend before stamping.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAssessment {
    /// Knee-in-toe-out defect probability in `[0, 1]`.
    pub knee_in_toe_out: f32,
    /// Composite quality score in `[0, 1]`.
    pub overall: f32,
    pub alignment: AlignmentResult,
    pub feedback: FeedbackResult,
}

/// Immutable per-frame analysis record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Knee-in-toe-out defect score, 0-100.
    pub knee_in_toe_out_score: u8,
    /// Composite quality score, 0-100.
    pub overall_score: u8,
    pub alignment: AlignmentResult,
    pub feedback: FeedbackResult,
    /// Unix epoch milliseconds at which the frame was analyzed.
    pub timestamp: i64,
    pub exercise_type: String,
    /// Set when the heuristic fallback produced this result.
    pub is_dummy: bool,
}

impl AnalysisResult {
    pub(crate) fn from_assessment(
        assessment: FrameAssessment,
        exercise_type: &str,
        is_dummy: bool,
    ) -> Self {
        Self {
            knee_in_toe_out_score: to_percent(assessment.knee_in_toe_out),
            overall_score: to_percent(assessment.overall),
            alignment: assessment.alignment,
            feedback: assessment.feedback,
            timestamp: now_epoch_millis(),
            exercise_type: exercise_type.to_string(),
            is_dummy,
        }
    }
}

/// Aggregate over every frame recorded in a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total_frames: usize,
    pub average_score: u8,
    pub issue_count: usize,
    pub improvements: Vec<String>,
}

fn now_epoch_millis() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    (nanos / 1_000_000) as i64
}
