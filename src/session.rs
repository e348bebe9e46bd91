//! Per-session accumulation of frame results.
//!
//! One aggregator belongs to one recording session. It is append-only while
//! the session runs and is cleared as a whole on reset; callers analysing
//! several sessions at once give each its own instance.

use crate::results::{AnalysisResult, SessionSummary};

/// Overall score (0-100) below which a frame counts as an issue.
pub const ISSUE_SCORE_THRESHOLD: u8 = 60;
/// Share of issue frames above which the summary recommends revisiting fundamentals.
pub const ISSUE_RATIO_THRESHOLD: f64 = 0.3;
/// Knee-in-toe-out score (0-100) above which the summary recommends hip-driven movement.
pub const KNEE_IN_SCORE_THRESHOLD: u8 = 50;

const REVISIT_FUNDAMENTALS: &str =
    "Many reps showed form issues. Revisit the fundamentals at a slower pace before adding load.";
const HIP_DRIVEN_MOVEMENT: &str =
    "Your knees tended to cave inward. Focus on driving the movement from your hips.";

/// Ordered history of frame results for one session.
#[derive(Debug, Clone, Default)]
pub struct SessionAggregator {
    history: Vec<AnalysisResult>,
}

impl SessionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame result.
    pub fn record(&mut self, result: AnalysisResult) {
        self.history.push(result);
    }

    pub fn history(&self) -> &[AnalysisResult] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Drop every recorded frame.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Summarize the full history.
    pub fn summary(&self) -> SessionSummary {
        let total_frames = self.history.len();
        if total_frames == 0 {
            return SessionSummary::default();
        }

        let score_sum: u64 = self
            .history
            .iter()
            .map(|result| u64::from(result.overall_score))
            .sum();
        let average_score = (score_sum as f64 / total_frames as f64).round() as u8;
        let issue_count = self
            .history
            .iter()
            .filter(|result| result.overall_score < ISSUE_SCORE_THRESHOLD)
            .count();

        let mut improvements = Vec::new();
        if issue_ratio_exceeded(issue_count, total_frames) {
            improvements.push(REVISIT_FUNDAMENTALS.to_string());
        }
        if self
            .history
            .iter()
            .any(|result| result.knee_in_toe_out_score > KNEE_IN_SCORE_THRESHOLD)
        {
            improvements.push(HIP_DRIVEN_MOVEMENT.to_string());
        }

        SessionSummary {
            total_frames,
            average_score,
            issue_count,
            improvements,
        }
    }
}

fn issue_ratio_exceeded(issue_count: usize, total_frames: usize) -> bool {
    total_frames > 0 && issue_count as f64 / total_frames as f64 > ISSUE_RATIO_THRESHOLD
}
