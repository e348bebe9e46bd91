//! Composite movement-quality score.

use super::alignment::AlignmentResult;

/// Weight of the primary knee-in-toe-out defect signal.
pub const KNEE_IN_WEIGHT: f32 = 0.6;
/// Weight of the averaged per-side alignment score.
pub const ALIGNMENT_WEIGHT: f32 = 0.3;
/// Weight of the knee/ankle width ratio score.
pub const RATIO_WEIGHT: f32 = 0.1;

/// Knee/ankle ratio band scored as ideal.
pub const IDEAL_RATIO_RANGE: (f32, f32) = (0.8, 1.2);
/// Knee/ankle ratio band scored as tolerable.
pub const TOLERANT_RATIO_RANGE: (f32, f32) = (0.6, 1.4);

/// Combine the defect probability with alignment into a `[0, 1]` score.
///
/// `knee_in_toe_out` is the probability of the knee collapsing inward; higher
/// means worse form, so it is inverted before weighting.
pub fn compute_overall_score(knee_in_toe_out: f32, alignment: &AlignmentResult) -> f32 {
    let mut score = (1.0 - knee_in_toe_out) * KNEE_IN_WEIGHT;

    let alignment_score =
        (alignment.left_knee_alignment.score() + alignment.right_knee_alignment.score()) / 2.0;
    score += alignment_score * ALIGNMENT_WEIGHT;

    score += ratio_score(alignment.knee_ankle_ratio) * RATIO_WEIGHT;

    score.clamp(0.0, 1.0)
}

/// Score the knee/ankle width ratio against the ideal and tolerant bands.
pub fn ratio_score(ratio: f32) -> f32 {
    if in_band(ratio, IDEAL_RATIO_RANGE) {
        1.0
    } else if in_band(ratio, TOLERANT_RATIO_RANGE) {
        0.7
    } else {
        0.3
    }
}

/// Convert a `[0, 1]` score into the integer percentage stored on results.
pub fn to_percent(score: f32) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn in_band(value: f32, (low, high): (f32, f32)) -> bool {
    value >= low && value <= high
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::alignment::KneeAlignment;

    fn alignment(left: KneeAlignment, right: KneeAlignment, ratio: f32) -> AlignmentResult {
        AlignmentResult {
            left_knee_alignment: left,
            right_knee_alignment: right,
            knee_width: 0.0,
            ankle_width: 0.0,
            knee_ankle_ratio: ratio,
        }
    }

    #[test]
    fn perfect_form_scores_one() {
        let a = alignment(KneeAlignment::Good, KneeAlignment::Good, 1.0);
        assert!((compute_overall_score(0.0, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn unknown_alignment_uses_neutral_weights() {
        let score = compute_overall_score(0.5, &AlignmentResult::unknown());
        // 0.3 + 0.5 * 0.3 + 1.0 * 0.1
        assert!((score - 0.55).abs() < 1e-6);
    }

    #[test]
    fn ratio_bands_are_inclusive() {
        assert_eq!(ratio_score(0.8), 1.0);
        assert_eq!(ratio_score(1.2), 1.0);
        assert_eq!(ratio_score(0.6), 0.7);
        assert_eq!(ratio_score(1.4), 0.7);
        assert_eq!(ratio_score(0.59), 0.3);
        assert_eq!(ratio_score(1.41), 0.3);
    }

    #[test]
    fn score_stays_in_unit_range() {
        let worst = alignment(KneeAlignment::Poor, KneeAlignment::Poor, 3.0);
        let best = alignment(KneeAlignment::Good, KneeAlignment::Good, 1.0);
        for knee_in in [-1.0, 0.0, 0.25, 0.5, 1.0, 2.0] {
            for a in [&worst, &best] {
                let score = compute_overall_score(knee_in, a);
                assert!((0.0..=1.0).contains(&score), "score {score} out of range");
            }
        }
    }

    #[test]
    fn more_defect_never_raises_score() {
        let a = alignment(KneeAlignment::Moderate, KneeAlignment::Good, 0.7);
        let mut previous = f32::INFINITY;
        for step in 0..=20 {
            let score = compute_overall_score(step as f32 / 20.0, &a);
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(to_percent(0.556), 56);
        assert_eq!(to_percent(0.554), 55);
        assert_eq!(to_percent(1.5), 100);
        assert_eq!(to_percent(f32::NAN), 0);
    }
}
