//! A matcher for numeric ratings on the fixed 1–5 scale.
//!
//! Exact mode requires the candidate rating to equal the reference exactly.
//! Partial-credit mode awards `1 - diff/4`, floored at zero, so a rating one
//! step off still earns 0.75. A payload with no numeric value scores zero
//! with feedback `"Invalid rating"` rather than failing the submission.

use crate::matchers::NO_ANSWER_FEEDBACK;
use crate::traits::matcher::Matcher;
use crate::types::{MatchOutcome, ScoreDetail};
use util::annotation::{AnnotationResult, ResultValue};
use util::task_catalog::ScoringPolicy;

/// Largest possible distance on the 1–5 rating scale.
pub(crate) const MAX_DIFF: f64 = 4.0;

/// Numeric-distance comparison for rating annotations.
pub struct RatingMatcher;

/// First rating payload in the group, if any. The outer `Option` is presence
/// of a rating item; the inner one is presence of its numeric value.
fn first_rating(results: &[&AnnotationResult]) -> Option<Option<f64>> {
    results.iter().find_map(|r| match &r.value {
        ResultValue::Rating { rating } => Some(*rating),
        _ => None,
    })
}

impl Matcher for RatingMatcher {
    fn compare(
        &self,
        policy: &ScoringPolicy,
        references: &[&AnnotationResult],
        candidates: &[&AnnotationResult],
    ) -> MatchOutcome {
        let Some(Some(expected)) = first_rating(references) else {
            return MatchOutcome {
                score: 0.0,
                feedback: "Invalid rating".to_string(),
                details: vec![],
            };
        };

        if candidates.is_empty() {
            return MatchOutcome {
                score: 0.0,
                feedback: NO_ANSWER_FEEDBACK.to_string(),
                details: vec![ScoreDetail {
                    expected: format!("rating {expected}"),
                    candidate: None,
                    matched: false,
                    partial_score: None,
                }],
            };
        }

        let got = match first_rating(candidates) {
            Some(Some(value)) => value,
            _ => {
                return MatchOutcome {
                    score: 0.0,
                    feedback: "Invalid rating".to_string(),
                    details: vec![ScoreDetail {
                        expected: format!("rating {expected}"),
                        candidate: Some("rating ?".to_string()),
                        matched: false,
                        partial_score: None,
                    }],
                };
            }
        };

        let diff = (expected - got).abs();
        let score = if policy.partial_credit {
            (1.0 - diff / MAX_DIFF).max(0.0)
        } else if diff == 0.0 {
            1.0
        } else {
            0.0
        };

        let feedback = if diff == 0.0 {
            "Correct!".to_string()
        } else {
            format!("Rating off by {diff} (expected {expected}, got {got})")
        };

        MatchOutcome {
            score,
            feedback,
            details: vec![ScoreDetail {
                expected: format!("rating {expected}"),
                candidate: Some(format!("rating {got}")),
                matched: diff == 0.0,
                partial_score: policy.partial_credit.then_some(score),
            }],
        }
    }
}
