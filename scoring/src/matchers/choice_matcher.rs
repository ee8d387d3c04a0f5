//! A matcher for classification controls: candidate and reference choice
//! sets are compared as sets.
//!
//! Exact mode requires set equality. Partial-credit mode awards the fraction
//! of expected choices selected, minus half the fraction of extra choices,
//! floored at zero.

use std::collections::BTreeSet;

use crate::matchers::NO_ANSWER_FEEDBACK;
use crate::traits::matcher::Matcher;
use crate::types::{MatchOutcome, ScoreDetail};
use util::annotation::{AnnotationResult, ResultValue};
use util::task_catalog::ScoringPolicy;

/// Set comparison over choice-set annotations.
///
/// All choice values in the group are pooled into one set on each side, so a
/// control that emits several `choices` results is treated the same as one
/// result carrying all of them.
pub struct ChoiceMatcher;

fn choice_set<'a>(results: &[&'a AnnotationResult]) -> BTreeSet<&'a str> {
    let mut set = BTreeSet::new();
    for result in results.iter().copied() {
        if let ResultValue::Choices { choices } = &result.value {
            set.extend(choices.iter().map(String::as_str));
        }
    }
    set
}

impl Matcher for ChoiceMatcher {
    fn compare(
        &self,
        policy: &ScoringPolicy,
        references: &[&AnnotationResult],
        candidates: &[&AnnotationResult],
    ) -> MatchOutcome {
        let expected = choice_set(references);

        if candidates.is_empty() {
            let details = expected
                .iter()
                .map(|choice| ScoreDetail {
                    expected: (*choice).to_string(),
                    candidate: None,
                    matched: false,
                    partial_score: None,
                })
                .collect();
            return MatchOutcome {
                score: 0.0,
                feedback: NO_ANSWER_FEEDBACK.to_string(),
                details,
            };
        }

        let selected = choice_set(candidates);

        if expected.is_empty() {
            // Nothing to select; credit only a candidate that selected nothing.
            let score = if selected.is_empty() { 1.0 } else { 0.0 };
            let feedback = if selected.is_empty() {
                "Correct!".to_string()
            } else {
                "Incorrect selection".to_string()
            };
            return MatchOutcome {
                score,
                feedback,
                details: vec![],
            };
        }

        let hits = expected.intersection(&selected).count();
        let missing: Vec<&str> = expected.difference(&selected).copied().collect();
        let extras = selected.difference(&expected).count();

        let score = if policy.partial_credit {
            let hit_ratio = hits as f64 / expected.len() as f64;
            let extra_penalty = 0.5 * (extras as f64 / expected.len() as f64);
            (hit_ratio - extra_penalty).max(0.0)
        } else if missing.is_empty() && extras == 0 {
            1.0
        } else {
            0.0
        };

        let feedback = if score >= 1.0 {
            "Correct!".to_string()
        } else if policy.partial_credit && score > 0.0 {
            format!("Partially correct ({}%)", (score * 100.0).round() as u32)
        } else if !missing.is_empty() {
            format!("Missing: {}", missing.join(", "))
        } else {
            "Incorrect selection".to_string()
        };

        let details = expected
            .iter()
            .map(|choice| {
                let matched = selected.contains(*choice);
                ScoreDetail {
                    expected: (*choice).to_string(),
                    candidate: matched.then(|| (*choice).to_string()),
                    matched,
                    partial_score: None,
                }
            })
            .collect();

        MatchOutcome {
            score,
            feedback,
            details,
        }
    }
}
