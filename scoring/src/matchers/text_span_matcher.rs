//! A matcher for labeled text spans (named-entity style annotations).
//!
//! Similarity between two half-open ranges `[start, end)` is their 1-D
//! interval Jaccard: intersection length over union length. For each
//! reference span the best-overlapping label-sharing candidate is selected;
//! a binary match requires overlap at or above the policy threshold
//! (default 0.8). Partial-credit score is the mean overlap minus 0.1 per
//! candidate span that matched no reference, floored at zero; exact mode
//! scores matched/total.

use std::collections::HashSet;

use crate::matchers::NO_ANSWER_FEEDBACK;
use crate::traits::matcher::Matcher;
use crate::types::{MatchOutcome, ScoreDetail};
use util::annotation::{AnnotationResult, ResultValue};
use util::task_catalog::ScoringPolicy;

/// Overlap required for a binary match when the policy carries no threshold.
pub(crate) const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.8;

/// Penalty per candidate span left unmatched in partial-credit mode.
pub(crate) const EXTRA_SPAN_PENALTY: f64 = 0.1;

/// Interval-Jaccard comparison for text-span annotations.
pub struct TextSpanMatcher;

fn spans_of<'a>(
    results: &[&'a AnnotationResult],
) -> Vec<(&'a AnnotationResult, (usize, usize), &'a [String])> {
    results
        .iter()
        .copied()
        .filter_map(|r| match &r.value {
            ResultValue::TextSpan {
                start, end, labels, ..
            } => Some((r, (*start, *end), labels.as_slice())),
            _ => None,
        })
        .collect()
}

/// Jaccard overlap of two half-open ranges. Zero-length unions yield 0.
fn interval_overlap(a: (usize, usize), b: (usize, usize)) -> f64 {
    let intersection = a.1.min(b.1).saturating_sub(a.0.max(b.0));
    let union = a.1.saturating_sub(a.0) + b.1.saturating_sub(b.0) - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

fn shares_label(a: &[String], b: &[String]) -> bool {
    a.iter().any(|label| b.contains(label))
}

impl Matcher for TextSpanMatcher {
    fn compare(
        &self,
        policy: &ScoringPolicy,
        references: &[&AnnotationResult],
        candidates: &[&AnnotationResult],
    ) -> MatchOutcome {
        let reference_spans = spans_of(references);
        if reference_spans.is_empty() {
            return MatchOutcome {
                score: 0.0,
                feedback: "No reference entities".to_string(),
                details: vec![],
            };
        }

        if candidates.is_empty() {
            let details = reference_spans
                .iter()
                .map(|(result, _, _)| ScoreDetail {
                    expected: result.value.describe(),
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

        let candidate_spans = spans_of(candidates);
        let threshold = policy.threshold.unwrap_or(DEFAULT_OVERLAP_THRESHOLD);

        let mut matched_count = 0usize;
        let mut overlap_sum = 0.0;
        let mut used: HashSet<usize> = HashSet::new();
        let mut details = Vec::with_capacity(reference_spans.len());

        for (ref_result, ref_range, ref_labels) in &reference_spans {
            let mut best: Option<(f64, usize)> = None;
            for (i, (_, cand_range, cand_labels)) in candidate_spans.iter().enumerate() {
                if !shares_label(ref_labels, cand_labels) {
                    continue;
                }
                let value = interval_overlap(*ref_range, *cand_range);
                if best.is_none_or(|(b, _)| value > b) {
                    best = Some((value, i));
                }
            }

            let best_overlap = best.map_or(0.0, |(v, _)| v);
            if let Some((v, i)) = best {
                if v > 0.0 {
                    used.insert(i);
                }
            }
            let matched = best_overlap >= threshold;
            if matched {
                matched_count += 1;
            }
            overlap_sum += best_overlap;

            details.push(ScoreDetail {
                expected: ref_result.value.describe(),
                candidate: best.map(|(_, i)| candidate_spans[i].0.value.describe()),
                matched,
                partial_score: Some(best_overlap),
            });
        }

        let total = reference_spans.len();
        let extras = candidate_spans.len() - used.len();
        let score = if policy.partial_credit {
            (overlap_sum / total as f64 - EXTRA_SPAN_PENALTY * extras as f64).max(0.0)
        } else {
            matched_count as f64 / total as f64
        };

        MatchOutcome {
            score,
            feedback: format!("{matched_count}/{total} entities matched"),
            details,
        }
    }
}
