//! A matcher for rectangular regions using intersection-over-union.
//!
//! For each reference box the best-IoU candidate among label-sharing
//! candidates is selected; a reference with no label-sharing candidate gets
//! IoU 0 and stays unmatched. A binary match requires IoU at or above the
//! policy threshold (default 0.5). Partial-credit score is the mean IoU over
//! all references; exact mode scores matched/total.

use crate::matchers::NO_ANSWER_FEEDBACK;
use crate::traits::matcher::Matcher;
use crate::types::{MatchOutcome, ScoreDetail};
use util::annotation::{AnnotationResult, ResultValue};
use util::task_catalog::ScoringPolicy;

/// IoU required for a binary match when the policy carries no threshold.
pub(crate) const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// Rectangle IoU comparison for bounding-box annotations.
pub struct BoundingBoxMatcher;

#[derive(Debug, Clone, Copy)]
struct BoxGeom {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

fn boxes_of<'a>(
    results: &[&'a AnnotationResult],
) -> Vec<(&'a AnnotationResult, BoxGeom, &'a [String])> {
    results
        .iter()
        .copied()
        .filter_map(|r| match &r.value {
            ResultValue::Rectangle {
                x,
                y,
                width,
                height,
                labels,
            } => Some((
                r,
                BoxGeom {
                    x: *x,
                    y: *y,
                    width: *width,
                    height: *height,
                },
                labels.as_slice(),
            )),
            _ => None,
        })
        .collect()
}

/// Intersection-over-union of two axis-aligned rectangles.
///
/// Degenerate pairs (no overlap, or zero combined area) yield 0.
fn iou(a: &BoxGeom, b: &BoxGeom) -> f64 {
    let ix = (a.x + a.width).min(b.x + b.width) - a.x.max(b.x);
    let iy = (a.y + a.height).min(b.y + b.height) - a.y.max(b.y);
    if ix <= 0.0 || iy <= 0.0 {
        return 0.0;
    }
    let intersection = ix * iy;
    let union = a.width * a.height + b.width * b.height - intersection;
    if union <= 0.0 { 0.0 } else { intersection / union }
}

fn shares_label(a: &[String], b: &[String]) -> bool {
    a.iter().any(|label| b.contains(label))
}

impl Matcher for BoundingBoxMatcher {
    fn compare(
        &self,
        policy: &ScoringPolicy,
        references: &[&AnnotationResult],
        candidates: &[&AnnotationResult],
    ) -> MatchOutcome {
        let reference_boxes = boxes_of(references);
        if reference_boxes.is_empty() {
            return MatchOutcome {
                score: 0.0,
                feedback: "No reference regions".to_string(),
                details: vec![],
            };
        }

        if candidates.is_empty() {
            let details = reference_boxes
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

        let candidate_boxes = boxes_of(candidates);
        let threshold = policy.threshold.unwrap_or(DEFAULT_IOU_THRESHOLD);

        let mut matched_count = 0usize;
        let mut iou_sum = 0.0;
        let mut details = Vec::with_capacity(reference_boxes.len());

        // TODO: switch to optimal bipartite assignment once tasks carry many
        // regions; the greedy per-reference pick lets one candidate count
        // against several similar references.
        for (ref_result, ref_geom, ref_labels) in &reference_boxes {
            let mut best: Option<(f64, usize)> = None;
            for (i, (_, cand_geom, cand_labels)) in candidate_boxes.iter().enumerate() {
                if !shares_label(ref_labels, cand_labels) {
                    continue;
                }
                let value = iou(ref_geom, cand_geom);
                if best.is_none_or(|(b, _)| value > b) {
                    best = Some((value, i));
                }
            }

            let best_iou = best.map_or(0.0, |(v, _)| v);
            let matched = best_iou >= threshold;
            if matched {
                matched_count += 1;
            }
            iou_sum += best_iou;

            details.push(ScoreDetail {
                expected: ref_result.value.describe(),
                candidate: best.map(|(_, i)| candidate_boxes[i].0.value.describe()),
                matched,
                partial_score: Some(best_iou),
            });
        }

        let total = reference_boxes.len();
        let score = if policy.partial_credit {
            iou_sum / total as f64
        } else {
            matched_count as f64 / total as f64
        };

        MatchOutcome {
            score,
            feedback: format!("{matched_count}/{total} regions matched"),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use util::task_catalog::PolicyKind;

    fn rect(from_name: &str, x: f64, y: f64, width: f64, height: f64, label: &str) -> AnnotationResult {
        AnnotationResult {
            from_name: from_name.to_string(),
            to_name: "image".to_string(),
            value: ResultValue::Rectangle {
                x,
                y,
                width,
                height,
                labels: vec![label.to_string()],
            },
        }
    }

    fn policy(partial_credit: bool, threshold: Option<f64>) -> ScoringPolicy {
        ScoringPolicy {
            kind: PolicyKind::BoundingBoxIou,
            threshold,
            partial_credit,
        }
    }

    fn geom(x: f64, y: f64, width: f64, height: f64) -> BoxGeom {
        BoxGeom {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_iou_identical_rectangles() {
        let a = geom(10.0, 5.0, 80.0, 90.0);
        assert_eq!(iou(&a, &a), 1.0);
    }

    #[test]
    fn test_iou_disjoint_rectangles() {
        let a = geom(0.0, 0.0, 10.0, 10.0);
        let b = geom(50.0, 50.0, 10.0, 10.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn test_iou_is_symmetric() {
        let a = geom(0.0, 0.0, 10.0, 10.0);
        let b = geom(5.0, 5.0, 10.0, 10.0);
        assert_eq!(iou(&a, &b), iou(&b, &a));
    }

    #[test]
    fn test_identical_box_earns_full_score() {
        let reference = rect("regions", 10.0, 5.0, 80.0, 90.0, "Cat");
        let candidate = rect("regions", 10.0, 5.0, 80.0, 90.0, "Cat");
        let outcome =
            BoundingBoxMatcher.compare(&policy(false, None), &[&reference], &[&candidate]);
        assert_eq!(outcome.score, 1.0);
        assert_eq!(outcome.feedback, "1/1 regions matched");
        assert_eq!(outcome.details[0].partial_score, Some(1.0));
    }

    #[test]
    fn test_partial_credit_scores_raw_iou_below_threshold() {
        // Nested box covering 30% of the reference area: IoU = 30/100 = 0.3.
        let reference = rect("regions", 0.0, 0.0, 10.0, 10.0, "Cat");
        let candidate = rect("regions", 0.0, 0.0, 3.0, 10.0, "Cat");
        let outcome =
            BoundingBoxMatcher.compare(&policy(true, Some(0.5)), &[&reference], &[&candidate]);
        assert!((outcome.score - 0.3).abs() < 1e-12);
        assert_eq!(outcome.feedback, "0/1 regions matched");
    }

    #[test]
    fn test_exact_mode_is_binary_per_reference() {
        let ref_a = rect("regions", 0.0, 0.0, 10.0, 10.0, "Cat");
        let ref_b = rect("regions", 50.0, 50.0, 10.0, 10.0, "Dog");
        let cand_a = rect("regions", 0.0, 0.0, 10.0, 10.0, "Cat");
        let cand_b = rect("regions", 80.0, 80.0, 10.0, 10.0, "Dog");
        let outcome = BoundingBoxMatcher.compare(
            &policy(false, None),
            &[&ref_a, &ref_b],
            &[&cand_a, &cand_b],
        );
        assert_eq!(outcome.score, 0.5);
        assert_eq!(outcome.feedback, "1/2 regions matched");
    }

    #[test]
    fn test_candidate_without_shared_label_is_unmatched() {
        let reference = rect("regions", 0.0, 0.0, 10.0, 10.0, "Cat");
        let candidate = rect("regions", 0.0, 0.0, 10.0, 10.0, "Dog");
        let outcome =
            BoundingBoxMatcher.compare(&policy(true, None), &[&reference], &[&candidate]);
        assert_eq!(outcome.score, 0.0);
        assert_eq!(outcome.details[0].candidate, None);
    }

    #[test]
    fn test_best_iou_candidate_wins() {
        let reference = rect("regions", 0.0, 0.0, 10.0, 10.0, "Cat");
        let far = rect("regions", 8.0, 8.0, 10.0, 10.0, "Cat");
        let near = rect("regions", 1.0, 1.0, 10.0, 10.0, "Cat");
        let outcome =
            BoundingBoxMatcher.compare(&policy(true, None), &[&reference], &[&far, &near]);
        let detail = &outcome.details[0];
        assert_eq!(detail.candidate.as_deref(), Some(near.value.describe().as_str()));
    }

    #[test]
    fn test_empty_candidates_is_no_answer() {
        let reference = rect("regions", 0.0, 0.0, 10.0, 10.0, "Cat");
        let outcome = BoundingBoxMatcher.compare(&policy(true, None), &[&reference], &[]);
        assert_eq!(outcome.score, 0.0);
        assert_eq!(outcome.feedback, "No answer provided");
        assert_eq!(outcome.details.len(), 1);
    }
}
