//! # Scorer Module
//!
//! Orchestrates one task's comparison: groups reference and candidate
//! results by control, resolves a candidate group for each reference group,
//! dispatches to the matcher the task's policy names, and folds the group
//! scores into a per-task score.
//!
//! Group scores combine as an unweighted arithmetic mean: each control group
//! counts equally regardless of how many items it contains. That is a
//! deliberate simplicity-over-precision policy, not an oversight.

use tracing::{debug, warn};
use util::annotation::{AnnotationResult, ResultKind};
use util::grading_config::GradingConfig;
use util::task_catalog::{PolicyKind, Task};

use crate::grouping::{group_by_from_name, resolve_candidate_group};
use crate::matchers::bounding_box_matcher::BoundingBoxMatcher;
use crate::matchers::choice_matcher::ChoiceMatcher;
use crate::matchers::rating_matcher::RatingMatcher;
use crate::matchers::text_span_matcher::TextSpanMatcher;
use crate::traits::matcher::Matcher;
use crate::types::TaskScore;

/// Round a float to one decimal place.
///
/// Uses the common multiply / round / divide trick. Kept local to this module
/// so it's cheap to inline and obvious where rounding is happening.
#[inline]
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Score one task's candidate results against its reference set.
///
/// # Arguments
/// * `task` - The task definition (reference set, policy, point value).
/// * `candidates` - Candidate results produced for this task; may be empty.
/// * `config` - Grading configuration governing control-name matching.
///
/// # Behavior
/// 1. Reference and candidate sets are grouped by `from_name`; candidate
///    groups resolve per the configured [`ControlMatching`] policy.
/// 2. Each reference group dispatches on the task's policy kind, except that
///    a group whose items are ratings always goes to the rating matcher —
///    an explicit rule, since rating references occur inside tasks labeled
///    with other policies.
/// 3. Group scores fold into an unweighted mean; zero reference groups mean
///    a score of 0, never NaN.
///
/// [`ControlMatching`]: util::grading_config::ControlMatching
pub fn score_task(task: &Task, candidates: &[AnnotationResult], config: &GradingConfig) -> TaskScore {
    let reference_groups = group_by_from_name(&task.reference);
    let candidate_groups = group_by_from_name(candidates);

    for group in &candidate_groups {
        if !reference_groups.iter().any(|g| g.from_name == group.from_name) {
            warn!(
                task_id = %task.id,
                control = group.from_name,
                "candidate control has no counterpart in the reference set; ignoring"
            );
        }
    }

    let mut score_sum = 0.0;
    let mut feedback_parts: Vec<String> = Vec::new();
    let mut details = Vec::new();

    for group in &reference_groups {
        let kind = group.results[0].value.kind();
        let group_candidates = resolve_candidate_group(
            &candidate_groups,
            candidates,
            group.from_name,
            kind,
            config.control_matching,
        );

        let outcome = match (kind, task.policy.kind) {
            (ResultKind::Rating, _) => {
                RatingMatcher.compare(&task.policy, &group.results, &group_candidates)
            }
            (_, PolicyKind::Classification) => {
                ChoiceMatcher.compare(&task.policy, &group.results, &group_candidates)
            }
            (_, PolicyKind::Rating) => {
                RatingMatcher.compare(&task.policy, &group.results, &group_candidates)
            }
            (_, PolicyKind::BoundingBoxIou) => {
                BoundingBoxMatcher.compare(&task.policy, &group.results, &group_candidates)
            }
            (_, PolicyKind::SpanOverlap) => {
                TextSpanMatcher.compare(&task.policy, &group.results, &group_candidates)
            }
        };

        score_sum += outcome.score;
        if !outcome.feedback.is_empty() {
            feedback_parts.push(outcome.feedback);
        }
        details.extend(outcome.details);
    }

    let mean = if reference_groups.is_empty() {
        0.0
    } else {
        score_sum / reference_groups.len() as f64
    };

    debug!(task_id = %task.id, score = mean, "scored task");

    TaskScore {
        task_id: task.id.clone(),
        max_points: task.max_points,
        earned_points: round1(mean * task.max_points),
        percentage: mean * 100.0,
        feedback: feedback_parts.join("; "),
        details,
    }
}
