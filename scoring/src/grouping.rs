//! # Result Grouping
//!
//! Groups annotation results by the control that produced them
//! (`from_name`), preserving first-appearance order of groups and original
//! order within each group so downstream tie-breaks stay deterministic. The
//! same grouping is applied to candidate and reference sets.

use tracing::debug;
use util::annotation::{AnnotationResult, ResultKind};
use util::grading_config::ControlMatching;

/// All results produced by one labeling control.
#[derive(Debug)]
pub struct ResultGroup<'a> {
    pub from_name: &'a str,
    pub results: Vec<&'a AnnotationResult>,
}

/// Group results by `from_name`, keeping input order on both levels.
pub fn group_by_from_name(results: &[AnnotationResult]) -> Vec<ResultGroup<'_>> {
    let mut groups: Vec<ResultGroup> = Vec::new();
    for result in results {
        match groups.iter_mut().find(|g| g.from_name == result.from_name) {
            Some(group) => group.results.push(result),
            None => groups.push(ResultGroup {
                from_name: &result.from_name,
                results: vec![result],
            }),
        }
    }
    groups
}

/// Resolve the candidate group for one reference control.
///
/// An exact `from_name` match always wins. In [`ControlMatching::Lenient`]
/// mode, when no exact group exists but exactly one candidate result shares
/// the reference's kind, that single result stands in as a one-element
/// group; with zero or several same-kind candidates the control counts as
/// unanswered. [`ControlMatching::Strict`] skips the fallback entirely.
pub fn resolve_candidate_group<'a>(
    candidate_groups: &[ResultGroup<'a>],
    all_candidates: &'a [AnnotationResult],
    from_name: &str,
    kind: ResultKind,
    matching: ControlMatching,
) -> Vec<&'a AnnotationResult> {
    if let Some(group) = candidate_groups.iter().find(|g| g.from_name == from_name) {
        return group.results.clone();
    }

    if matching == ControlMatching::Strict {
        return Vec::new();
    }

    let same_kind: Vec<&AnnotationResult> = all_candidates
        .iter()
        .filter(|r| r.value.kind() == kind)
        .collect();
    if same_kind.len() == 1 {
        debug!(
            control = from_name,
            "no candidate group under control name; using the single same-typed result"
        );
        return same_kind;
    }

    Vec::new()
}
