use crate::types::MatchOutcome;
use util::annotation::AnnotationResult;
use util::task_catalog::ScoringPolicy;

/// Matcher is a strategy trait for comparing one control group of candidate
/// annotations against the corresponding reference group.
///
/// Every implementation returns a [`MatchOutcome`] with a normalized score in
/// [0,1] plus diagnostics, so the scorer stays type-agnostic. Implementations
/// must not panic or error on candidate data: an empty candidate group scores
/// 0 with the literal feedback `"No answer provided"`, and a malformed
/// payload scores 0 with feedback naming the problem.
pub trait Matcher: Send + Sync {
    /// Compare one control group, producing a normalized outcome.
    ///
    /// - `policy`: the task's scoring policy (threshold, partial credit).
    /// - `references`: reference items of this control group, in catalog order.
    /// - `candidates`: candidate items resolved for this group (possibly empty).
    fn compare(
        &self,
        policy: &ScoringPolicy,
        references: &[&AnnotationResult],
        candidates: &[&AnnotationResult],
    ) -> MatchOutcome;
}
