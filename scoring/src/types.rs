//! # Types Module
//!
//! Score value types shared across the engine: the matcher contract output,
//! per-reference diagnostic rows, per-task scores, and the aggregate result.
//! Every value here is constructed fresh per scoring call and never mutated
//! afterwards.

use serde::Serialize;

/// One diagnostic row per reference item: what was expected, what the best
/// candidate was (if any), and whether it counted as a match.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreDetail {
    /// Descriptor of the expected reference item.
    pub expected: String,
    /// Descriptor of the candidate item matched against it, if any.
    pub candidate: Option<String>,
    pub matched: bool,
    /// Similarity in [0,1] when the matcher computes one (IoU, overlap, ...).
    pub partial_score: Option<f64>,
}

/// Output of one matcher invocation over a single control group.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Normalized score in [0,1].
    pub score: f64,
    /// Human-readable explanation of what matched and by how much.
    pub feedback: String,
    pub details: Vec<ScoreDetail>,
}

/// The score for one task, computed fresh per scoring call.
#[derive(Debug, Clone, Serialize)]
pub struct TaskScore {
    pub task_id: String,
    pub max_points: f64,
    /// Points earned, rounded to one decimal place.
    pub earned_points: f64,
    /// Mean group score as a percentage (0–100).
    pub percentage: f64,
    pub feedback: String,
    pub details: Vec<ScoreDetail>,
}

/// Per-specialty score breakdown inside a [`TestResult`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpecialtyScore {
    pub specialty: String,
    pub total_points: f64,
    pub earned_points: f64,
    pub percentage: f64,
}

/// Aggregate result over all tasks of a session. Built once at session end.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub total_points: f64,
    pub earned_points: f64,
    pub percentage: f64,
    pub passed: bool,
    /// Breakdown per specialty, in canonical (name-sorted) order.
    pub specialties: Vec<SpecialtyScore>,
    pub task_scores: Vec<TaskScore>,
    pub elapsed_seconds: u64,
}
