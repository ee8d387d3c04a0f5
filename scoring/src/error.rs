//! Scoring Error Types
//!
//! Errors here cover the orchestration boundary only: a caller wiring
//! candidate sets to tasks that do not exist, or handing over candidate JSON
//! that does not parse. Anomalies *inside* well-formed candidate data
//! (missing annotations, malformed ratings) are never errors — they score 0
//! with explanatory feedback, because a human taking an assessment must
//! always receive a score rather than a hard failure.

use thiserror::Error;

/// Errors raised by the grading orchestration.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// A candidate set references a task id that is not in the catalog.
    #[error("unknown task id '{0}' in candidate set")]
    UnknownTask(String),
    /// Candidate payload JSON does not match the annotation result shape.
    #[error("invalid candidate payload: {0}")]
    InvalidCandidate(String),
}
