//! # Scoring Library
//!
//! Core logic for comparing candidate annotations against reference
//! annotations and computing normalized agreement scores. It backs the
//! annotator skill-certification exam and the platform's QA machinery
//! (honeypot tasks, consensus checks, IoU-based region agreement).
//!
//! ## Key Concepts
//! - **GradingJob**: the main struct tying a task catalog, a grading
//!   configuration, and one session's candidate results together.
//! - **Matchers**: type-specific comparison strategies (choice sets,
//!   ratings, bounding boxes, text spans), all returning the same
//!   normalized `[0,1]` contract.
//! - **Scorer**: per-task orchestration — grouping, matcher dispatch, and
//!   the unweighted group mean.
//! - **Aggregator**: folds task scores into totals, a specialty breakdown,
//!   and a pass/fail verdict.
//!
//! The pipeline is synchronous and pure: no I/O, no shared mutable state,
//! and identical inputs always produce identical results. Scoring different
//! tasks is independent, so callers may fan tasks out across threads and
//! fold the results without coordination.

pub mod aggregator;
pub mod error;
pub mod grouping;
pub mod matchers;
pub mod report;
pub mod scorer;
pub mod traits;
pub mod types;

use std::collections::HashMap;

use util::annotation::AnnotationResult;
use util::grading_config::{ControlMatching, GradingConfig};
use util::task_catalog::TaskCatalog;

use crate::aggregator::calculate_test_results;
use crate::error::ScoringError;
use crate::report::{GradeReportResponse, generate_grade_report};

/// Represents a grading job for one assessment session.
///
/// Encapsulates the task catalog and the grading configuration; candidate
/// results are supplied per call so one job can grade many sessions.
pub struct GradingJob {
    catalog: TaskCatalog,
    config: GradingConfig,
}

impl GradingJob {
    /// Create a grading job with the default configuration.
    pub fn new(catalog: TaskCatalog) -> Self {
        Self {
            catalog,
            config: GradingConfig::default(),
        }
    }

    /// Replace the whole grading configuration.
    pub fn with_config(mut self, config: GradingConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the passing threshold (percentage, 0–100).
    pub fn with_passing_threshold(mut self, threshold: f64) -> Self {
        self.config.passing_threshold = threshold;
        self
    }

    /// Override the control-matching mode.
    pub fn with_control_matching(mut self, matching: ControlMatching) -> Self {
        self.config.control_matching = matching;
        self
    }

    /// Parse a candidate result array as submitted by the annotation editor.
    pub fn candidates_from_json(json: &str) -> Result<Vec<AnnotationResult>, ScoringError> {
        serde_json::from_str(json).map_err(|e| ScoringError::InvalidCandidate(e.to_string()))
    }

    /// Grade one session and wrap the result in the report envelope.
    ///
    /// # Arguments
    /// * `candidates_by_task` - Candidate results keyed by task id. Tasks
    ///   with no entry score zero; an entry for a task id not in the catalog
    ///   is a caller wiring error and fails the call.
    /// * `elapsed_seconds` - Wall-clock session time, recorded verbatim.
    pub fn grade(
        &self,
        candidates_by_task: &HashMap<String, Vec<AnnotationResult>>,
        elapsed_seconds: u64,
    ) -> Result<GradeReportResponse, ScoringError> {
        for task_id in candidates_by_task.keys() {
            if self.catalog.task(task_id).is_none() {
                return Err(ScoringError::UnknownTask(task_id.clone()));
            }
        }

        let result = calculate_test_results(
            &self.catalog.tasks,
            candidates_by_task,
            elapsed_seconds,
            self.config.passing_threshold,
            &self.config,
        );
        Ok(generate_grade_report(result).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use util::annotation::ResultValue;
    use util::task_catalog::{PolicyKind, ScoringPolicy, Task};

    fn choices(from_name: &str, values: &[&str]) -> AnnotationResult {
        AnnotationResult {
            from_name: from_name.to_string(),
            to_name: "field".to_string(),
            value: ResultValue::Choices {
                choices: values.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    fn policy(kind: PolicyKind, partial_credit: bool) -> ScoringPolicy {
        ScoringPolicy {
            kind,
            threshold: None,
            partial_credit,
        }
    }

    /// A catalog covering all four matcher kinds, one task each.
    fn full_catalog() -> TaskCatalog {
        TaskCatalog::new_now(vec![
            Task {
                id: "classify".to_string(),
                name: "Classify the image".to_string(),
                specialty: "radiology".to_string(),
                max_points: 10.0,
                reference: vec![choices("diagnosis", &["Cat"])],
                policy: policy(PolicyKind::Classification, false),
                ui_config: None,
            },
            Task {
                id: "rate".to_string(),
                name: "Rate image quality".to_string(),
                specialty: "radiology".to_string(),
                max_points: 5.0,
                reference: vec![AnnotationResult {
                    from_name: "quality".to_string(),
                    to_name: "image".to_string(),
                    value: ResultValue::Rating { rating: Some(4.0) },
                }],
                policy: policy(PolicyKind::Rating, true),
                ui_config: None,
            },
            Task {
                id: "box".to_string(),
                name: "Box the lesion".to_string(),
                specialty: "pathology".to_string(),
                max_points: 10.0,
                reference: vec![AnnotationResult {
                    from_name: "regions".to_string(),
                    to_name: "image".to_string(),
                    value: ResultValue::Rectangle {
                        x: 10.0,
                        y: 5.0,
                        width: 80.0,
                        height: 90.0,
                        labels: vec!["Lesion".to_string()],
                    },
                }],
                policy: policy(PolicyKind::BoundingBoxIou, true),
                ui_config: None,
            },
            Task {
                id: "spans".to_string(),
                name: "Mark the findings".to_string(),
                specialty: "pathology".to_string(),
                max_points: 10.0,
                reference: vec![AnnotationResult {
                    from_name: "entities".to_string(),
                    to_name: "text".to_string(),
                    value: ResultValue::TextSpan {
                        start: 4,
                        end: 12,
                        labels: vec!["Finding".to_string()],
                        text: None,
                    },
                }],
                policy: policy(PolicyKind::SpanOverlap, true),
                ui_config: None,
            },
        ])
    }

    fn reference_candidates(catalog: &TaskCatalog) -> HashMap<String, Vec<AnnotationResult>> {
        catalog
            .tasks
            .iter()
            .map(|t| (t.id.clone(), t.reference.clone()))
            .collect()
    }

    #[test]
    fn test_self_match_earns_full_marks_for_every_kind() {
        let catalog = full_catalog();
        let candidates = reference_candidates(&catalog);
        let job = GradingJob::new(catalog);

        let response = job.grade(&candidates, 60).unwrap();
        let value: Value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], true);
        let result = &value["data"]["result"];
        assert_eq!(result["percentage"], 100.0);
        assert_eq!(result["passed"], true);
        for score in result["task_scores"].as_array().unwrap() {
            assert_eq!(score["earned_points"], score["max_points"]);
        }
    }

    #[test]
    fn test_empty_session_scores_zero_and_fails() {
        let job = GradingJob::new(full_catalog());
        let response = job.grade(&HashMap::new(), 0).unwrap();
        let value: Value = serde_json::to_value(&response).unwrap();

        let result = &value["data"]["result"];
        assert_eq!(result["earned_points"], 0.0);
        assert_eq!(result["passed"], false);
        for score in result["task_scores"].as_array().unwrap() {
            assert!(!score["feedback"].as_str().unwrap().is_empty());
        }
    }

    #[test]
    fn test_specialty_breakdown_in_envelope() {
        let catalog = full_catalog();
        let mut candidates = reference_candidates(&catalog);
        // Drop both pathology tasks.
        candidates.remove("box");
        candidates.remove("spans");
        let job = GradingJob::new(catalog);

        let response = job.grade(&candidates, 45).unwrap();
        let value: Value = serde_json::to_value(&response).unwrap();

        let specialties = value["data"]["result"]["specialties"].as_array().unwrap();
        assert_eq!(specialties.len(), 2);
        assert_eq!(specialties[0]["specialty"], "pathology");
        assert_eq!(specialties[0]["earned_points"], 0.0);
        assert_eq!(specialties[1]["specialty"], "radiology");
        assert_eq!(specialties[1]["percentage"], 100.0);
    }

    #[test]
    fn test_unknown_task_id_is_an_error() {
        let job = GradingJob::new(full_catalog());
        let mut candidates = HashMap::new();
        candidates.insert("ghost".to_string(), vec![choices("diagnosis", &["Cat"])]);

        match job.grade(&candidates, 10) {
            Err(ScoringError::UnknownTask(id)) => assert_eq!(id, "ghost"),
            other => panic!("expected UnknownTask, got {other:?}"),
        }
    }

    #[test]
    fn test_passing_threshold_override() {
        let catalog = full_catalog();
        let mut candidates = reference_candidates(&catalog);
        candidates.remove("box");
        candidates.remove("spans");
        // 15 of 35 points: ~42.9%.
        let job = GradingJob::new(catalog).with_passing_threshold(40.0);

        let response = job.grade(&candidates, 45).unwrap();
        let value: Value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["data"]["result"]["passed"], true);
    }

    #[test]
    fn test_candidates_from_json_round_trip() {
        let json = r#"[
            {
                "from_name": "diagnosis",
                "to_name": "image",
                "type": "choices",
                "value": { "choices": ["Cat"] }
            }
        ]"#;
        let candidates = GradingJob::candidates_from_json(json).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].from_name, "diagnosis");
    }

    #[test]
    fn test_candidates_from_json_rejects_malformed_payload() {
        let err = GradingJob::candidates_from_json("{\"not\": \"an array\"}").unwrap_err();
        assert!(matches!(err, ScoringError::InvalidCandidate(_)));
    }
}
