//! # Grade Report Module
//!
//! Serializable envelope for returning grading results to API consumers.
//! Wraps a [`TestResult`] with a generation timestamp and the standard
//! `success`/`message` response fields, so presentation layers receive one
//! consistent shape.
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "Grading complete.",
//!   "data": {
//!     "generated_at": "...",
//!     "result": {
//!       "total_points": 30.0,
//!       "earned_points": 25.5,
//!       "percentage": 85.0,
//!       "passed": true,
//!       "specialties": [ ... ],
//!       "task_scores": [ ... ],
//!       "elapsed_seconds": 540
//!     }
//!   }
//! }
//! ```

use chrono::Utc;
use serde::Serialize;

use crate::types::TestResult;

/// The final report generated for one grading session.
#[derive(Debug, Serialize)]
pub struct GradeReport {
    /// RFC 3339 timestamp of when the report was generated.
    pub generated_at: String,
    /// The aggregate result with per-task and per-specialty breakdowns.
    pub result: TestResult,
}

/// Build a report for a computed result, stamped with the current time.
pub fn generate_grade_report(result: TestResult) -> GradeReport {
    GradeReport {
        generated_at: Utc::now().to_rfc3339(),
        result,
    }
}

/// The API response envelope for grading results.
#[derive(Debug, Serialize)]
pub struct GradeReportResponse {
    /// Indicates the grading was successful.
    success: bool,
    /// A human-readable message for the client.
    message: String,
    /// The detailed grade report.
    data: GradeReport,
}

impl From<GradeReport> for GradeReportResponse {
    fn from(report: GradeReport) -> Self {
        GradeReportResponse {
            success: true,
            message: "Grading complete.".to_string(),
            data: report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SpecialtyScore;
    use chrono::DateTime;
    use serde_json::Value;

    fn sample_result() -> TestResult {
        TestResult {
            total_points: 20.0,
            earned_points: 15.0,
            percentage: 75.0,
            passed: true,
            specialties: vec![SpecialtyScore {
                specialty: "radiology".to_string(),
                total_points: 20.0,
                earned_points: 15.0,
                percentage: 75.0,
            }],
            task_scores: vec![],
            elapsed_seconds: 300,
        }
    }

    #[test]
    fn test_response_serialization_shape() {
        let response: GradeReportResponse = generate_grade_report(sample_result()).into();
        let value: Value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Grading complete.");
        assert_eq!(value["data"]["result"]["total_points"], 20.0);
        assert_eq!(value["data"]["result"]["earned_points"], 15.0);
        assert_eq!(value["data"]["result"]["passed"], true);
        assert_eq!(
            value["data"]["result"]["specialties"][0]["specialty"],
            "radiology"
        );
        assert_eq!(value["data"]["result"]["elapsed_seconds"], 300);
    }

    #[test]
    fn test_generated_at_is_rfc3339() {
        let report = generate_grade_report(sample_result());
        assert!(DateTime::parse_from_rfc3339(&report.generated_at).is_ok());
    }
}
