//! # Aggregator Module
//!
//! Folds per-task scores into the aggregate result for a whole session:
//! global and per-specialty point totals, an overall percentage, and a
//! pass/fail verdict against an explicit threshold.
//!
//! The fold is purely functional and order-independent: permuting the task
//! array changes nothing in the totals, the specialty breakdown, or the
//! verdict, because sums commute and the breakdown is keyed canonically by
//! specialty name.

use std::collections::{BTreeMap, HashMap};

use util::annotation::AnnotationResult;
use util::grading_config::GradingConfig;
use util::task_catalog::Task;

use crate::scorer::score_task;
use crate::types::{SpecialtyScore, TaskScore, TestResult};

/// Aggregate all task scores for a session into one [`TestResult`].
///
/// # Arguments
/// * `tasks` - Every task of the assessment, in catalog order.
/// * `candidates_by_task` - Candidate results keyed by task id; a task with
///   no entry is scored against an empty candidate set.
/// * `elapsed_seconds` - Wall-clock session time, recorded verbatim.
/// * `passing_threshold` - Minimum overall percentage to pass (0–100).
/// * `config` - Grading configuration threaded through to the scorer.
pub fn calculate_test_results(
    tasks: &[Task],
    candidates_by_task: &HashMap<String, Vec<AnnotationResult>>,
    elapsed_seconds: u64,
    passing_threshold: f64,
    config: &GradingConfig,
) -> TestResult {
    let mut total_points = 0.0;
    let mut earned_points = 0.0;
    let mut by_specialty: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    let mut task_scores: Vec<TaskScore> = Vec::with_capacity(tasks.len());

    for task in tasks {
        let candidates = candidates_by_task
            .get(&task.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let score = score_task(task, candidates, config);

        total_points += task.max_points;
        earned_points += score.earned_points;
        let entry = by_specialty
            .entry(task.specialty.as_str())
            .or_insert((0.0, 0.0));
        entry.0 += task.max_points;
        entry.1 += score.earned_points;

        task_scores.push(score);
    }

    let percentage = if total_points > 0.0 {
        earned_points / total_points * 100.0
    } else {
        0.0
    };

    let specialties = by_specialty
        .into_iter()
        .map(|(specialty, (total, earned))| SpecialtyScore {
            specialty: specialty.to_string(),
            total_points: total,
            earned_points: earned,
            percentage: if total > 0.0 { earned / total * 100.0 } else { 0.0 },
        })
        .collect();

    TestResult {
        total_points,
        earned_points,
        percentage,
        passed: percentage >= passing_threshold,
        specialties,
        task_scores,
        elapsed_seconds,
    }
}
