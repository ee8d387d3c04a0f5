//! # Task Catalog
//!
//! Typed schema for the set of scorable tasks: each task carries its
//! reference annotation set, a scoring policy, a point value, and the
//! specialty it belongs to. Catalogs are produced by an external authoring
//! tool and consumed read-only by the scoring engine.
//!
//! Errors in the catalog itself (unreadable file, malformed JSON, unknown
//! policy kind) fail fast here, before any scoring call. Anomalies in
//! *candidate* data are the scoring engine's business and never raise errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::fs;
use thiserror::Error;
use tracing::error;

use crate::annotation::AnnotationResult;

/// Errors raised while loading or saving a task catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// I/O failure (file not found, unreadable, permission denied).
    #[error("{0}")]
    Io(String),
    /// JSON is malformed or does not match the catalog schema.
    #[error("invalid catalog JSON: {0}")]
    InvalidJson(String),
}

/// Which comparison algorithm a task's reference set is scored with.
///
/// Closed set: a catalog naming an unrecognized kind is rejected at parse
/// time rather than silently scored with a default algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Classification,
    Rating,
    BoundingBoxIou,
    SpanOverlap,
}

/// External scoring policy attached to a task; never derived by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringPolicy {
    pub kind: PolicyKind,
    /// Minimum similarity for a binary match. When absent the matcher's own
    /// default applies (0.5 for bounding boxes, 0.8 for text spans).
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Award fractional scores instead of all-or-nothing matches.
    #[serde(default)]
    pub partial_credit: bool,
}

/// One scorable task: reference annotations plus policy and point value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub name: String,
    /// Category used for the per-specialty breakdown in the final result.
    pub specialty: String,
    pub max_points: f64,
    /// Ground-truth annotations, ordered; order drives deterministic
    /// tie-breaks downstream. Immutable once loaded.
    pub reference: Vec<AnnotationResult>,
    pub policy: ScoringPolicy,
    /// Labeling-tool configuration markup for the editor. Opaque to the
    /// engine, carried through untouched.
    #[serde(default)]
    pub ui_config: Option<String>,
}

/// The full catalog of tasks for one assessment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskCatalog {
    pub generated_at: DateTime<Utc>,
    pub tasks: Vec<Task>,
    pub total_points: f64,
}

impl TaskCatalog {
    pub fn recompute_total(&mut self) -> f64 {
        self.total_points = self.tasks.iter().map(|t| t.max_points).sum();
        self.total_points
    }

    pub fn new_now(tasks: Vec<Task>) -> Self {
        let mut catalog = TaskCatalog {
            generated_at: Utc::now(),
            total_points: 0.0,
            tasks,
        };
        catalog.recompute_total();
        catalog
    }

    /// Look up a task by id.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

/// Read a catalog JSON file.
pub fn load_catalog(path: &Path) -> Result<TaskCatalog, CatalogError> {
    use std::io::ErrorKind;

    // Short, standardized I/O errors
    let s = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to read task catalog {}: {e}", path.display());
            let msg = match e.kind() {
                ErrorKind::NotFound => "File not found".to_string(),
                ErrorKind::PermissionDenied => "Permission denied reading task catalog".to_string(),
                ErrorKind::InvalidData => "Catalog file is not valid UTF-8".to_string(),
                _ => format!("Failed to read task catalog ({})", e.kind()),
            };
            return Err(CatalogError::Io(msg));
        }
    };

    serde_json::from_str::<TaskCatalog>(&s).map_err(|e| CatalogError::InvalidJson(e.to_string()))
}

/// Save a catalog as pretty JSON (atomic-ish write: temp file, then rename).
pub fn save_catalog(path: &Path, catalog: &TaskCatalog) -> Result<(), CatalogError> {
    use std::io::ErrorKind;

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => {
                CatalogError::Io("Permission denied creating catalog directory".to_string())
            }
            _ => CatalogError::Io("Failed to prepare catalog directory".to_string()),
        })?;
    }

    let pretty = serde_json::to_string_pretty(catalog)
        .map_err(|e| CatalogError::InvalidJson(e.to_string()))?;

    let tmp = temp_path(path);
    {
        let mut f = fs::File::create(&tmp).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => {
                CatalogError::Io("Permission denied creating temp file".to_string())
            }
            _ => CatalogError::Io("Failed to create temp file".to_string()),
        })?;
        f.write_all(pretty.as_bytes())
            .map_err(|_| CatalogError::Io("Failed to write temp file".to_string()))?;
        f.flush()
            .map_err(|_| CatalogError::Io("Failed to flush temp file".to_string()))?;
    }
    fs::rename(&tmp, path)
        .map_err(|_| CatalogError::Io("Failed to move temp file into place".to_string()))
}

fn temp_path(final_path: &Path) -> PathBuf {
    let mut tmp = final_path.to_path_buf();
    let fname = final_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("catalog.json");
    tmp.set_file_name(format!("{fname}.tmp"));
    tmp
}
