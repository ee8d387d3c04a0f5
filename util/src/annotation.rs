//! # Annotation Result Model
//!
//! Typed representation of a single annotated value as produced by the
//! labeling editor. Each result is tagged with the labeling control that
//! produced it (`from_name`) and the input field it annotates (`to_name`);
//! several results may share one `from_name` (e.g. multiple boxes drawn with
//! one rectangle tool).
//!
//! The payload is a closed tagged union: the `type` tag fully determines the
//! shape of `value`, and every place that branches on it does so with an
//! exhaustive `match`. Adding a new annotation kind is a compile-time-checked
//! change.

use serde::{Deserialize, Serialize};

/// One annotated value, linked to the control and input field that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnotationResult {
    /// Name of the labeling control that produced this result.
    pub from_name: String,
    /// Name of the input field this result annotates.
    pub to_name: String,
    /// The typed payload, tagged on the wire as `{"type": ..., "value": {...}}`.
    #[serde(flatten)]
    pub value: ResultValue,
}

/// The typed payload of an [`AnnotationResult`].
///
/// Serialized adjacently tagged, matching the wire shape emitted by the
/// annotation editor:
///
/// ```json
/// { "type": "rectangle", "value": { "x": 10.0, "y": 5.0, "width": 80.0, "height": 90.0, "labels": ["Cat"] } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ResultValue {
    /// A selection from a closed choice set.
    Choices { choices: Vec<String> },
    /// A numeric rating on a fixed 1–5 scale. `None` models a payload that
    /// lacks its numeric field; the rating matcher scores it as invalid
    /// rather than rejecting the submission.
    Rating {
        #[serde(default)]
        rating: Option<f64>,
    },
    /// An axis-aligned labeled rectangle in percentage-of-image units.
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        labels: Vec<String>,
    },
    /// A labeled half-open character range `[start, end)` over a text field.
    TextSpan {
        start: usize,
        end: usize,
        labels: Vec<String>,
        #[serde(default)]
        text: Option<String>,
    },
}

/// Fieldless discriminant of [`ResultValue`], used for type-based candidate
/// fallback and for routing rating references to the rating matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Choices,
    Rating,
    Rectangle,
    TextSpan,
}

impl ResultValue {
    /// The discriminant of this payload.
    pub fn kind(&self) -> ResultKind {
        match self {
            ResultValue::Choices { .. } => ResultKind::Choices,
            ResultValue::Rating { .. } => ResultKind::Rating,
            ResultValue::Rectangle { .. } => ResultKind::Rectangle,
            ResultValue::TextSpan { .. } => ResultKind::TextSpan,
        }
    }

    /// Short human-readable descriptor used in diagnostic score rows.
    pub fn describe(&self) -> String {
        match self {
            ResultValue::Choices { choices } => format!("choices [{}]", choices.join(", ")),
            ResultValue::Rating { rating } => match rating {
                Some(r) => format!("rating {r}"),
                None => "rating ?".to_string(),
            },
            ResultValue::Rectangle {
                x,
                y,
                width,
                height,
                labels,
            } => format!(
                "rect {width:.1}x{height:.1} at ({x:.1},{y:.1}) [{}]",
                labels.join(", ")
            ),
            ResultValue::TextSpan {
                start, end, labels, ..
            } => format!("span [{start}..{end}) [{}]", labels.join(", ")),
        }
    }
}
