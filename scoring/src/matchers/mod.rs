//! # Matchers
//!
//! Type-specific comparison algorithms for evaluating candidate annotations
//! against a reference group. Geometric and interval similarity cannot share
//! one formula with set or numeric similarity, so each annotation kind gets
//! its own strategy — but all four implement the [`Matcher`] trait and
//! return the same normalized `[0,1]` contract, which keeps the scorer
//! type-agnostic.
//!
//! The available matchers are:
//! - [`choice_matcher`]: set comparison over closed choice sets.
//! - [`rating_matcher`]: numeric distance on the fixed 1–5 rating scale.
//! - [`bounding_box_matcher`]: rectangle intersection-over-union.
//! - [`text_span_matcher`]: 1-D interval Jaccard over labeled text spans.
//!
//! [`Matcher`]: crate::traits::matcher::Matcher

pub mod bounding_box_matcher;
pub mod choice_matcher;
pub mod rating_matcher;
pub mod text_span_matcher;

/// Literal feedback for a control the candidate never answered.
pub(crate) const NO_ANSWER_FEEDBACK: &str = "No answer provided";
