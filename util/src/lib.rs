//! Shared configuration and catalog layer for the annotation scoring engine.
//!
//! This crate owns the data contracts that exist *before* any scoring call:
//! the typed annotation result model ([`annotation`]), the task catalog with
//! its JSON load/save helpers ([`task_catalog`]), and the grading
//! configuration ([`grading_config`]). The `scoring` crate consumes these
//! types and never defines its own copies of them.

pub mod annotation;
pub mod grading_config;
pub mod task_catalog;
