//! # Grading Configuration
//!
//! Policy values the scoring engine accepts as parameters rather than
//! hard-coding: the overall passing threshold and the control-matching mode.
//! Deserializable with per-field defaults so partial configs stay valid, and
//! loadable once from the environment for binaries that want env-driven
//! setup.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::env;

/// How candidate result groups are matched to reference controls.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ControlMatching {
    /// If no candidate group exists under a reference's exact control name
    /// but exactly one candidate result shares the reference's type, use it
    /// as a one-element fallback group. Compensates for minor tool/config
    /// naming mismatches.
    Lenient,
    /// Require exact control-name matches; a name mismatch scores as a
    /// missing annotation.
    Strict,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GradingConfig {
    /// Minimum overall percentage required to pass (0–100).
    #[serde(default = "default_passing_threshold")]
    pub passing_threshold: f64,

    #[serde(default = "default_control_matching")]
    pub control_matching: ControlMatching,
}

fn default_passing_threshold() -> f64 {
    70.0
}

fn default_control_matching() -> ControlMatching {
    ControlMatching::Lenient
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            passing_threshold: default_passing_threshold(),
            control_matching: default_control_matching(),
        }
    }
}

static CONFIG: OnceCell<GradingConfig> = OnceCell::new();

impl GradingConfig {
    /// The built-in defaults (passing threshold 70, lenient matching).
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Build a config from `PASSING_THRESHOLD` and `CONTROL_MATCHING`
    /// environment variables, falling back to defaults. Loads `.env` first
    /// if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let passing_threshold = env::var("PASSING_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_passing_threshold);

        let control_matching = match env::var("CONTROL_MATCHING").ok().as_deref() {
            Some("strict") => ControlMatching::Strict,
            _ => ControlMatching::Lenient,
        };

        GradingConfig {
            passing_threshold,
            control_matching,
        }
    }

    /// Initialize the process-wide config from the environment, once.
    pub fn init_from_env() -> &'static Self {
        CONFIG.get_or_init(Self::from_env)
    }
}
