//! Process-wide tuning knobs for the orchestrator.
//!
//! Loading these from a file or environment is the surrounding gateway's
//! job; this type is a plain data holder the embedder constructs and
//! passes to [`crate::Orchestrator::new`].

use serde::{Deserialize, Serialize};

/// Tuning knobs for [`crate::Orchestrator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Threshold used when a request doesn't supply its own
    /// `confidence_threshold` (or supplies `0.0`). Defaults to `0.6`.
    pub default_confidence_threshold: f64,

    /// How long the orchestrator waits after a descriptor fails every
    /// candidate before moving to the next one. Defaults to `100ms`.
    pub inter_model_backoff_millis: u64,

    /// A normalized score at or above this value short-circuits the
    /// candidate/descriptor iteration and returns immediately. Defaults
    /// to `0.8`.
    pub early_exit_threshold: f64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_confidence_threshold: 0.6,
            inter_model_backoff_millis: 100,
            early_exit_threshold: 0.8,
        }
    }
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_confidence_threshold(mut self, threshold: f64) -> Self {
        self.default_confidence_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_inter_model_backoff_millis(mut self, millis: u64) -> Self {
        self.inter_model_backoff_millis = millis;
        self
    }

    #[must_use]
    pub fn with_early_exit_threshold(mut self, threshold: f64) -> Self {
        self.early_exit_threshold = threshold;
        self
    }

    pub(crate) fn inter_model_backoff(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.inter_model_backoff_millis)
    }
}
