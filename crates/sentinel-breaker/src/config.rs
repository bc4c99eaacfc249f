//! Configuration for a single model's circuit breaker.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Thresholds and timeouts governing one model's circuit breaker.
///
/// Carried on the model's descriptor in the registry crate, so each model
/// can be tuned independently — a flaky classification endpoint and a
/// rock-solid one shouldn't share a trip threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakerConfig {
    /// Consecutive failures (from CLOSED) before the breaker trips to OPEN.
    pub failure_threshold: u32,
    /// Consecutive successes (from HALF_OPEN) before the breaker closes.
    pub success_threshold: u32,
    /// Initial/minimum backoff once OPEN. Also the value `reset()` restores.
    pub base_timeout: Duration,
    /// Ceiling the exponential backoff is clamped to.
    pub max_timeout: Duration,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            success_threshold: 2,
            base_timeout: Duration::from_secs(30),
            max_timeout: Duration::from_secs(300),
        }
    }
}

impl BreakerConfig {
    /// Builder-style constructor, matching the `with_*` convention used
    /// throughout this codebase's config types.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_failure_threshold(mut self, n: u32) -> Self {
        self.failure_threshold = n;
        self
    }

    #[must_use]
    pub fn with_success_threshold(mut self, n: u32) -> Self {
        self.success_threshold = n;
        self
    }

    #[must_use]
    pub fn with_base_timeout(mut self, d: Duration) -> Self {
        self.base_timeout = d;
        self
    }

    #[must_use]
    pub fn with_max_timeout(mut self, d: Duration) -> Self {
        self.max_timeout = d;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BreakerConfig::default();
        assert_eq!(config.failure_threshold, 5);
        assert_eq!(config.success_threshold, 2);
        assert!(config.base_timeout <= config.max_timeout);
    }

    #[test]
    fn test_builder() {
        let config = BreakerConfig::new()
            .with_failure_threshold(3)
            .with_base_timeout(Duration::from_secs(10));
        assert_eq!(config.failure_threshold, 3);
        assert_eq!(config.base_timeout, Duration::from_secs(10));
    }
}
