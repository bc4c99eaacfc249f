//! Async-safe handle around a [`BreakerState`], one per model.

use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::BreakerConfig;
use crate::error::BreakerError;
use crate::stats::BreakerStats;
use crate::state::{BreakerState, CircuitState};

/// Per-model circuit breaker.
///
/// All mutation goes through a single `tokio::sync::Mutex`, so admission and
/// recording are linearizable per model even when multiple orchestrator
/// tasks race to call the same provider concurrently.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    config: BreakerConfig,
    inner: Mutex<BreakerState>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, config: BreakerConfig) -> Self {
        let name = name.into();
        let inner = Mutex::new(BreakerState::new(&config));
        Self {
            name,
            config,
            inner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &BreakerConfig {
        &self.config
    }

    /// Ask whether a call should be admitted. On rejection, the caller must
    /// treat this as "skip this model" without recording it as a failure.
    pub async fn allow(&self) -> Result<(), BreakerError> {
        let mut state = self.inner.lock().await;
        let was_open = state.state == CircuitState::Open;
        match state.allow() {
            Ok(()) => {
                if was_open {
                    debug!(model = %self.name, "breaker transitioned to half-open, admitting probe");
                }
                Ok(())
            }
            Err(retry_after) => Err(BreakerError::CircuitOpen {
                model: self.name.clone(),
                retry_after_millis: retry_after.as_millis() as u64,
            }),
        }
    }

    pub async fn record_success(&self) {
        let mut state = self.inner.lock().await;
        state.record_success(&self.config);
    }

    pub async fn record_failure(&self) {
        let mut state = self.inner.lock().await;
        let was_open_after = state.state != CircuitState::Open;
        state.record_failure(&self.config);
        if was_open_after && state.state == CircuitState::Open {
            warn!(
                model = %self.name,
                backoff_ms = state.current_backoff.as_millis(),
                "circuit breaker tripped open"
            );
        }
    }

    /// Force the breaker back to CLOSED (operational surface).
    pub async fn reset(&self) {
        let mut state = self.inner.lock().await;
        state.reset(&self.config);
    }

    pub async fn is_open(&self) -> bool {
        self.inner.lock().await.state == CircuitState::Open
    }

    pub async fn stats(&self) -> BreakerStats {
        let state = self.inner.lock().await;
        BreakerStats {
            name: self.name.clone(),
            state: state.state,
            consecutive_failures: state.consecutive_failures,
            consecutive_successes: state.consecutive_successes,
            last_failure_age_millis: state
                .last_failure_at
                .map(|t| t.elapsed().as_millis() as u64),
            timeout_duration: state.current_backoff,
            total_requests: state.total_requests,
            successful_requests: state.successful_requests,
            failed_requests: state.failed_requests,
            success_rate: state.success_rate(),
            is_open: state.state == CircuitState::Open,
        }
    }

    /// How long until an OPEN breaker will next admit a probe, or `None` if
    /// it isn't OPEN or hasn't recorded a failure yet.
    pub async fn retry_after(&self) -> Option<Duration> {
        let state = self.inner.lock().await;
        if state.state != CircuitState::Open {
            return None;
        }
        let elapsed = state.last_failure_at?.elapsed();
        Some(state.current_backoff.saturating_sub(elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_allow_admits_when_closed() {
        let breaker = CircuitBreaker::new("gpt-guard", BreakerConfig::default());
        assert!(breaker.allow().await.is_ok());
    }

    #[tokio::test]
    async fn test_trips_and_rejects() {
        let config = BreakerConfig::new().with_failure_threshold(2);
        let breaker = CircuitBreaker::new("flaky-model", config);
        breaker.allow().await.unwrap();
        breaker.record_failure().await;
        breaker.allow().await.unwrap();
        breaker.record_failure().await;

        let err = breaker.allow().await.unwrap_err();
        match err {
            BreakerError::CircuitOpen { model, .. } => assert_eq!(model, "flaky-model"),
            other => panic!("expected CircuitOpen, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reset_reopens_admission() {
        let config = BreakerConfig::new().with_failure_threshold(1);
        let breaker = CircuitBreaker::new("m", config);
        breaker.allow().await.unwrap();
        breaker.record_failure().await;
        assert!(breaker.allow().await.is_err());

        breaker.reset().await;
        assert!(breaker.allow().await.is_ok());
        assert!(!breaker.is_open().await);
    }

    #[tokio::test]
    async fn test_stats_reflect_counts() {
        let breaker = CircuitBreaker::new("m", BreakerConfig::default());
        breaker.allow().await.unwrap();
        breaker.record_success().await;
        breaker.allow().await.unwrap();
        breaker.record_failure().await;

        let stats = breaker.stats().await;
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.successful_requests, 1);
        assert_eq!(stats.failed_requests, 1);
        assert_eq!(stats.success_rate, 0.5);
    }
}
