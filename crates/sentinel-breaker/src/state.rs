//! The three-state machine itself, decoupled from the mutex/async wrapper
//! in [`crate::breaker`] so the transition rules can be unit-tested
//! without a runtime.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::config::BreakerConfig;

/// CLOSED admits everything; OPEN fast-fails; HALF_OPEN lets one probe
/// through at a time to test recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

/// Mutable breaker state.
///
/// Lives behind a `tokio::sync::Mutex` in [`crate::breaker::CircuitBreaker`];
/// every method here assumes exclusive access and is plain synchronous code.
#[derive(Debug, Clone)]
pub struct BreakerState {
    pub state: CircuitState,
    pub consecutive_failures: u32,
    pub consecutive_successes: u32,
    pub last_failure_at: Option<Instant>,
    pub current_backoff: Duration,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
}

impl BreakerState {
    pub fn new(config: &BreakerConfig) -> Self {
        Self {
            state: CircuitState::Closed,
            consecutive_failures: 0,
            consecutive_successes: 0,
            last_failure_at: None,
            current_backoff: config.base_timeout,
            total_requests: 0,
            successful_requests: 0,
            failed_requests: 0,
        }
    }

    /// Admission decision. Returns `Ok(())` to admit, or `Err(retry_after)`
    /// carrying how long until OPEN will next admit a probe.
    ///
    /// Mutates `state`/`consecutive_successes` on the OPEN→HALF_OPEN
    /// transition; always increments `total_requests` on admission.
    pub fn allow(&mut self) -> Result<(), Duration> {
        match self.state {
            CircuitState::Closed | CircuitState::HalfOpen => {
                self.total_requests += 1;
                Ok(())
            }
            CircuitState::Open => {
                let elapsed = self
                    .last_failure_at
                    .map(|t| t.elapsed())
                    .unwrap_or(Duration::MAX);
                if elapsed > self.current_backoff {
                    self.state = CircuitState::HalfOpen;
                    self.consecutive_successes = 0;
                    self.total_requests += 1;
                    Ok(())
                } else {
                    Err(self.current_backoff.saturating_sub(elapsed))
                }
            }
        }
    }

    /// Record a successful call.
    pub fn record_success(&mut self, config: &BreakerConfig) {
        self.consecutive_failures = 0;
        self.consecutive_successes += 1;
        self.successful_requests += 1;

        if self.state == CircuitState::HalfOpen
            && self.consecutive_successes >= config.success_threshold
        {
            self.state = CircuitState::Closed;
            self.consecutive_successes = 0;
        }
    }

    /// Record a failed call.
    ///
    /// A failure observed while HALF_OPEN always re-opens the circuit:
    /// HALF_OPEN has an effective failure threshold of 1. We model that by
    /// resetting `consecutive_failures` to 1 rather than accumulating on
    /// top of whatever count was in effect when the circuit last tripped,
    /// so the backoff multiplier below stays meaningful.
    pub fn record_failure(&mut self, config: &BreakerConfig) {
        self.consecutive_successes = 0;
        self.last_failure_at = Some(Instant::now());
        self.failed_requests += 1;

        let was_half_open = self.state == CircuitState::HalfOpen;
        self.consecutive_failures = if was_half_open {
            1
        } else {
            self.consecutive_failures + 1
        };

        if was_half_open || self.consecutive_failures >= config.failure_threshold {
            self.state = CircuitState::Open;
            let multiplier = self.consecutive_failures.max(1);
            self.current_backoff = std::cmp::min(
                self.current_backoff.saturating_mul(multiplier),
                config.max_timeout,
            );
        }
    }

    /// Reset to CLOSED with zeroed counters and the backoff restored to
    /// `base_timeout`. See DESIGN.md for the reasoning behind restoring
    /// the backoff here rather than leaving it at its last-grown value.
    pub fn reset(&mut self, config: &BreakerConfig) {
        self.state = CircuitState::Closed;
        self.consecutive_failures = 0;
        self.consecutive_successes = 0;
        self.current_backoff = config.base_timeout;
    }

    pub fn success_rate(&self) -> f64 {
        let completed = self.successful_requests + self.failed_requests;
        if completed == 0 {
            1.0
        } else {
            self.successful_requests as f64 / completed as f64
        }
    }
}
