//! Read-only breaker snapshots for the operational surface.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::state::CircuitState;

/// Point-in-time view of one breaker, safe to serialize for a health/status
/// endpoint. Never mutates the breaker it was taken from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakerStats {
    /// Name of the model this breaker guards.
    pub name: String,
    /// Current state.
    pub state: CircuitState,
    pub consecutive_failures: u32,
    pub consecutive_successes: u32,
    /// Milliseconds since the last recorded failure, if any has occurred.
    #[serde(rename = "last_failure_time")]
    pub last_failure_age_millis: Option<u64>,
    /// Current backoff duration (only meaningful while OPEN).
    pub timeout_duration: Duration,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    /// `successful_requests / (successful_requests + failed_requests)`,
    /// `1.0` when no calls have completed yet.
    pub success_rate: f64,
    pub is_open: bool,
}
