//! # Circuit Breaker
//!
//! Per-model circuit breaker for the detection orchestrator's provider
//! calls.
//!
//! Every model configured in the registry gets its own [`CircuitBreaker`],
//! isolating a flaky or rate-limited provider from the rest of the pool: a
//! tripped breaker makes the orchestrator skip that model for calls instead
//! of burning a timeout budget on a request that is likely to fail.
//!
//! ## State machine
//!
//! - **CLOSED**: calls are admitted normally.
//! - **OPEN**: calls are rejected immediately once `failure_threshold`
//!   consecutive failures accumulate. After `current_backoff` elapses the
//!   breaker moves to HALF_OPEN.
//! - **HALF_OPEN**: a single probe is admitted; a failure here reopens the
//!   circuit immediately, a run of `success_threshold` successes closes it.
//!
//! ## Example
//!
//! ```rust
//! use sentinel_breaker::{BreakerConfig, CircuitBreaker};
//!
//! # async fn run() {
//! let breaker = CircuitBreaker::new("gpt-guard", BreakerConfig::default());
//!
//! if breaker.allow().await.is_ok() {
//!     // call the provider...
//!     breaker.record_success().await;
//! }
//! # }
//! ```

mod breaker;
mod config;
mod error;
mod state;
mod stats;

pub use breaker::CircuitBreaker;
pub use config::BreakerConfig;
pub use error::{BreakerError, Result};
pub use state::CircuitState;
pub use stats::BreakerStats;
