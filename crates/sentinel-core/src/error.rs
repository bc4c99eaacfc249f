//! Error types for the detection orchestrator.

use thiserror::Error;

/// Core error type for orchestrator operations.
///
/// Per-call provider/breaker failures do *not* surface as `SentinelError`:
/// they're absorbed into the fallback loop and only ever show up
/// indirectly, via a degraded [`crate::Verdict`] plus the
/// [`crate::AllModelsFailed`] signal. This enum covers the operational
/// surface instead, where a named-model lookup can fail outright.
#[derive(Debug, Error)]
pub enum SentinelError {
    /// Registry error passthrough (e.g. operator named an unknown model).
    #[error("registry error: {0}")]
    Registry(#[from] sentinel_registry::RegistryError),

    /// Breaker error passthrough (reset of an unknown breaker).
    #[error("breaker error: {0}")]
    Breaker(#[from] sentinel_breaker::BreakerError),
}

/// Result type alias for orchestrator operations.
pub type Result<T> = std::result::Result<T, SentinelError>;
