//! Error types for the circuit breaker module.

use thiserror::Error;

/// Result type alias for breaker operations.
pub type Result<T> = std::result::Result<T, BreakerError>;

/// Errors that can occur while admitting or recording calls through a breaker.
#[derive(Debug, Error)]
pub enum BreakerError {
    /// The circuit is open and the call was rejected without reaching the network.
    ///
    /// The orchestrator must treat this as "skip this descriptor", not as a
    /// call failure to be recorded against the breaker.
    #[error("circuit open for model '{model}', retry after {retry_after_millis}ms")]
    CircuitOpen {
        /// Name of the model whose breaker is open.
        model: String,
        /// Milliseconds remaining until the breaker will admit a probe.
        retry_after_millis: u64,
    },

    /// Reset was requested for an unknown breaker (operational surface).
    #[error("no breaker registered for model '{0}'")]
    UnknownModel(String),
}
