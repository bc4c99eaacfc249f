//! Error types for provider adapters and response normalization.

use thiserror::Error;

/// Errors that can occur while calling a provider or decoding its reply.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The descriptor names a credential environment variable that isn't set.
    #[error("credential '{0}' is not configured")]
    MissingCredential(String),

    /// The call didn't complete before its deadline.
    #[error("request to '{model}' timed out after {elapsed_millis}ms")]
    Timeout { model: String, elapsed_millis: u64 },

    /// Transport-level failure (DNS, connect, TLS, etc).
    #[error("network error calling '{model}': {source}")]
    Network {
        model: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider responded, but not with HTTP 200.
    #[error("'{model}' returned HTTP {status}: {body_excerpt}")]
    NonSuccessStatus {
        model: String,
        status: u16,
        body_excerpt: String,
    },

    /// The response body didn't match the adapter's expected schema.
    #[error("failed to decode response from '{model}': {reason}")]
    Decode { model: String, reason: String },
}
