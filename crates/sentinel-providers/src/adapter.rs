//! # Provider Adapters
//!
//! Defines the [`ProviderAdapter`] trait every concrete provider
//! implements, plus the shared deadline/credential plumbing.

use async_trait::async_trait;
use sentinel_registry::ModelDescriptor;
use std::time::Duration;

use crate::error::ProviderError;
use crate::types::RawResponse;

/// Classification-family adapters truncate input to this many characters
/// before sending it; generative-family adapters pass text unchanged.
pub const CLASSIFICATION_TRUNCATE_LEN: usize = 500;

/// Calls a provider with a candidate string and returns its raw reply.
///
/// # Implementors
///
/// - [`crate::adapters::ClassificationInferenceAdapter`]
/// - [`crate::adapters::GenerativeQueryKeyedAdapter`]
/// - [`crate::adapters::GenerativeBearerAdapter`]
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Send `candidate` to the provider described by `descriptor` and
    /// return its raw reply, or a typed error.
    ///
    /// `deadline` is the remaining time budget for this call, already
    /// resolved as `min(descriptor.timeout, request_deadline)` by the
    /// caller.
    async fn call(
        &self,
        descriptor: &ModelDescriptor,
        candidate: &str,
        deadline: Duration,
    ) -> Result<RawResponse, ProviderError>;
}

/// Truncate `text` to at most `CLASSIFICATION_TRUNCATE_LEN` characters,
/// respecting UTF-8 boundaries.
pub(crate) fn truncate_for_classification(text: &str) -> &str {
    match text.char_indices().nth(CLASSIFICATION_TRUNCATE_LEN) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
