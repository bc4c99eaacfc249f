//! Dispatch table mapping a descriptor's [`ProviderKind`] to its adapter.
//!
//! Kept separate from `adapter.rs` so the orchestrator depends on one small
//! surface (`AdapterRegistry::call`) instead of matching on `ProviderKind`
//! itself — adding a new provider of an existing family is a change local
//! to this crate.

use sentinel_registry::{ModelDescriptor, ProviderKind};
use std::time::Duration;

use crate::adapter::ProviderAdapter;
use crate::adapters::{
    ClassificationInferenceAdapter, GenerativeBearerAdapter, GenerativeQueryKeyedAdapter,
};
use crate::error::ProviderError;
use crate::types::RawResponse;

/// Owns one shared, connection-pooled `reqwest::Client` per provider
/// family — one long-lived client object per adapter family.
pub struct AdapterRegistry {
    classification: ClassificationInferenceAdapter,
    generative_query_keyed: GenerativeQueryKeyedAdapter,
    generative_bearer: GenerativeBearerAdapter,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Build all three adapters sharing one underlying `reqwest::Client`.
    /// `GenerativeChat` descriptors route through the header-bearer adapter
    /// (`messages: [...]`, credential in an `Authorization` header) and
    /// `GenerativeCompletion` descriptors route through the query-keyed
    /// adapter (`contents`/`parts`, credential as a `?key=` query param) —
    /// see `adapter_for` below and DESIGN.md for why the two `ProviderKind`
    /// variants are split this way.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            classification: ClassificationInferenceAdapter::new(client.clone()),
            generative_query_keyed: GenerativeQueryKeyedAdapter::new(client.clone()),
            generative_bearer: GenerativeBearerAdapter::new(client),
        }
    }

    fn adapter_for(&self, kind: ProviderKind) -> &dyn ProviderAdapter {
        match kind {
            ProviderKind::ClassificationInference => &self.classification,
            ProviderKind::GenerativeChat => &self.generative_bearer,
            ProviderKind::GenerativeCompletion => &self.generative_query_keyed,
        }
    }

    /// Route `descriptor`'s call to the adapter matching its `provider` tag.
    pub async fn call(
        &self,
        descriptor: &ModelDescriptor,
        candidate: &str,
        deadline: Duration,
    ) -> Result<RawResponse, ProviderError> {
        self.adapter_for(descriptor.provider)
            .call(descriptor, candidate, deadline)
            .await
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
