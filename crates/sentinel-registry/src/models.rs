//! # Core Data Models for the Model Registry
//!
//! Defines the descriptor type the registry stores and orders, plus the
//! small enums it's keyed on.
//!
//! ## Notes
//!
//! - `ModelDescriptor` is immutable in steady state: the registry only ever
//!   replaces whole entries via `enable`/`disable`/`set_priority`, never
//!   mutates a descriptor in place, so a cloned descriptor handed to an
//!   adapter can't go stale mid-call.
//! - `ProviderKind` determines which adapter in `sentinel-providers` is used
//!   and, transitively, which normalizer family applies to its replies.

use serde::{Deserialize, Serialize};

use sentinel_breaker::BreakerConfig;

/// Which adapter family a descriptor is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    ClassificationInference,
    GenerativeChat,
    GenerativeCompletion,
}

/// One model entry in the registry.
///
/// # Fields
///
/// - `name`: stable human-readable identifier, unique within the registry.
/// - `provider`: which adapter/normalizer family handles this model.
/// - `remote_id`: opaque string the provider uses to identify the model.
/// - `endpoint`: absolute URL of the provider.
/// - `credential_ref`: name of an environment variable holding the bearer
///   credential; empty means no credential is required.
/// - `timeout`: per-call wall-clock budget.
/// - `priority`: positive integer; smaller is tried earlier.
/// - `enabled`: disabled descriptors are invisible to the orchestrator.
/// - `breaker_config`: thresholds for this model's circuit breaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    pub provider: ProviderKind,
    pub remote_id: String,
    pub endpoint: String,
    pub credential_ref: String,
    #[serde(with = "duration_millis")]
    pub timeout: std::time::Duration,
    pub priority: u32,
    pub enabled: bool,
    pub breaker_config: BreakerConfig,
}

impl ModelDescriptor {
    /// Whether a credential is required and actually configured in the
    /// process environment. Used by the health snapshot's
    /// `api_key_configured` field.
    pub fn credential_configured(&self) -> bool {
        self.credential_ref.is_empty()
            || std::env::var(&self.credential_ref)
                .map(|v| !v.is_empty())
                .unwrap_or(false)
    }

    /// Resolve the actual credential value, if one is required.
    pub fn resolve_credential(&self) -> Option<String> {
        if self.credential_ref.is_empty() {
            return None;
        }
        std::env::var(&self.credential_ref).ok()
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        (d.as_millis() as u64).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(d)?;
        Ok(Duration::from_millis(millis))
    }
}
