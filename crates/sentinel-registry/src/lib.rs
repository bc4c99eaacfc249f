//! # Sentinel Registry - Model Pool Configuration
//!
//! The registry holds the set of detection models the orchestrator can fall
//! back through: their endpoints, credentials, timeouts, and priority order.
//!
//! ## Purpose
//!
//! 1. **Ordering** - derives a stable, priority-sorted view of the enabled
//!    descriptors (`enabled_ordered`), ties broken by insertion order.
//!
//! 2. **Operator control** - `enable`/`disable`/`set_priority` let an
//!    operator reshape the fallback chain at runtime without a restart.
//!
//! 3. **Credential accounting** - descriptors resolve their own bearer
//!    credentials from named environment variables, and the registry can
//!    report whether any enabled model has one configured at all.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          ModelRegistry                              │
//! │  descriptors: Vec<ModelDescriptor>  (insertion order, source of truth) │
//! │  enabled_ordered: Vec<usize>        (cached index view, priority-sorted)│
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sentinel_registry::{ModelDescriptor, ModelRegistry, ProviderKind};
//! use sentinel_breaker::BreakerConfig;
//! use std::time::Duration;
//!
//! let mut registry = ModelRegistry::new();
//! registry
//!     .add(ModelDescriptor {
//!         name: "gpt-guard".to_string(),
//!         provider: ProviderKind::GenerativeChat,
//!         remote_id: "gpt-guard-1".to_string(),
//!         endpoint: "https://example.invalid/v1/chat".to_string(),
//!         credential_ref: String::new(),
//!         timeout: Duration::from_secs(5),
//!         priority: 10,
//!         enabled: true,
//!         breaker_config: BreakerConfig::default(),
//!     })
//!     .unwrap();
//!
//! for descriptor in registry.enabled_ordered() {
//!     println!("will try {} first", descriptor.name);
//! }
//! ```

pub mod models;
pub mod registry;

pub use models::{ModelDescriptor, ProviderKind};
pub use registry::{ModelRegistry, RegistryError, Result};
