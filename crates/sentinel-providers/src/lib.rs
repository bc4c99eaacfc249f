//! # Sentinel Providers
//!
//! Provider adapters and the response normalizer that sit between
//! the orchestrator and the outside world's detection models.
//!
//! ## Overview
//!
//! Adapters speak one of three concrete wire shapes, grouped into two
//! response families:
//!
//! - **Classification family** — a single adapter
//!   ([`ClassificationInferenceAdapter`]) calling a hosted text-classifier
//!   that returns a label/score list.
//! - **Generative family** — two adapters
//!   ([`GenerativeQueryKeyedAdapter`], [`GenerativeBearerAdapter`]) calling
//!   chat-style models instructed (via a fixed system prompt) to reply in
//!   a `SCORE:/THREATS:/REASON:` grammar.
//!
//! Adapter-normalizer pairing is by family tag, not provider identity:
//! [`normalize`] dispatches on [`ResponseFamily`], so a new provider of an
//! existing family needs only a new adapter.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────┐     RawResponse      ┌──────────────────┐
//! │  ProviderAdapter   │ ───────────────────▶ │  normalize(...)  │
//! │ (one per provider) │                      │  (one per family) │
//! └───────────────────┘                      └──────────────────┘
//! ```

pub mod adapter;
pub mod adapters;
mod dispatch;
pub mod error;
pub mod normalize;
mod prompts;
pub mod types;

pub use adapter::{ProviderAdapter, CLASSIFICATION_TRUNCATE_LEN};
pub use adapters::{ClassificationInferenceAdapter, GenerativeBearerAdapter, GenerativeQueryKeyedAdapter};
pub use dispatch::AdapterRegistry;
pub use error::ProviderError;
pub use normalize::normalize;
pub use prompts::SYSTEM_PROMPT;
pub use types::{NormalizedResult, RawResponse, ResponseFamily, ThreatTag};
