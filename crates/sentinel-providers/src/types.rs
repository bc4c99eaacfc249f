//! Types shared between provider adapters and the response normalizer.

use serde::{Deserialize, Serialize};

/// Closed set of threat categories a Verdict can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThreatTag {
    Jailbreak,
    SystemPromptLeak,
    DataExtraction,
    Injection,
    EncodingAttack,
    DelimiterAttack,
}

impl ThreatTag {
    /// Map a normalized generative-reply token to a tag. Returns `None` for
    /// unrecognized tokens, which the caller drops rather than errors on.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "jailbreak" => Some(Self::Jailbreak),
            "system_leak" | "system_prompt_leak" => Some(Self::SystemPromptLeak),
            "data_extraction" => Some(Self::DataExtraction),
            "injection" => Some(Self::Injection),
            "encoding_attack" => Some(Self::EncodingAttack),
            "delimiter_attack" => Some(Self::DelimiterAttack),
            _ => None,
        }
    }
}

/// Which family of adapter produced a [`RawResponse`], so the normalizer
/// knows which decoder to apply. Pairing is by family, not by provider
/// identity: a new provider of an existing family needs only a new
/// adapter, not a new normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFamily {
    Classification,
    Generative,
}

/// Opaque bytes returned by an adapter, tagged with the family that
/// produced them.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub family: ResponseFamily,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(family: ResponseFamily, body: impl Into<Vec<u8>>) -> Self {
        Self {
            family,
            body: body.into(),
        }
    }
}

/// The `{score, threats, reason}` triple a normalizer extracts from a
/// [`RawResponse`]. The orchestrator folds this into a full `Verdict`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResult {
    pub score: f64,
    pub threats: Vec<ThreatTag>,
    pub reason: String,
}
