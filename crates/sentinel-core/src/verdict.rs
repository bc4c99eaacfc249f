//! Request/response types for a single detection pass.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use sentinel_providers::ThreatTag;

/// `modelUsed` sentinel for empty input — no model was ever consulted.
pub const MODEL_NONE: &str = "none";

/// `modelUsed` sentinel for a total outage — every enabled model failed.
pub const MODEL_FALLBACK_FAILED: &str = "fallback_failed";

/// A single detection request.
///
/// Mirrors the transport's wire shape directly: `{"text": ..., "config":
/// {"confidence_threshold": ...}}`. Deserializing a transport-layer payload
/// straight into this type keeps that mapping in one place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionRequest {
    pub text: String,
    #[serde(default)]
    pub config: DetectionRequestConfig,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DetectionRequestConfig {
    /// Per-request override of the process-wide default confidence
    /// threshold. `None` or `Some(0.0)` both fall back to the default.
    pub confidence_threshold: Option<f64>,
}

impl DetectionRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            config: DetectionRequestConfig::default(),
        }
    }

    #[must_use]
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.config.confidence_threshold = Some(threshold);
        self
    }

    /// Resolve the threshold this request should be judged against: its
    /// own override if present and nonzero, otherwise `default`.
    pub(crate) fn effective_threshold(&self, default: f64) -> f64 {
        match self.config.confidence_threshold {
            Some(t) if t > 0.0 => t,
            _ => default,
        }
    }
}

/// The canonical detection outcome.
///
/// Field names carry `serde(rename)` so this serializes directly to the
/// transport's wire shape without a separate DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(rename = "confidence")]
    pub score: f64,
    #[serde(rename = "threat_types")]
    pub threats: Vec<ThreatTag>,
    pub reason: String,
    #[serde(rename = "endpoint")]
    pub model_used: String,
    #[serde(rename = "processing_time_ms")]
    pub elapsed_millis: u64,
    pub is_malicious: bool,
}

impl Verdict {
    /// The benign verdict for empty input. No network activity precedes
    /// this.
    pub fn empty_input() -> Self {
        Self {
            score: 0.0,
            threats: Vec::new(),
            reason: "Empty input - not malicious".to_string(),
            model_used: MODEL_NONE.to_string(),
            elapsed_millis: 0,
            is_malicious: false,
        }
    }

    /// The degraded verdict returned when every enabled model failed.
    pub fn all_models_failed(tried: &[String], elapsed: Duration) -> Self {
        Self {
            score: 0.5,
            threats: Vec::new(),
            reason: format!(
                "All detection models unavailable (tried: [{}]) - returning safe classification",
                tried.join(", ")
            ),
            model_used: MODEL_FALLBACK_FAILED.to_string(),
            elapsed_millis: elapsed.as_millis() as u64,
            is_malicious: false,
        }
    }
}

/// Signal alongside a degraded [`Verdict`] telling the transport layer to
/// map this response to HTTP 503 with a `Retry-After` hint. Never returned
/// from `detect()` alongside a non-degraded verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllModelsFailed;

impl AllModelsFailed {
    /// Recommended `Retry-After` hint in seconds.
    pub const RETRY_AFTER_SECONDS: u64 = 60;
}

/// What `Orchestrator::detect` returns: the verdict plus, on total outage,
/// the signal a transport layer maps to HTTP 503.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionOutcome {
    pub verdict: Verdict,
    pub all_models_failed: Option<AllModelsFailed>,
}

impl DetectionOutcome {
    pub(crate) fn ok(verdict: Verdict) -> Self {
        Self {
            verdict,
            all_models_failed: None,
        }
    }

    pub(crate) fn failed(verdict: Verdict) -> Self {
        Self {
            verdict,
            all_models_failed: Some(AllModelsFailed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_threshold_falls_back_on_none() {
        let req = DetectionRequest::new("hi");
        assert_eq!(req.effective_threshold(0.6), 0.6);
    }

    #[test]
    fn test_effective_threshold_falls_back_on_zero() {
        let req = DetectionRequest::new("hi").with_confidence_threshold(0.0);
        assert_eq!(req.effective_threshold(0.6), 0.6);
    }

    #[test]
    fn test_effective_threshold_uses_override() {
        let req = DetectionRequest::new("hi").with_confidence_threshold(0.9);
        assert_eq!(req.effective_threshold(0.6), 0.9);
    }

    #[test]
    fn test_empty_input_verdict() {
        let verdict = Verdict::empty_input();
        assert_eq!(verdict.model_used, MODEL_NONE);
        assert!(!verdict.is_malicious);
    }

    #[test]
    fn test_all_models_failed_reason_lists_tried_models() {
        let tried = vec!["m1".to_string(), "m2".to_string()];
        let verdict = Verdict::all_models_failed(&tried, Duration::from_millis(42));
        assert!(verdict.reason.contains("m1, m2"));
        assert_eq!(verdict.model_used, MODEL_FALLBACK_FAILED);
        assert_eq!(verdict.elapsed_millis, 42);
    }

    #[test]
    fn test_verdict_serializes_to_wire_shape() {
        let verdict = Verdict {
            score: 0.9,
            threats: vec![ThreatTag::Injection],
            reason: "flagged".to_string(),
            model_used: "m1".to_string(),
            elapsed_millis: 12,
            is_malicious: true,
        };
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["confidence"], 0.9);
        assert_eq!(json["endpoint"], "m1");
        assert_eq!(json["processing_time_ms"], 12);
        assert_eq!(json["threat_types"][0], "injection");
    }

    #[test]
    fn test_request_deserializes_from_wire_shape() {
        let json = r#"{"text": "hello", "config": {"confidence_threshold": 0.7}}"#;
        let req: DetectionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.text, "hello");
        assert_eq!(req.config.confidence_threshold, Some(0.7));
    }
}
