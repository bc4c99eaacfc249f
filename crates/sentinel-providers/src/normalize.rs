//! # Response Normalizer
//!
//! Turns a [`RawResponse`] into the `{score, threats, reason}` triple the
//! orchestrator folds into a Verdict. Two families are defined:
//! classification (a label/score list) and generative (free text matching
//! a fixed grammar).

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::error::ProviderError;
use crate::types::{NormalizedResult, RawResponse, ResponseFamily, ThreatTag};

#[derive(Debug, Deserialize)]
struct ClassificationLabel {
    label: String,
    score: f64,
}

/// Dispatch to the normalizer matching the response's family tag.
pub fn normalize(model: &str, response: &RawResponse) -> Result<NormalizedResult, ProviderError> {
    match response.family {
        ResponseFamily::Classification => normalize_classification(model, &response.body),
        ResponseFamily::Generative => normalize_generative(&response.body),
    }
}

/// Top-1 label determines the outcome; everything else in the list is
/// ignored.
fn normalize_classification(
    model: &str,
    body: &[u8],
) -> Result<NormalizedResult, ProviderError> {
    let rows: Vec<Vec<ClassificationLabel>> =
        serde_json::from_slice(body).map_err(|e| ProviderError::Decode {
            model: model.to_string(),
            reason: e.to_string(),
        })?;

    let top = rows
        .into_iter()
        .next()
        .and_then(|row| row.into_iter().next())
        .ok_or_else(|| ProviderError::Decode {
            model: model.to_string(),
            reason: "classification response had no labels".to_string(),
        })?;

    let label = top.label.to_lowercase();
    let result = match label.as_str() {
        "injection" | "label_1" => NormalizedResult {
            score: top.score,
            threats: vec![ThreatTag::Injection],
            reason: "classification model flagged injection".to_string(),
        },
        "safe" | "label_0" => {
            let raw = 1.0 - top.score;
            let score = if raw > 0.8 {
                0.1
            } else if raw > 0.6 {
                0.3
            } else {
                raw
            };
            NormalizedResult {
                score,
                threats: vec![],
                reason: "classification model labeled input safe".to_string(),
            }
        }
        _ => NormalizedResult {
            score: 0.5,
            threats: vec![],
            reason: format!("classification model returned unrecognized label '{label}'"),
        },
    };
    Ok(result)
}

fn score_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"SCORE:\s*([0-9]*\.?[0-9]+)").unwrap())
}

fn threats_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Non-greedy up through the literal "REASON:" so embedded commas don't
    // confuse the capture.
    RE.get_or_init(|| Regex::new(r"(?s)THREATS:(.*?)\s*REASON:").unwrap())
}

fn reason_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"REASON:(.+?)$").unwrap())
}

/// Parses the fixed `SCORE:<f> THREATS:<list> REASON:<text>` grammar.
/// Missing pieces fall back to defaults rather than erroring: a malformed
/// reply is a parse miss, not a provider failure.
fn normalize_generative(body: &[u8]) -> Result<NormalizedResult, ProviderError> {
    let text = String::from_utf8_lossy(body);

    let score = score_pattern()
        .captures(&text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.3);

    let threats = threats_pattern()
        .captures(&text)
        .and_then(|c| c.get(1))
        .map(|m| {
            m.as_str()
                .split(',')
                .map(|tok| tok.trim().to_lowercase())
                .filter_map(|tok| ThreatTag::from_token(&tok))
                .collect()
        })
        .unwrap_or_default();

    let reason = reason_pattern()
        .captures(&text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Unable to parse LLM response".to_string());

    Ok(NormalizedResult {
        score,
        threats,
        reason,
    })
}
