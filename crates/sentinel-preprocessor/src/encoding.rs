//! Base64 / hex / ROT13 / decimal-ASCII candidate decoding.
//!
//! Attackers sometimes smuggle an injection payload past naive keyword
//! filters by encoding it; this module doesn't judge anything itself, it
//! just widens the set of strings the rest of the pipeline gets to look at.
//! Each decoding family contributes at most one candidate, and a candidate
//! only survives if it looks like plausible text rather than noise.

use regex::Regex;
use std::sync::OnceLock;

/// Keywords that make a ROT13 decode worth re-scanning. Fixed by design —
/// changing this set changes detection semantics.
const ROT13_SEED_KEYWORDS: [&str; 6] = [
    "ignore",
    "instructions",
    "prompt",
    "system",
    "reveal",
    "show",
];

fn base64_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z0-9+/]{20,}={0,2}").unwrap())
}

fn hex_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9A-Fa-f]{20,}").unwrap())
}

fn decimal_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:\d{1,3},\s*){4,}\d{1,3}").unwrap())
}

/// Printable-ASCII ratio and minimum-length filter shared by every decoded
/// candidate: bytes in `[0x20, 0x7E]` must be >80% of the content and the
/// content must be longer than 10 bytes.
fn passes_plausibility_filter(decoded: &str) -> bool {
    if decoded.len() <= 10 {
        return false;
    }
    let printable = decoded
        .bytes()
        .filter(|&b| (0x20..=0x7E).contains(&b))
        .count();
    (printable as f64 / decoded.len() as f64) > 0.8
}

fn try_base64(text: &str) -> Option<String> {
    use base64::Engine;
    for m in base64_pattern().find_iter(text) {
        if let Ok(bytes) = base64::engine::general_purpose::STANDARD.decode(m.as_str()) {
            if let Ok(decoded) = String::from_utf8(bytes) {
                if passes_plausibility_filter(&decoded) {
                    return Some(decoded);
                }
            }
        }
    }
    None
}

fn try_hex(text: &str) -> Option<String> {
    for m in hex_pattern().find_iter(text) {
        let raw = m.as_str();
        if raw.len() % 2 != 0 {
            continue;
        }
        let bytes: Option<Vec<u8>> = (0..raw.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&raw[i..i + 2], 16).ok())
            .collect();
        if let Some(bytes) = bytes {
            if let Ok(decoded) = String::from_utf8(bytes) {
                if passes_plausibility_filter(&decoded) {
                    return Some(decoded);
                }
            }
        }
    }
    None
}

fn try_rot13(text: &str) -> Option<String> {
    let decoded: String = text
        .chars()
        .map(|c| match c {
            'a'..='z' => (((c as u8 - b'a' + 13) % 26) + b'a') as char,
            'A'..='Z' => (((c as u8 - b'A' + 13) % 26) + b'A') as char,
            other => other,
        })
        .collect();

    let lower = decoded.to_lowercase();
    let hits = ROT13_SEED_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .count();
    if hits >= 2 {
        Some(decoded)
    } else {
        None
    }
}

fn try_decimal_ascii(text: &str) -> Option<String> {
    for m in decimal_pattern().find_iter(text) {
        let bytes: Option<Vec<u8>> = m
            .as_str()
            .split(',')
            .map(|tok| {
                tok.trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|&n| (32..=126).contains(&n))
                    .map(|n| n as u8)
            })
            .collect();
        if let Some(bytes) = bytes {
            if let Ok(decoded) = String::from_utf8(bytes) {
                if passes_plausibility_filter(&decoded) {
                    return Some(decoded);
                }
            }
        }
    }
    None
}

/// Expand `text` into `[text, decoded_1, decoded_2, ...]`, one decoded
/// candidate per successful decoding family, in the fixed order
/// base64 → hex → rot13 → decimal-ASCII.
///
/// An empty input yields `[""]`, never `[]`.
pub fn expand_candidates(text: &str) -> Vec<String> {
    let mut candidates = vec![text.to_string()];

    if let Some(c) = try_base64(text) {
        candidates.push(c);
    }
    if let Some(c) = try_hex(text) {
        candidates.push(c);
    }
    if let Some(c) = try_rot13(text) {
        candidates.push(c);
    }
    if let Some(c) = try_decimal_ascii(text) {
        candidates.push(c);
    }

    candidates
}
