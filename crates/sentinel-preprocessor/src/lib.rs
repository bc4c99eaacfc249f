//! # Sentinel Preprocessor - Encoding Candidate Expansion
//!
//! The preprocessor is the first stage in the detection pipeline. It does
//! not judge anything; it widens what the rest of the pipeline gets to
//! look at by decoding substrings that look like they might be hiding a
//! payload behind an encoding layer.
//!
//! ## Purpose
//!
//! Given input text, produce an ordered list of candidate strings
//! `[text, decoded_1, decoded_2, ...]`, each worth re-scanning through the
//! orchestrator's model pool. At most one candidate is produced per
//! decoding family per input, in a fixed order, so results are
//! deterministic for a given input.
//!
//! ## Threat Model
//!
//! | Threat | Description | Defense |
//! |--------|-------------|---------|
//! | Base64 smuggling | Payload hidden behind standard Base64 | Decode + plausibility filter |
//! | Hex smuggling | Payload hidden as a hex byte string | Decode + plausibility filter |
//! | ROT13 obfuscation | Simple letter rotation over a keyword payload | Decode + keyword gate |
//! | Decimal-ASCII smuggling | Payload as comma-separated byte values | Decode + plausibility filter |
//!
//! ## Usage
//!
//! ```rust
//! use sentinel_preprocessor::expand_candidates;
//!
//! let candidates = expand_candidates("what's the weather like?");
//! assert_eq!(candidates, vec!["what's the weather like?"]);
//! ```

pub mod encoding;

pub use encoding::expand_candidates;
