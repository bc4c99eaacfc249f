//! Operational surface: read-only health/diagnostics, manual reset.
//!
//! None of these ever perform detection traffic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use sentinel_breaker::BreakerStats;
use sentinel_registry::ProviderKind;

/// Overall health derived from how many breakers are non-OPEN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All enabled breakers are non-OPEN.
    Healthy,
    /// Some, but not all, enabled breakers are OPEN.
    Degraded,
    /// Every enabled breaker is OPEN.
    Critical,
}

impl HealthStatus {
    /// Derive status from breaker open/closed counts: critical if zero
    /// breakers are non-OPEN, healthy if all are, degraded otherwise. A
    /// registry with no enabled models at all is critical —
    /// there is nothing to serve traffic with.
    pub(crate) fn derive(total_enabled: usize, open_count: usize) -> Self {
        if total_enabled == 0 || open_count == total_enabled {
            Self::Critical
        } else if open_count == 0 {
            Self::Healthy
        } else {
            Self::Degraded
        }
    }
}

/// Read-only snapshot of the orchestrator's health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub status: HealthStatus,
    pub version: String,
    #[serde(rename = "uptime")]
    pub uptime_seconds: u64,
    pub requests_served: u64,
    pub average_latency_ms: f64,
    pub models_available: usize,
    pub total_models: usize,
    pub circuit_breakers: HashMap<String, BreakerStats>,
    pub api_key_configured: bool,
}

/// One descriptor's state in the diagnostic dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    pub name: String,
    pub provider: ProviderKind,
    pub priority: u32,
    pub enabled: bool,
    pub breaker: BreakerStats,
}

/// Ordered descriptor list plus a human-readable fallback chain string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub entries: Vec<DiagnosticEntry>,
    pub fallback_chain: String,
}

pub(crate) fn render_fallback_chain(names: &[&str]) -> String {
    if names.is_empty() {
        "(no enabled models)".to_string()
    } else {
        names.join(" -> ")
    }
}

pub(crate) fn format_uptime(uptime: Duration) -> u64 {
    uptime.as_secs()
}
