//! Process-wide request metrics.
//!
//! One mutex covers both the counters and the latency accumulator: counter
//! updates are atomic per counter, and the mean-latency derivation is an
//! approximation rather than a precise moving window. A single lock is
//! simpler than per-field atomics and this isn't a hot enough path to need
//! them.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use sentinel_providers::ThreatTag;

const THREAT_TAGS: [ThreatTag; 6] = [
    ThreatTag::Jailbreak,
    ThreatTag::SystemPromptLeak,
    ThreatTag::DataExtraction,
    ThreatTag::Injection,
    ThreatTag::EncodingAttack,
    ThreatTag::DelimiterAttack,
];

#[derive(Debug, Default)]
struct MetricsInner {
    total_requests: u64,
    successful_requests: u64,
    failed_requests: u64,
    mean_latency_millis: f64,
    threat_counts: [u64; 6],
}

/// Read-mostly request counters plus an approximate rolling mean latency.
#[derive(Debug, Default)]
pub struct Metrics {
    inner: Mutex<MetricsInner>,
}

fn threat_index(tag: ThreatTag) -> usize {
    match tag {
        ThreatTag::Jailbreak => 0,
        ThreatTag::SystemPromptLeak => 1,
        ThreatTag::DataExtraction => 2,
        ThreatTag::Injection => 3,
        ThreatTag::EncodingAttack => 4,
        ThreatTag::DelimiterAttack => 5,
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed request. `success` is false only for the
    /// AllModelsFailed degraded path — a normal verdict from any model,
    /// malicious or not, counts as a success.
    pub(crate) fn record(&self, elapsed: Duration, success: bool, threats: &[ThreatTag]) {
        let mut inner = self.inner.lock().expect("metrics mutex poisoned");
        inner.total_requests += 1;
        if success {
            inner.successful_requests += 1;
        } else {
            inner.failed_requests += 1;
        }

        // Exponentially-weighted approximation rather than a true moving
        // window.
        let sample = elapsed.as_millis() as f64;
        inner.mean_latency_millis = if inner.total_requests == 1 {
            sample
        } else {
            inner.mean_latency_millis * 0.9 + sample * 0.1
        };

        for &tag in threats {
            inner.threat_counts[threat_index(tag)] += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = self.inner.lock().expect("metrics mutex poisoned");
        let threat_counts = THREAT_TAGS
            .iter()
            .map(|&tag| (tag, inner.threat_counts[threat_index(tag)]))
            .collect();
        MetricsSnapshot {
            total_requests: inner.total_requests,
            successful_requests: inner.successful_requests,
            failed_requests: inner.failed_requests,
            average_latency_millis: inner.mean_latency_millis,
            threat_counts,
        }
    }
}

/// Point-in-time snapshot, safe to serialize for the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub average_latency_millis: f64,
    /// Running count of each threat tag across every malicious verdict
    /// returned, regardless of which model produced it.
    pub threat_counts: HashMap<ThreatTag, u64>,
}
