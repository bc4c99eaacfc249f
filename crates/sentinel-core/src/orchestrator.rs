//! The Orchestrator: the top-level detection pass, plus the read-only
//! operational surface layered over the same registry/breaker state.
//!
//! Ties together every other component in this workspace: `sentinel-
//! preprocessor` widens the input, `sentinel-registry` supplies the
//! priority-ordered fallback chain, `sentinel-breaker` guards each call,
//! and `sentinel-providers` speaks to the provider and interprets its
//! reply. `Orchestrator::detect` is the single place all of that comes
//! together.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use sentinel_breaker::{BreakerError, BreakerStats, CircuitBreaker};
use sentinel_preprocessor::expand_candidates;
use sentinel_providers::{normalize, AdapterRegistry, NormalizedResult};
use sentinel_registry::{ModelDescriptor, ModelRegistry};

use crate::config::OrchestratorConfig;
use crate::error::{Result, SentinelError};
use crate::metrics::Metrics;
use crate::operational::{
    format_uptime, render_fallback_chain, Diagnostic, DiagnosticEntry, HealthSnapshot, HealthStatus,
};
use crate::verdict::{DetectionOutcome, DetectionRequest, Verdict};

/// The detection orchestrator.
///
/// Owns the model registry, one circuit breaker per registered descriptor
/// (not just the currently-enabled ones, so a model disabled at startup
/// can still be `enable`d later without losing its failure history), the
/// shared provider adapter clients, and the process-wide metrics.
///
/// # Example
///
/// ```rust,no_run
/// use sentinel_core::{DetectionRequest, Orchestrator, OrchestratorConfig};
///
/// # async fn run(descriptors: Vec<sentinel_registry::ModelDescriptor>) -> sentinel_core::Result<()> {
/// let orchestrator = Orchestrator::new(descriptors, OrchestratorConfig::default())?;
/// let outcome = orchestrator.detect(DetectionRequest::new("hello")).await;
/// println!("{}: {}", outcome.verdict.model_used, outcome.verdict.score);
/// # Ok(())
/// # }
/// ```
pub struct Orchestrator {
    registry: RwLock<ModelRegistry>,
    breakers: HashMap<String, Arc<CircuitBreaker>>,
    adapters: AdapterRegistry,
    config: OrchestratorConfig,
    metrics: Metrics,
    started_at: Instant,
}

impl Orchestrator {
    /// Build an orchestrator from a freshly-loaded descriptor list — the
    /// startup path; the registry is created once and lives for the
    /// process lifetime.
    pub fn new(descriptors: Vec<ModelDescriptor>, config: OrchestratorConfig) -> Result<Self> {
        let breakers = descriptors
            .iter()
            .map(|d| {
                (
                    d.name.clone(),
                    Arc::new(CircuitBreaker::new(d.name.clone(), d.breaker_config)),
                )
            })
            .collect();
        let registry = ModelRegistry::load(descriptors)?;

        Ok(Self {
            registry: RwLock::new(registry),
            breakers,
            adapters: AdapterRegistry::new(),
            config,
            metrics: Metrics::new(),
            started_at: Instant::now(),
        })
    }

    /// Build an orchestrator reusing an already-constructed adapter
    /// registry (tests substitute one whose `reqwest::Client` points at
    /// wiremock servers via absolute descriptor endpoints, so this isn't
    /// actually necessary in practice, but it mirrors the shape of the
    /// teacher's `with_config` constructors for symmetry and lets a test
    /// swap in a client with custom connect timeouts if ever needed).
    pub fn with_adapters(
        descriptors: Vec<ModelDescriptor>,
        config: OrchestratorConfig,
        adapters: AdapterRegistry,
    ) -> Result<Self> {
        let mut orchestrator = Self::new(descriptors, config)?;
        orchestrator.adapters = adapters;
        Ok(orchestrator)
    }

    /// Run the full detection pipeline for one request.
    #[instrument(skip(self, request), fields(text_len = request.text.len()))]
    pub async fn detect(&self, request: DetectionRequest) -> DetectionOutcome {
        let start = Instant::now();

        // Step 1: empty input is benign, no network activity.
        if request.text.is_empty() {
            let verdict = Verdict::empty_input();
            self.metrics.record(start.elapsed(), true, &verdict.threats);
            return DetectionOutcome::ok(verdict);
        }

        // Step 2: threshold resolution.
        let effective_threshold = request.effective_threshold(self.config.default_confidence_threshold);

        // Step 3: candidate expansion.
        let candidates = expand_candidates(&request.text);
        debug!(candidate_count = candidates.len(), "expanded encoding candidates");

        // Snapshot the fallback chain, then release the registry lock —
        // the pass that follows may take hundreds of milliseconds across
        // several provider calls and shouldn't block concurrent
        // enable/disable/set_priority operators the whole time.
        let ordered: Vec<ModelDescriptor> = {
            let registry = self.registry.read().await;
            registry.enabled_ordered().into_iter().cloned().collect()
        };

        let mut best: Option<NormalizedResult> = None;
        let mut best_model = String::new();
        let mut tried_models: Vec<String> = Vec::new();

        for descriptor in &ordered {
            tried_models.push(descriptor.name.clone());
            let breaker = self
                .breakers
                .get(&descriptor.name)
                .expect("every registered descriptor has a breaker");

            let mut descriptor_succeeded = false;
            let mut early_exit = false;

            for candidate in &candidates {
                if breaker.allow().await.is_err() {
                    debug!(model = %descriptor.name, "circuit open, skipping descriptor");
                    break;
                }

                match self.adapters.call(descriptor, candidate, descriptor.timeout).await {
                    Ok(raw) => match normalize(&descriptor.name, &raw) {
                        Ok(result) => {
                            breaker.record_success().await;
                            descriptor_succeeded = true;

                            if best.as_ref().map_or(true, |b| result.score > b.score) {
                                best = Some(result.clone());
                                best_model = descriptor.name.clone();
                            }

                            if result.score >= self.config.early_exit_threshold {
                                info!(model = %descriptor.name, score = result.score, "early exit");
                                early_exit = true;
                                break;
                            }
                        }
                        Err(err) => {
                            warn!(model = %descriptor.name, error = %err, "response decode failed");
                            breaker.record_failure().await;
                        }
                    },
                    Err(err) => {
                        warn!(model = %descriptor.name, error = %err, "provider call failed");
                        breaker.record_failure().await;
                    }
                }
            }

            if early_exit || descriptor_succeeded {
                let elapsed = start.elapsed();
                let verdict = finalize(best.expect("a successful call always sets `best`"), best_model, effective_threshold, elapsed);
                self.metrics.record(elapsed, true, &verdict.threats);
                return DetectionOutcome::ok(verdict);
            }

            tokio::time::sleep(self.config.inter_model_backoff()).await;
        }

        // Step 5: exhaustion.
        let elapsed = start.elapsed();
        warn!(tried = ?tried_models, "all detection models unavailable");
        let verdict = Verdict::all_models_failed(&tried_models, elapsed);
        self.metrics.record(elapsed, false, &verdict.threats);
        DetectionOutcome::failed(verdict)
    }

    // ---- Operational surface -----------------------------------------

    /// Raw request counters and per-threat-tag counts, independent of the
    /// health snapshot's derived status. Never touches the network.
    pub fn metrics_snapshot(&self) -> crate::MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Overall health plus per-breaker stats.
    pub async fn health_snapshot(&self) -> HealthSnapshot {
        let registry = self.registry.read().await;
        let enabled = registry.enabled_ordered();

        let mut circuit_breakers = HashMap::with_capacity(enabled.len());
        let mut open_count = 0usize;
        for descriptor in &enabled {
            let stats = self.stats_for(&descriptor.name).await;
            if stats.is_open {
                open_count += 1;
            }
            circuit_breakers.insert(descriptor.name.clone(), stats);
        }

        let metrics = self.metrics.snapshot();
        HealthSnapshot {
            status: HealthStatus::derive(enabled.len(), open_count),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: format_uptime(self.started_at.elapsed()),
            requests_served: metrics.total_requests,
            average_latency_ms: metrics.average_latency_millis,
            models_available: enabled.len() - open_count,
            total_models: registry.all().len(),
            circuit_breakers,
            api_key_configured: registry.any_credential_configured(),
        }
    }

    /// Per-breaker statistics for every registered descriptor, enabled or
    /// not.
    pub async fn breaker_stats(&self) -> HashMap<String, BreakerStats> {
        let registry = self.registry.read().await;
        let mut map = HashMap::with_capacity(registry.all().len());
        for descriptor in registry.all() {
            map.insert(descriptor.name.clone(), self.stats_for(&descriptor.name).await);
        }
        map
    }

    /// The ordered descriptor list with each descriptor's breaker state,
    /// plus the fallback chain rendered as a human-readable string.
    pub async fn diagnostic(&self) -> Diagnostic {
        let registry = self.registry.read().await;
        let mut entries = Vec::with_capacity(registry.all().len());
        for descriptor in registry.all() {
            entries.push(DiagnosticEntry {
                name: descriptor.name.clone(),
                provider: descriptor.provider,
                priority: descriptor.priority,
                enabled: descriptor.enabled,
                breaker: self.stats_for(&descriptor.name).await,
            });
        }
        let chain_names: Vec<&str> = registry
            .enabled_ordered()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        Diagnostic {
            entries,
            fallback_chain: render_fallback_chain(&chain_names),
        }
    }

    /// Force a named model's breaker back to CLOSED. Returns
    /// [`SentinelError::Breaker`] for an unregistered name — the transport
    /// layer maps that to HTTP 404.
    pub async fn reset_breaker(&self, name: &str) -> Result<()> {
        let breaker = self
            .breakers
            .get(name)
            .ok_or_else(|| SentinelError::Breaker(BreakerError::UnknownModel(name.to_string())))?;
        breaker.reset().await;
        info!(model = %name, "breaker manually reset");
        Ok(())
    }

    // ---- Registry passthroughs (operator controls) --------------------

    pub async fn enable_model(&self, name: &str) -> Result<()> {
        self.registry.write().await.enable(name)?;
        Ok(())
    }

    pub async fn disable_model(&self, name: &str) -> Result<()> {
        self.registry.write().await.disable(name)?;
        Ok(())
    }

    pub async fn set_priority(&self, name: &str, priority: u32) -> Result<()> {
        self.registry.write().await.set_priority(name, priority)?;
        Ok(())
    }

    async fn stats_for(&self, name: &str) -> BreakerStats {
        self.breakers
            .get(name)
            .expect("breaker_stats only iterates registered descriptors")
            .stats()
            .await
    }
}

/// Fold a winning [`NormalizedResult`] into the final [`Verdict`].
fn finalize(best: NormalizedResult, model_used: String, threshold: f64, elapsed: Duration) -> Verdict {
    Verdict {
        is_malicious: best.score >= threshold,
        score: best.score,
        threats: best.threats,
        reason: best.reason,
        model_used,
        elapsed_millis: elapsed.as_millis() as u64,
    }
}
