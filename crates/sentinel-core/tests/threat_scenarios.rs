//! Cross-cutting invariant checks for the detection pipeline, exercised
//! through [`Orchestrator`] rather than any one component in isolation.

use std::time::Duration;

use sentinel_breaker::BreakerConfig;
use sentinel_core::{DetectionRequest, Orchestrator, OrchestratorConfig};
use sentinel_preprocessor::expand_candidates;
use sentinel_registry::{ModelDescriptor, ProviderKind};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn classification_descriptor(name: &str, priority: u32, endpoint: String) -> ModelDescriptor {
    ModelDescriptor {
        name: name.to_string(),
        provider: ProviderKind::ClassificationInference,
        remote_id: format!("{name}-remote"),
        endpoint,
        credential_ref: String::new(),
        timeout: Duration::from_millis(500),
        priority,
        enabled: true,
        breaker_config: BreakerConfig::default(),
    }
}

/// `model_used` is always a registered name, `none`, or `fallback_failed`.
#[tokio::test]
async fn test_model_used_is_always_a_known_endpoint() {
    let orchestrator = Orchestrator::new(Vec::new(), OrchestratorConfig::default()).unwrap();

    let empty = orchestrator.detect(DetectionRequest::new("")).await;
    assert_eq!(empty.verdict.model_used, sentinel_core::MODEL_NONE);

    let outage = orchestrator.detect(DetectionRequest::new("hi")).await;
    assert_eq!(outage.verdict.model_used, sentinel_core::MODEL_FALLBACK_FAILED);
}

/// Confidence is always within `[0.0, 1.0]` regardless of which path
/// produced it.
#[tokio::test]
async fn test_confidence_score_stays_in_unit_range() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([[{"label": "injection", "score": 1.0}]])),
        )
        .mount(&server)
        .await;

    let descriptors = vec![classification_descriptor(
        "m1",
        1,
        format!("{}/classify", server.uri()),
    )];
    let orchestrator = Orchestrator::new(descriptors, OrchestratorConfig::default()).unwrap();
    let outcome = orchestrator.detect(DetectionRequest::new("anything")).await;

    assert!((0.0..=1.0).contains(&outcome.verdict.score));
}

/// `is_malicious` is exactly `score >= effective_threshold`, never an
/// independent judgment.
#[tokio::test]
async fn test_is_malicious_matches_threshold_comparison() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([[{"label": "injection", "score": 0.5}]])),
        )
        .mount(&server)
        .await;

    let descriptors = vec![classification_descriptor(
        "m1",
        1,
        format!("{}/classify", server.uri()),
    )];
    let orchestrator = Orchestrator::new(descriptors, OrchestratorConfig::default()).unwrap();

    let below = orchestrator
        .detect(DetectionRequest::new("x").with_confidence_threshold(0.6))
        .await;
    assert!(!below.verdict.is_malicious);

    let above = orchestrator
        .detect(DetectionRequest::new("x").with_confidence_threshold(0.4))
        .await;
    assert!(above.verdict.is_malicious);
}

/// An OPEN breaker's descriptor never reaches the network.
#[tokio::test]
async fn test_open_circuit_admits_no_network_call() {
    let server = MockServer::start().await;
    let hits = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counted = hits.clone();
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(move |_: &wiremock::Request| {
            counted.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            ResponseTemplate::new(500)
        })
        .mount(&server)
        .await;

    let mut descriptor = classification_descriptor("m1", 1, format!("{}/classify", server.uri()));
    descriptor.breaker_config = BreakerConfig::new().with_failure_threshold(1);
    let orchestrator = Orchestrator::new(vec![descriptor], OrchestratorConfig::default()).unwrap();

    orchestrator.detect(DetectionRequest::new("first")).await;
    assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);

    orchestrator.detect(DetectionRequest::new("second")).await;
    assert_eq!(
        hits.load(std::sync::atomic::Ordering::SeqCst),
        1,
        "breaker must block the second request before any network call"
    );
}

/// Descriptors are tried in ascending-priority order — a lower-priority
/// model never wins over a succeeding higher-priority one.
#[tokio::test]
async fn test_descriptors_tried_in_priority_order() {
    let high_priority_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([[{"label": "safe", "score": 0.9}]])),
        )
        .mount(&high_priority_server)
        .await;

    let low_priority_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([[{"label": "safe", "score": 0.9}]])),
        )
        .mount(&low_priority_server)
        .await;

    let descriptors = vec![
        classification_descriptor(
            "low-priority",
            99,
            format!("{}/classify", low_priority_server.uri()),
        ),
        classification_descriptor(
            "high-priority",
            1,
            format!("{}/classify", high_priority_server.uri()),
        ),
    ];
    let orchestrator = Orchestrator::new(descriptors, OrchestratorConfig::default()).unwrap();
    let outcome = orchestrator.detect(DetectionRequest::new("hello")).await;

    assert_eq!(outcome.verdict.model_used, "high-priority");
}

/// The preprocessor is idempotent on plain text — no encoding family ever
/// fires on text that isn't actually encoded.
#[test]
fn test_preprocessor_idempotent_on_plaintext() {
    let text = "could you summarize this quarterly report for me?";
    assert_eq!(expand_candidates(text), vec![text.to_string()]);
}

/// Resetting a breaker always yields a fully clean state, not merely
/// CLOSED with stale counters.
#[tokio::test]
async fn test_breaker_reset_clears_counters_and_backoff() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut descriptor = classification_descriptor("m1", 1, format!("{}/classify", server.uri()));
    descriptor.breaker_config = BreakerConfig::new()
        .with_failure_threshold(1)
        .with_base_timeout(Duration::from_millis(50))
        .with_max_timeout(Duration::from_secs(10));
    let orchestrator = Orchestrator::new(vec![descriptor], OrchestratorConfig::default()).unwrap();

    orchestrator.detect(DetectionRequest::new("trip")).await;
    let tripped = orchestrator.breaker_stats().await;
    assert!(tripped["m1"].is_open);
    assert_eq!(tripped["m1"].consecutive_failures, 1);

    orchestrator.reset_breaker("m1").await.unwrap();
    let reset = orchestrator.breaker_stats().await;
    assert!(!reset["m1"].is_open);
    assert_eq!(reset["m1"].consecutive_failures, 0);
    assert_eq!(reset["m1"].timeout_duration, Duration::from_millis(50));
}
