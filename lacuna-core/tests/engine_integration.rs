//! Integration tests for the research engine.
//!
//! These drive the full loop end-to-end against deterministic provider
//! and extractor doubles: no network, no clocks, reproducible results.

use lacuna_core::config::ResearchConfig;
use lacuna_core::error::ProviderError;
use lacuna_core::provider::{
    ScriptStep, ScriptedSearchProvider, SearchProvider, StaticExtractor, StaticSearchProvider,
};
use lacuna_core::research::engine::ResearchEngine;
use lacuna_core::types::Document;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn make_engine(
    provider: Arc<dyn SearchProvider>,
    extractor: Arc<StaticExtractor>,
) -> ResearchEngine {
    ResearchEngine::new(ResearchConfig::default(), provider, extractor)
}

#[tokio::test]
async fn test_single_iteration_resolves_gap_and_scores_coverage() {
    init_tracing();

    let doc = Document::new("report", "https://example.com/report", "X grew 15% in 2024");
    let provider = Arc::new(StaticSearchProvider::new().with_fallback(vec![doc]));
    let extractor = Arc::new(
        StaticExtractor::new().with_points("report", vec!["15% X grew 15% in 2024".into()]),
    );
    let engine = make_engine(provider, extractor);

    let result = engine
        .research(&["X market growth".to_string()], 1, 1)
        .await;

    assert_eq!(result.iterations_used, 1);
    assert_eq!(result.gaps_filled, vec!["X market growth".to_string()]);
    assert!(result.gaps_remaining.is_empty());
    assert_eq!(result.key_data_points, vec!["15% X grew 15% in 2024".to_string()]);
    assert_eq!(result.sources, vec!["https://example.com/report".to_string()]);
    // Full gap fill, one data point: 0.5 * 1.0 + 0.5 * 0.1
    assert!((result.coverage - 0.55).abs() < 1e-9);
}

#[tokio::test]
async fn test_failing_provider_yields_low_coverage_not_errors() {
    let provider = Arc::new(ScriptedSearchProvider::new(vec![
        ScriptStep::Failure("dns failure".into()),
        ScriptStep::Failure("dns failure".into()),
        ScriptStep::Failure("dns failure".into()),
    ]));
    let extractor = Arc::new(StaticExtractor::new());
    let engine = make_engine(provider, extractor);

    let gaps = vec!["offshore wind capacity".to_string()];
    let result = engine.research(&gaps, 3, 5).await;

    assert_eq!(result.iterations_used, 3);
    assert_eq!(result.coverage, 0.0);
    assert!(result.key_data_points.is_empty());
    assert_eq!(result.gaps_remaining, gaps);
    assert!(result.gaps_filled.is_empty());
}

#[tokio::test]
async fn test_two_identical_runs_are_byte_identical() {
    let doc_a = Document::new("doc-a", "https://example.com/a", "body");
    let doc_b = Document::new("doc-b", "https://example.com/b", "body");
    let provider = Arc::new(
        StaticSearchProvider::new()
            .with_response(
                "alpha market market size statistics",
                vec![doc_a.clone(), doc_b.clone()],
            )
            .with_fallback(vec![doc_a]),
    );
    let extractor = Arc::new(
        StaticExtractor::new()
            .with_points("doc-a", vec!["value: $2 billion alpha spending".into()])
            .with_points("doc-b", vec!["count: 4,000 providers onboard".into()]),
    );

    let engine_one = make_engine(provider.clone(), extractor.clone());
    let engine_two = make_engine(provider, extractor);

    let gaps = vec![
        "alpha market".to_string(),
        "xylophone exports".to_string(),
    ];
    let first = engine_one.research(&gaps, 6, 5).await;
    let second = engine_two.research(&gaps, 6, 5).await;

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_budget_is_never_exceeded() {
    let provider = Arc::new(StaticSearchProvider::new());
    let extractor = Arc::new(StaticExtractor::new());
    let engine = make_engine(provider, extractor);

    for budget in [1, 2, 7] {
        let result = engine
            .research(&["deep sea mining permits".to_string()], budget, 3)
            .await;
        assert!(result.iterations_used <= budget);
    }
}

#[tokio::test]
async fn test_summary_reports_queries_points_and_sources() {
    let doc = Document::new("report", "https://example.com/r", "body");
    let provider = Arc::new(StaticSearchProvider::new().with_fallback(vec![doc]));
    let extractor = Arc::new(
        StaticExtractor::new().with_points("report", vec!["38% of patients enrolled".into()]),
    );
    let engine = make_engine(provider, extractor);

    let result = engine
        .research(&["patient enrollment trends".to_string()], 2, 5)
        .await;

    assert!(result.summary.contains("## Queries Issued (2)"));
    assert!(
        result
            .summary
            .contains("patient enrollment trends market size statistics [initial]")
    );
    assert!(result.summary.contains("### Percentages"));
    assert!(result.summary.contains("- 38% of patients enrolled"));
    assert!(result.summary.contains("- https://example.com/r"));
}

/// Provider that cancels a token once it has served `after` calls, then
/// keeps returning empty results.
struct CancelAfterProvider {
    token: Mutex<Option<CancellationToken>>,
    after: usize,
    calls: AtomicUsize,
}

impl CancelAfterProvider {
    fn new(after: usize) -> Self {
        Self {
            token: Mutex::new(None),
            after,
            calls: AtomicUsize::new(0),
        }
    }

    fn arm(&self, token: CancellationToken) {
        *self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(token);
    }
}

#[async_trait::async_trait]
impl SearchProvider for CancelAfterProvider {
    async fn search(
        &self,
        _query: &str,
        _max_results: usize,
    ) -> Result<Vec<Document>, ProviderError> {
        let calls = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if calls >= self.after {
            if let Some(token) = self
                .token
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .as_ref()
            {
                token.cancel();
            }
        }
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_cancellation_mid_run_returns_best_effort_result() {
    let provider = Arc::new(CancelAfterProvider::new(2));
    let extractor = Arc::new(StaticExtractor::new());
    let engine = ResearchEngine::new(
        ResearchConfig::default(),
        provider.clone(),
        extractor,
    );
    provider.arm(engine.cancellation_token());

    let gaps = vec!["quantum sensing adoption".to_string()];
    let result = engine.research(&gaps, 10, 5).await;

    // The token cancels during step 2; the check at the top of step 3
    // stops the loop, so exactly two completed steps are reported.
    assert_eq!(result.iterations_used, 2);
    assert!(result.summary.contains("## Queries Issued (2)"));
    assert_eq!(result.gaps_remaining, gaps);
}
