//! Research engine facade: owns the collaborators and runs the loop.

use crate::config::ResearchConfig;
use crate::provider::{ExtractionEngine, SearchProvider};
use crate::research::coverage::CoverageScorer;
use crate::research::orchestrator::{
    NoOpResearchCallback, ResearchCallback, ResearchState, SearchOrchestrator,
};
use crate::research::synthesis::ResultSynthesizer;
use crate::types::ResearchResult;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// The gap-filling research engine.
///
/// Owns the search provider, extraction engine, progress callback, and a
/// cancellation token. Each call to [`ResearchEngine::research`] runs on
/// its own [`ResearchState`]; the engine itself holds no per-run state.
pub struct ResearchEngine {
    config: ResearchConfig,
    provider: Arc<dyn SearchProvider>,
    extractor: Arc<dyn ExtractionEngine>,
    callback: Arc<dyn ResearchCallback>,
    cancellation: CancellationToken,
}

impl ResearchEngine {
    /// Create an engine with no progress callback.
    pub fn new(
        config: ResearchConfig,
        provider: Arc<dyn SearchProvider>,
        extractor: Arc<dyn ExtractionEngine>,
    ) -> Self {
        Self::with_callback(config, provider, extractor, Arc::new(NoOpResearchCallback))
    }

    /// Create an engine that reports progress through `callback`.
    pub fn with_callback(
        config: ResearchConfig,
        provider: Arc<dyn SearchProvider>,
        extractor: Arc<dyn ExtractionEngine>,
        callback: Arc<dyn ResearchCallback>,
    ) -> Self {
        Self {
            config,
            provider,
            extractor,
            callback,
            cancellation: CancellationToken::new(),
        }
    }

    /// Get a cancellation token for the engine's runs.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Cancel any in-flight run between steps. The run returns the
    /// best-effort result built from whatever state has accumulated.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Reset the cancellation token so the engine can run again after a
    /// cancelled run.
    pub fn reset_cancellation(&mut self) {
        self.cancellation = CancellationToken::new();
    }

    /// Get the engine config.
    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }

    /// Run the full gap-filling loop and synthesize the result.
    ///
    /// Total: provider and extraction failures are recovered inside the
    /// loop, and `max_iterations` / `results_per_search` below 1 are
    /// clamped to 1 rather than rejected. Callers judge success from
    /// `coverage`, `key_data_points`, and `gaps_remaining`.
    pub async fn research(
        &self,
        gaps: &[String],
        max_iterations: usize,
        results_per_search: usize,
    ) -> ResearchResult {
        let max_iterations = max_iterations.max(1);
        let results_per_search = results_per_search.max(1);

        let run_id = Uuid::new_v4();
        let mut state = ResearchState::new(gaps);
        tracing::info!(
            run_id = %run_id,
            gaps = state.tracker.original_count(),
            initial_queries = state.query_queue.len(),
            max_iterations,
            "Starting research run"
        );

        let orchestrator = SearchOrchestrator::new(
            self.provider.clone(),
            self.extractor.clone(),
            self.callback.clone(),
            self.cancellation.clone(),
            max_iterations,
            results_per_search,
        );
        orchestrator.run(&mut state).await;

        let coverage = CoverageScorer::score(
            state.tracker.original_count(),
            state.tracker.remaining_count(),
            state.all_data_points.len(),
        );
        let result = ResultSynthesizer::synthesize(&state, coverage);
        tracing::info!(
            run_id = %run_id,
            iterations = result.iterations_used,
            coverage = result.coverage,
            data_points = result.key_data_points.len(),
            gaps_remaining = result.gaps_remaining.len(),
            "Research run complete"
        );
        result
    }

    /// Run with the iteration and per-search budgets from the config.
    pub async fn research_with_defaults(&self, gaps: &[String]) -> ResearchResult {
        self.research(
            gaps,
            self.config.max_iterations,
            self.config.results_per_search,
        )
        .await
    }
}
