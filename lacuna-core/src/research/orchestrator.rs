//! The search orchestrator: a FIFO query loop with an iteration budget.
//!
//! One query is the unit of work per iteration. Provider failures degrade
//! the step to an empty result set; the loop itself never fails. There is
//! no early exit when every gap resolves: remaining budget keeps buying
//! evidence density.

use crate::provider::{ExtractionEngine, SearchProvider};
use crate::research::gaps::GapTracker;
use crate::research::queries::QueryGenerator;
use crate::types::Query;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Callback trait for progressive research UI updates.
pub trait ResearchCallback: Send + Sync {
    /// Called at the start of each loop iteration.
    fn on_iteration_start(&self, _iteration: usize, _max_iterations: usize) {}
    /// Called when a query's search and extraction complete.
    fn on_query_complete(&self, _query: &str, _data_points_found: usize) {}
    /// Called when evidence resolves a gap.
    fn on_gap_resolved(&self, _gap: &str) {}
    /// Called when the stagnation check enqueues breakthrough queries.
    fn on_stagnation(&self, _iteration: usize) {}
}

/// No-op callback for headless use and testing.
pub struct NoOpResearchCallback;

impl ResearchCallback for NoOpResearchCallback {}

/// Working memory for one research run, owned by the call.
///
/// Never shared between runs and never stored globally, so two concurrent
/// runs cannot observe each other.
pub struct ResearchState {
    /// Open and resolved gaps.
    pub tracker: GapTracker,
    /// Deduplicated source URLs in discovery order.
    pub all_sources: Vec<String>,
    seen_sources: HashSet<String>,
    /// Cumulative extracted data points, insertion order preserved.
    /// Duplicates are possible across iterations but not within one
    /// iteration's batch.
    pub all_data_points: Vec<String>,
    /// Pending queries, consumed FIFO.
    pub query_queue: VecDeque<Query>,
    /// Queries already executed, in issuance order.
    pub issued_queries: Vec<Query>,
    /// Completed loop iterations.
    pub iteration: usize,
    /// Cumulative data point count at the end of the previous step, used
    /// by the stagnation check.
    pub data_point_count_at_last_check: usize,
}

impl ResearchState {
    /// Build the state for a fresh run: gaps tracked, initial fan-out
    /// queue seeded.
    pub fn new(gaps: &[String]) -> Self {
        let tracker = GapTracker::new(gaps);
        let query_queue = QueryGenerator::initial_queue(&tracker.gap_texts());
        Self {
            tracker,
            all_sources: Vec::new(),
            seen_sources: HashSet::new(),
            all_data_points: Vec::new(),
            query_queue,
            issued_queries: Vec::new(),
            iteration: 0,
            data_point_count_at_last_check: 0,
        }
    }

    /// Union a URL into the source set, keeping discovery order. Empty
    /// URLs are ignored.
    pub fn add_source(&mut self, url: &str) {
        if !url.is_empty() && self.seen_sources.insert(url.to_string()) {
            self.all_sources.push(url.to_string());
        }
    }
}

/// Drives the research loop against a search provider and an extraction
/// engine.
pub struct SearchOrchestrator {
    provider: Arc<dyn SearchProvider>,
    extractor: Arc<dyn ExtractionEngine>,
    callback: Arc<dyn ResearchCallback>,
    cancellation: CancellationToken,
    max_iterations: usize,
    results_per_search: usize,
}

impl SearchOrchestrator {
    /// Create an orchestrator. `max_iterations` and `results_per_search`
    /// are expected to be at least 1; the engine entrypoint clamps them.
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        extractor: Arc<dyn ExtractionEngine>,
        callback: Arc<dyn ResearchCallback>,
        cancellation: CancellationToken,
        max_iterations: usize,
        results_per_search: usize,
    ) -> Self {
        Self {
            provider,
            extractor,
            callback,
            cancellation,
            max_iterations,
            results_per_search,
        }
    }

    /// Run the loop to completion: queue drained, budget exhausted, or
    /// cancelled between steps. Infallible; every boundary failure is
    /// recovered within its step.
    pub async fn run(&self, state: &mut ResearchState) {
        while !state.query_queue.is_empty() && state.iteration < self.max_iterations {
            if self.cancellation.is_cancelled() {
                info!(
                    iteration = state.iteration,
                    "Research cancelled, keeping accumulated state"
                );
                break;
            }
            self.step(state).await;
        }
    }

    /// One iteration: pop a query, search, extract, update gaps, decide
    /// what to enqueue next, check stagnation.
    async fn step(&self, state: &mut ResearchState) {
        state.iteration += 1;
        let Some(query) = state.query_queue.pop_front() else {
            return;
        };

        self.callback
            .on_iteration_start(state.iteration, self.max_iterations);
        debug!(
            iteration = state.iteration,
            query = %query.text,
            origin = query.origin.as_str(),
            "Executing search step"
        );

        let documents = match self
            .provider
            .search(&query.text, self.results_per_search)
            .await
        {
            Ok(documents) => documents,
            Err(error) => {
                warn!(
                    iteration = state.iteration,
                    query = %query.text,
                    error = %error,
                    "Search failed, continuing with empty results"
                );
                Vec::new()
            }
        };

        // Extract, deduplicating within this iteration's batch only.
        let mut hits_this_iteration: Vec<String> = Vec::new();
        let mut seen_this_iteration: HashSet<String> = HashSet::new();
        for document in &documents {
            state.add_source(&document.url);
            match self.extractor.extract(&document.title, &document.content) {
                Ok(points) => {
                    for point in points {
                        if seen_this_iteration.insert(point.clone()) {
                            hits_this_iteration.push(point);
                        }
                    }
                }
                Err(error) => {
                    debug!(
                        url = %document.url,
                        error = %error,
                        "Extraction failed for document, skipping"
                    );
                }
            }
        }
        state
            .all_data_points
            .extend(hits_this_iteration.iter().cloned());

        let resolved = state
            .tracker
            .mark_resolved_from_evidence(&hits_this_iteration);
        for gap_text in &resolved {
            state.tracker.resolve(gap_text);
            self.callback.on_gap_resolved(gap_text);
            info!(iteration = state.iteration, gap = %gap_text, "Gap resolved");
        }

        let remaining = state.tracker.remaining_texts();
        if !remaining.is_empty() && state.iteration < self.max_iterations {
            if !hits_this_iteration.is_empty() {
                let follow_ups = QueryGenerator::deep_follow_up(&hits_this_iteration, &remaining);
                debug!(
                    iteration = state.iteration,
                    queries = follow_ups.len(),
                    "Enqueueing deep follow-up queries"
                );
                state.query_queue.extend(follow_ups);
            } else {
                let alternatives = QueryGenerator::alternative_angle(&remaining[0]);
                debug!(
                    iteration = state.iteration,
                    queries = alternatives.len(),
                    gap = %remaining[0],
                    "Empty step, enqueueing alternative-angle queries"
                );
                state.query_queue.extend(alternatives);
            }
        }

        // Stagnation check, sampled on even iterations: no cumulative
        // growth since the previous step while gaps stay open.
        if state.iteration % 2 == 0
            && state.all_data_points.len() == state.data_point_count_at_last_check
            && !remaining.is_empty()
        {
            let breakthroughs = QueryGenerator::breakthrough(&remaining);
            info!(
                iteration = state.iteration,
                queries = breakthroughs.len(),
                "Stagnation detected, enqueueing breakthrough queries"
            );
            self.callback.on_stagnation(state.iteration);
            state.query_queue.extend(breakthroughs);
        }
        // Updated every step, not only on even iterations.
        state.data_point_count_at_last_check = state.all_data_points.len();

        self.callback
            .on_query_complete(&query.text, hits_this_iteration.len());
        state.issued_queries.push(query);
    }
}
