//! Search provider and extraction engine boundaries.
//!
//! The orchestrator drives both collaborators through trait objects, so
//! network search and pattern extraction stay swappable and the whole
//! loop is testable against the deterministic doubles defined here.

use crate::error::{ExtractionError, ProviderError};
use crate::types::Document;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Executes a search and returns ranked documents.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search for `query`, returning up to `max_results` documents.
    ///
    /// Implementations must return an error value rather than panicking
    /// on network or authentication failure.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Document>, ProviderError>;
}

/// Converts a document title/body pair into zero or more data point strings.
pub trait ExtractionEngine: Send + Sync {
    /// Extract atomic data points from one document.
    ///
    /// Must be deterministic and side-effect-free for a given input pair.
    fn extract(&self, title: &str, body: &str) -> Result<Vec<String>, ExtractionError>;
}

/// Deterministic provider for tests: maps exact query text to documents.
///
/// Unknown queries return the fallback set (empty by default), so the
/// provider is a pure function of the query and two identical runs see
/// identical results.
#[derive(Debug, Clone, Default)]
pub struct StaticSearchProvider {
    responses: HashMap<String, Vec<Document>>,
    fallback: Vec<Document>,
}

impl StaticSearchProvider {
    /// Create a provider that returns nothing for every query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the documents returned for an exact query string.
    pub fn with_response(mut self, query: impl Into<String>, documents: Vec<Document>) -> Self {
        self.responses.insert(query.into(), documents);
        self
    }

    /// Set the documents returned for queries with no registered response.
    pub fn with_fallback(mut self, documents: Vec<Document>) -> Self {
        self.fallback = documents;
        self
    }
}

#[async_trait]
impl SearchProvider for StaticSearchProvider {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Document>, ProviderError> {
        let documents = self.responses.get(query).unwrap_or(&self.fallback);
        Ok(documents.iter().take(max_results).cloned().collect())
    }
}

/// One step of a [`ScriptedSearchProvider`] script.
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// Return these documents.
    Documents(Vec<Document>),
    /// Fail the search with a request error carrying this message.
    Failure(String),
}

/// Provider scripted by call index, for scenarios where the interesting
/// behavior depends on *when* a search succeeds rather than on the query
/// text (stagnation, provider-failure recovery). Calls past the end of
/// the script return empty result sets.
#[derive(Debug)]
pub struct ScriptedSearchProvider {
    inner: Mutex<ScriptState>,
}

#[derive(Debug)]
struct ScriptState {
    steps: Vec<ScriptStep>,
    cursor: usize,
}

impl ScriptedSearchProvider {
    /// Create a provider that plays back `steps` in order.
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self {
            inner: Mutex::new(ScriptState { steps, cursor: 0 }),
        }
    }

    /// Number of searches made so far.
    pub fn calls_made(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .cursor
    }
}

#[async_trait]
impl SearchProvider for ScriptedSearchProvider {
    async fn search(
        &self,
        _query: &str,
        max_results: usize,
    ) -> Result<Vec<Document>, ProviderError> {
        let step = {
            let mut state = self
                .inner
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let step = state.steps.get(state.cursor).cloned();
            state.cursor += 1;
            step
        };

        match step {
            Some(ScriptStep::Documents(documents)) => {
                Ok(documents.into_iter().take(max_results).collect())
            }
            Some(ScriptStep::Failure(message)) => Err(ProviderError::Request { message }),
            None => Ok(Vec::new()),
        }
    }
}

/// Extraction double: returns the data points registered for a document
/// title, nothing for unknown titles.
#[derive(Debug, Clone, Default)]
pub struct StaticExtractor {
    points: HashMap<String, Vec<String>>,
}

impl StaticExtractor {
    /// Create an extractor that yields nothing for every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the data points returned for a document title.
    pub fn with_points(mut self, title: impl Into<String>, points: Vec<String>) -> Self {
        self.points.insert(title.into(), points);
        self
    }
}

impl ExtractionEngine for StaticExtractor {
    fn extract(&self, title: &str, _body: &str) -> Result<Vec<String>, ExtractionError> {
        Ok(self.points.get(title).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_doc(title: &str) -> Document {
        Document::new(title, format!("https://example.com/{title}"), "body")
    }

    #[tokio::test]
    async fn test_static_provider_exact_match() {
        let provider = StaticSearchProvider::new()
            .with_response("alpha market size statistics", vec![make_doc("alpha")]);

        let hits = provider
            .search("alpha market size statistics", 5)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);

        let misses = provider.search("unknown query", 5).await.unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn test_static_provider_respects_max_results() {
        let provider = StaticSearchProvider::new()
            .with_fallback(vec![make_doc("a"), make_doc("b"), make_doc("c")]);

        let hits = provider.search("anything", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_scripted_provider_plays_steps_in_order() {
        let provider = ScriptedSearchProvider::new(vec![
            ScriptStep::Documents(vec![make_doc("first")]),
            ScriptStep::Failure("rate limited".into()),
            ScriptStep::Documents(vec![]),
        ]);

        let first = provider.search("q1", 5).await.unwrap();
        assert_eq!(first[0].title, "first");

        let err = provider.search("q2", 5).await.unwrap_err();
        assert!(matches!(err, ProviderError::Request { .. }));

        assert!(provider.search("q3", 5).await.unwrap().is_empty());
        // Past the end of the script: empty, not an error.
        assert!(provider.search("q4", 5).await.unwrap().is_empty());
        assert_eq!(provider.calls_made(), 4);
    }

    #[test]
    fn test_static_extractor() {
        let extractor =
            StaticExtractor::new().with_points("report", vec!["15% adoption growth".into()]);

        let points = extractor.extract("report", "ignored body").unwrap();
        assert_eq!(points, vec!["15% adoption growth".to_string()]);
        assert!(extractor.extract("other", "body").unwrap().is_empty());
    }
}
