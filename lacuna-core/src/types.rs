//! Fundamental types for the Lacuna research engine.

use serde::{Deserialize, Serialize};

/// A document returned by a search provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Document title.
    pub title: String,
    /// Source URL, possibly empty when the provider has none.
    pub url: String,
    /// Readable body text.
    pub content: String,
}

impl Document {
    /// Create a document from its parts.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }
}

/// An open informational question the engine is trying to resolve via search.
///
/// Gap text is the identity key throughout the engine: two gaps with the
/// same text are indistinguishable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Gap {
    /// The question or topic as supplied by the caller.
    pub text: String,
    /// Whether evidence found so far resolves this gap.
    pub resolved: bool,
}

impl Gap {
    /// Create an unresolved gap.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            resolved: false,
        }
    }
}

/// The strategy that produced a query.
///
/// Informational only: surfaced in logs, the summary, and tests. The
/// orchestrator never branches on it after the query is enqueued.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryOrigin {
    /// Comprehensive multi-angle fan-out at call start.
    Initial,
    /// Drill-down after an iteration that yielded evidence.
    DeepFollowUp,
    /// Reframing after an iteration that yielded nothing.
    AlternativeAngle,
    /// Stagnation breakout across the first remaining gaps.
    Breakthrough,
}

impl QueryOrigin {
    /// Stable lowercase label, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryOrigin::Initial => "initial",
            QueryOrigin::DeepFollowUp => "deep_follow_up",
            QueryOrigin::AlternativeAngle => "alternative_angle",
            QueryOrigin::Breakthrough => "breakthrough",
        }
    }
}

/// A single search query, consumed exactly once by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Query {
    /// The query string sent to the search provider.
    pub text: String,
    /// The strategy that generated this query.
    pub origin: QueryOrigin,
}

impl Query {
    /// Create a query.
    pub fn new(text: impl Into<String>, origin: QueryOrigin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }
}

/// Final, immutable output of a research run.
///
/// Contains no timestamps or generated ids, so two runs with identical
/// inputs against deterministic collaborators serialize identically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResearchResult {
    /// Structured text report: queries issued, categorized data points,
    /// and top sources.
    pub summary: String,
    /// Deduplicated source URLs in discovery order.
    pub sources: Vec<String>,
    /// All extracted data points in insertion order.
    pub key_data_points: Vec<String>,
    /// Completed loop iterations; never exceeds the configured budget.
    pub iterations_used: usize,
    /// Composite coverage score in [0, 1].
    pub coverage: f64,
    /// Gaps resolved during the run, in original gap order.
    pub gaps_filled: Vec<String>,
    /// Gaps still open at the end of the run, in original gap order.
    pub gaps_remaining: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_origin_labels() {
        assert_eq!(QueryOrigin::Initial.as_str(), "initial");
        assert_eq!(QueryOrigin::DeepFollowUp.as_str(), "deep_follow_up");
        assert_eq!(QueryOrigin::AlternativeAngle.as_str(), "alternative_angle");
        assert_eq!(QueryOrigin::Breakthrough.as_str(), "breakthrough");
    }

    #[test]
    fn test_query_origin_serde_matches_label() {
        let json = serde_json::to_string(&QueryOrigin::DeepFollowUp).unwrap();
        assert_eq!(json, "\"deep_follow_up\"");
    }

    #[test]
    fn test_gap_starts_unresolved() {
        let gap = Gap::new("telehealth adoption rates");
        assert!(!gap.resolved);
        assert_eq!(gap.text, "telehealth adoption rates");
    }

    #[test]
    fn test_research_result_round_trip() {
        let result = ResearchResult {
            summary: "# Research Summary".into(),
            sources: vec!["https://example.com/a".into()],
            key_data_points: vec!["15% growth".into()],
            iterations_used: 3,
            coverage: 0.55,
            gaps_filled: vec!["alpha".into()],
            gaps_remaining: vec!["beta".into()],
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: ResearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
