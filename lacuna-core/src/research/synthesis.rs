//! Result synthesis: assembles the final structured research result.
//!
//! Pure and idempotent; identical inputs always produce identical output
//! text, which is what makes whole-run determinism testable.

use crate::research::orchestrator::ResearchState;
use crate::types::{Query, ResearchResult};

/// Display cap per data point bucket.
const MAX_DISPLAYED_PER_BUCKET: usize = 5;
/// Display cap for the source list.
const MAX_DISPLAYED_SOURCES: usize = 5;

/// Data points mentioning growth language land in the growth bucket.
const GROWTH_KEYWORDS: [&str; 6] = ["grow", "growth", "increase", "decline", "trend", "cagr"];

/// Data points mentioning monetary scale land in the amount bucket.
const AMOUNT_KEYWORDS: [&str; 4] = ["million", "billion", "thousand", "revenue"];

/// Named SaaS metrics, matched case-sensitively to avoid hitting ordinary
/// words ("carrying" contains "arr").
const NAMED_METRICS: [&str; 4] = ["ARR", "MRR", "CAC", "LTV"];

/// Five display buckets. A data point lands in the first bucket that
/// matches; matching is substring scanning only, never parsing.
struct Buckets<'a> {
    percentages: Vec<&'a str>,
    growth: Vec<&'a str>,
    amounts: Vec<&'a str>,
    named_metrics: Vec<&'a str>,
    other: Vec<&'a str>,
}

impl<'a> Buckets<'a> {
    fn partition(data_points: &'a [String]) -> Self {
        let mut buckets = Self {
            percentages: Vec::new(),
            growth: Vec::new(),
            amounts: Vec::new(),
            named_metrics: Vec::new(),
            other: Vec::new(),
        };
        for point in data_points {
            let lower = point.to_lowercase();
            if point.contains('%') {
                buckets.percentages.push(point);
            } else if GROWTH_KEYWORDS.iter().any(|k| lower.contains(k)) {
                buckets.growth.push(point);
            } else if point.contains('$') || AMOUNT_KEYWORDS.iter().any(|k| lower.contains(k)) {
                buckets.amounts.push(point);
            } else if NAMED_METRICS.iter().any(|k| point.contains(k)) {
                buckets.named_metrics.push(point);
            } else {
                buckets.other.push(point);
            }
        }
        buckets
    }
}

/// Builds the final [`ResearchResult`] from accumulated run state.
pub struct ResultSynthesizer;

impl ResultSynthesizer {
    /// Assemble the result: summary report, sources and data points in
    /// insertion order, gap partition in original gap order.
    pub fn synthesize(state: &ResearchState, coverage: f64) -> ResearchResult {
        ResearchResult {
            summary: Self::build_summary(
                &state.issued_queries,
                &state.all_data_points,
                &state.all_sources,
            ),
            sources: state.all_sources.clone(),
            key_data_points: state.all_data_points.clone(),
            iterations_used: state.iteration,
            coverage,
            gaps_filled: state.tracker.resolved_texts(),
            gaps_remaining: state.tracker.remaining_texts(),
        }
    }

    /// The structured text report: queries in issuance order, bucketed
    /// data points, then up to five sources.
    fn build_summary(
        issued_queries: &[Query],
        data_points: &[String],
        sources: &[String],
    ) -> String {
        let mut out = String::from("# Research Summary\n\n");

        out.push_str(&format!("## Queries Issued ({})\n\n", issued_queries.len()));
        for (i, query) in issued_queries.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} [{}]\n",
                i + 1,
                query.text,
                query.origin.as_str()
            ));
        }

        out.push_str(&format!("\n## Key Data Points ({})\n", data_points.len()));
        let buckets = Buckets::partition(data_points);
        Self::push_bucket(&mut out, "Percentages", &buckets.percentages);
        Self::push_bucket(&mut out, "Growth Indicators", &buckets.growth);
        Self::push_bucket(&mut out, "Monetary Amounts", &buckets.amounts);
        Self::push_bucket(&mut out, "Named Metrics", &buckets.named_metrics);
        Self::push_bucket(&mut out, "Other Findings", &buckets.other);

        out.push_str(&format!("\n## Sources ({})\n\n", sources.len()));
        for url in sources.iter().take(MAX_DISPLAYED_SOURCES) {
            out.push_str(&format!("- {url}\n"));
        }

        out
    }

    fn push_bucket(out: &mut String, heading: &str, points: &[&str]) {
        if points.is_empty() {
            return;
        }
        out.push_str(&format!("\n### {heading} ({})\n\n", points.len()));
        for point in points.iter().take(MAX_DISPLAYED_PER_BUCKET) {
            out.push_str(&format!("- {point}\n"));
        }
    }
}
