//! Query generation strategies.
//!
//! Four pure expansion strategies feed the orchestrator's queue: the
//! comprehensive initial fan-out, deep follow-up after an iteration with
//! evidence, alternative angles after an empty iteration, and breakthrough
//! queries after stagnation. No network or LLM calls; identical inputs
//! always produce identical query lists.

use crate::types::{Query, QueryOrigin};
use std::collections::VecDeque;

/// Gap texts containing any of these get five extra healthcare-angle
/// queries in the initial fan-out.
pub const HEALTH_KEYWORDS: [&str; 8] = [
    "health",
    "medical",
    "disease",
    "patient",
    "treatment",
    "diagnostic",
    "drug",
    "therapy",
];

/// Gap texts containing any of these get three extra economic-angle
/// queries in the initial fan-out.
pub const BUSINESS_KEYWORDS: [&str; 7] = [
    "market",
    "growth",
    "business",
    "revenue",
    "sales",
    "economic",
    "financial",
];

/// Pure query expansion strategies.
pub struct QueryGenerator;

impl QueryGenerator {
    /// Comprehensive multi-angle fan-out for one gap.
    ///
    /// Ten base queries, two per analytical angle (market size/growth,
    /// industry metrics, competitive analysis, demographics, forecast),
    /// plus five healthcare-angle queries when the gap text contains a
    /// health keyword and three economic-angle queries when it contains a
    /// business keyword. 10 to 18 queries per gap.
    pub fn comprehensive(gap: &str) -> Vec<Query> {
        let mut texts = vec![
            format!("{gap} market size statistics"),
            format!("{gap} market growth rate"),
            format!("{gap} industry metrics data"),
            format!("{gap} key industry benchmarks"),
            format!("{gap} competitive landscape analysis"),
            format!("{gap} leading companies market share"),
            format!("{gap} demographic breakdown statistics"),
            format!("{gap} customer segments by age and income"),
            format!("{gap} market forecast outlook"),
            format!("{gap} projected trends next five years"),
        ];

        let lower = gap.to_lowercase();
        if HEALTH_KEYWORDS.iter().any(|k| lower.contains(k)) {
            texts.extend([
                format!("{gap} clinical outcomes data"),
                format!("{gap} patient population statistics"),
                format!("{gap} treatment cost analysis"),
                format!("{gap} healthcare utilization rates"),
                format!("{gap} regulatory approval landscape"),
            ]);
        }
        if BUSINESS_KEYWORDS.iter().any(|k| lower.contains(k)) {
            texts.extend([
                format!("{gap} annual revenue figures"),
                format!("{gap} economic impact analysis"),
                format!("{gap} investment and funding trends"),
            ]);
        }

        texts
            .into_iter()
            .map(|text| Query::new(text, QueryOrigin::Initial))
            .collect()
    }

    /// The initial queue: comprehensive fan-out concatenated across all
    /// gaps, gap order then angle order preserved.
    pub fn initial_queue(gaps: &[String]) -> VecDeque<Query> {
        gaps.iter()
            .flat_map(|gap| Self::comprehensive(gap))
            .collect()
    }

    /// Deep follow-up after an iteration that yielded evidence.
    ///
    /// Each trigger is tested independently against the iteration's data
    /// points: percentages prompt an absolute-numbers query, currency
    /// markers a growth-trend query, count/metric markers a breakdown
    /// query. When more than one gap remains open, a plain statistics
    /// query targets the second remaining gap to diversify coverage
    /// instead of drilling only the first. 0 to 4 queries.
    pub fn deep_follow_up(iteration_data_points: &[String], remaining: &[String]) -> Vec<Query> {
        let Some(first) = remaining.first() else {
            return Vec::new();
        };

        let mut queries = Vec::new();
        if iteration_data_points.iter().any(|p| p.contains('%')) {
            queries.push(Query::new(
                format!("{first} absolute numbers total figures"),
                QueryOrigin::DeepFollowUp,
            ));
        }
        if iteration_data_points
            .iter()
            .any(|p| p.contains('$') || p.contains("value:"))
        {
            queries.push(Query::new(
                format!("{first} growth trend over time"),
                QueryOrigin::DeepFollowUp,
            ));
        }
        if iteration_data_points
            .iter()
            .any(|p| p.contains("count:") || p.contains("metric:"))
        {
            queries.push(Query::new(
                format!("{first} detailed breakdown by category"),
                QueryOrigin::DeepFollowUp,
            ));
        }
        if remaining.len() > 1 {
            queries.push(Query::new(
                format!("{} statistics data", remaining[1]),
                QueryOrigin::DeepFollowUp,
            ));
        }
        queries
    }

    /// Alternative angles after an iteration that yielded nothing.
    ///
    /// Exactly five fixed-angle queries targeting the given gap.
    pub fn alternative_angle(gap: &str) -> Vec<Query> {
        [
            format!("{gap} industry report whitepaper"),
            format!("{gap} latest news developments"),
            format!("{gap} academic research study"),
            format!("{gap} government statistics official data"),
            format!("{gap} company earnings report"),
        ]
        .into_iter()
        .map(|text| Query::new(text, QueryOrigin::AlternativeAngle))
        .collect()
    }

    /// Breakthrough queries after stagnation: four angles for each of the
    /// first two remaining gaps. 4 to 8 queries.
    pub fn breakthrough(remaining: &[String]) -> Vec<Query> {
        remaining
            .iter()
            .take(2)
            .flat_map(|gap| {
                [
                    format!("{gap} general overview"),
                    format!("{gap} industry context background"),
                    format!("{gap} statistics facts numbers"),
                    format!("{gap} rankings comparison benchmark"),
                ]
            })
            .map(|text| Query::new(text, QueryOrigin::Breakthrough))
            .collect()
    }
}
