//! Gap tracking and evidence-based resolution.
//!
//! The resolution heuristic is deliberately coarse: a gap counts as
//! resolved when any single whitespace token of its lower-cased text
//! appears as a substring of the iteration's evidence. Even short and
//! common tokens count. Swapping in a stricter matcher happens through
//! the [`GapMatcher`] trait, not by changing this default.

use crate::types::Gap;

/// Strategy for deciding whether an evidence blob resolves a gap.
pub trait GapMatcher: Send + Sync {
    /// Does `evidence_blob` (already lower-cased) resolve the gap with
    /// this text?
    fn matches(&self, gap_text: &str, evidence_blob: &str) -> bool;
}

/// Default matcher: any whitespace token of the lower-cased gap text
/// appearing as a substring of the blob resolves the gap.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenOverlapMatcher;

impl GapMatcher for TokenOverlapMatcher {
    fn matches(&self, gap_text: &str, evidence_blob: &str) -> bool {
        gap_text
            .to_lowercase()
            .split_whitespace()
            .any(|token| evidence_blob.contains(token))
    }
}

/// Owns the gap set for a single research run.
///
/// Gaps are never deleted, only flagged resolved, so the original set is
/// always recoverable as the union of open and resolved gaps.
pub struct GapTracker {
    gaps: Vec<Gap>,
    matcher: Box<dyn GapMatcher>,
}

impl GapTracker {
    /// Create a tracker with the default [`TokenOverlapMatcher`].
    ///
    /// Gap text is the identity key: duplicate texts are collapsed to a
    /// single gap, first occurrence wins.
    pub fn new(gap_texts: &[String]) -> Self {
        Self::with_matcher(gap_texts, Box::new(TokenOverlapMatcher))
    }

    /// Create a tracker with a custom resolution strategy.
    pub fn with_matcher(gap_texts: &[String], matcher: Box<dyn GapMatcher>) -> Self {
        let mut gaps: Vec<Gap> = Vec::with_capacity(gap_texts.len());
        for text in gap_texts {
            if !gaps.iter().any(|g| g.text == *text) {
                gaps.push(Gap::new(text.clone()));
            }
        }
        Self { gaps, matcher }
    }

    /// Which open gaps does this iteration's evidence resolve?
    ///
    /// Pure: the tracker is not mutated; the caller applies the result
    /// through [`GapTracker::resolve`]. Empty evidence returns empty, so
    /// a gap is never resolved by the absence of evidence.
    pub fn mark_resolved_from_evidence(&self, iteration_data_points: &[String]) -> Vec<String> {
        if iteration_data_points.is_empty() {
            return Vec::new();
        }
        let blob = iteration_data_points.join(" ").to_lowercase();
        self.gaps
            .iter()
            .filter(|gap| !gap.resolved && self.matcher.matches(&gap.text, &blob))
            .map(|gap| gap.text.clone())
            .collect()
    }

    /// Flag the gap with this text as resolved. Returns false when no
    /// open gap has the text.
    pub fn resolve(&mut self, gap_text: &str) -> bool {
        match self
            .gaps
            .iter_mut()
            .find(|gap| !gap.resolved && gap.text == gap_text)
        {
            Some(gap) => {
                gap.resolved = true;
                true
            }
            None => false,
        }
    }

    /// All gaps in original order.
    pub fn gaps(&self) -> &[Gap] {
        &self.gaps
    }

    /// Texts of all gaps in original order.
    pub fn gap_texts(&self) -> Vec<String> {
        self.gaps.iter().map(|gap| gap.text.clone()).collect()
    }

    /// Texts of open gaps in original order.
    pub fn remaining_texts(&self) -> Vec<String> {
        self.gaps
            .iter()
            .filter(|gap| !gap.resolved)
            .map(|gap| gap.text.clone())
            .collect()
    }

    /// Texts of resolved gaps in original order.
    pub fn resolved_texts(&self) -> Vec<String> {
        self.gaps
            .iter()
            .filter(|gap| gap.resolved)
            .map(|gap| gap.text.clone())
            .collect()
    }

    /// Number of open gaps.
    pub fn remaining_count(&self) -> usize {
        self.gaps.iter().filter(|gap| !gap.resolved).count()
    }

    /// Number of gaps supplied at call start (after dedup).
    pub fn original_count(&self) -> usize {
        self.gaps.len()
    }
}
