//! Metric extraction from document text.
//!
//! A fixed, ordered regex rule set pulls atomic data points out of a
//! title/body pair: percentages, currency amounts, counts, rankings, and
//! forecast metrics. Labeled rules prefix their output (`value:`,
//! `count:`, `rank:`, `metric:`) so downstream substring scans can
//! categorize points without re-parsing; percentage points lead with the
//! raw match instead. Extraction is deterministic: rules run in
//! declaration order, the title is scanned before the body.

use lacuna_core::error::ExtractionError;
use lacuna_core::provider::ExtractionEngine;
use regex::Regex;

/// Documents larger than this are rejected as malformed rather than
/// scanned.
const MAX_DOCUMENT_BYTES: usize = 1_048_576;

struct Rule {
    /// Prefix for extracted points; `None` leads with the raw match.
    label: Option<&'static str>,
    pattern: Regex,
}

/// Regex-based [`ExtractionEngine`] with a fixed metric rule set.
pub struct MetricExtractor {
    rules: Vec<Rule>,
}

impl MetricExtractor {
    /// Compile the rule set.
    pub fn new() -> Result<Self, ExtractionError> {
        let rule = |label: Option<&'static str>, pattern: &str| -> Result<Rule, ExtractionError> {
            Ok(Rule {
                label,
                pattern: Regex::new(pattern).map_err(|e| ExtractionError::Pattern {
                    message: e.to_string(),
                })?,
            })
        };

        Ok(Self {
            rules: vec![
                // Percentages: "15%", "12.5 %"
                rule(None, r"\d+(?:\.\d+)?\s?%")?,
                // Currency amounts: "$4.2 billion", "$1,200", "$3B"
                rule(
                    Some("value:"),
                    r"\$\s?\d[\d,]*(?:\.\d+)?(?:\s?(?i:trillion|billion|million|thousand)\b|\s?[BMK]\b)?",
                )?,
                // Counted populations: "2,300 clinics", "40,000 users"
                rule(
                    Some("count:"),
                    r"(?i)\b\d[\d,]*\+?\s+(?:users|customers|companies|patients|subscribers|employees|units|locations|clinics|providers)\b",
                )?,
                // Rankings: "#1", "No. 3", "top 10", "ranked 2nd"
                rule(
                    Some("rank:"),
                    r"(?i)(?:#\d+|\bno\.\s?\d+|\btop\s+\d+\b|\branked\s+\d+(?:st|nd|rd|th)?)",
                )?,
                // Forecast metrics: "CAGR of 12.5%", "projected to reach 40%"
                rule(
                    Some("metric:"),
                    r"(?i)\b(?:cagr|forecast|forecasted|projected|expected)\b[^.\n]{0,60}?\d[\d,.]*\s?%?",
                )?,
            ],
        })
    }
}

impl ExtractionEngine for MetricExtractor {
    fn extract(&self, title: &str, body: &str) -> Result<Vec<String>, ExtractionError> {
        if body.len() > MAX_DOCUMENT_BYTES {
            return Err(ExtractionError::MalformedContent {
                message: format!(
                    "document body of {} bytes exceeds the {MAX_DOCUMENT_BYTES} byte limit",
                    body.len()
                ),
            });
        }

        let mut points = Vec::new();
        for text in [title, body] {
            for rule in &self.rules {
                for found in rule.pattern.find_iter(text) {
                    let sentence = surrounding_sentence(text, found.start(), found.end());
                    let point = match rule.label {
                        Some(label) => format!("{label} {} {sentence}", found.as_str()),
                        None => format!("{} {sentence}", found.as_str()),
                    };
                    points.push(point);
                }
            }
        }
        Ok(points)
    }
}

/// The sentence containing a match, trimmed. Sentence boundaries are
/// periods, exclamation/question marks, and newlines outside the match.
fn surrounding_sentence(text: &str, start: usize, end: usize) -> String {
    let boundary = |c: char| matches!(c, '.' | '!' | '?' | '\n');
    let sentence_start = text[..start].rfind(boundary).map(|i| i + 1).unwrap_or(0);
    let sentence_end = text[end..]
        .find(boundary)
        .map(|i| end + i)
        .unwrap_or(text.len());
    text[sentence_start..sentence_end].trim().to_string()
}
