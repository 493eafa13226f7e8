//! Web search provider backed by DuckDuckGo instant answers.
//!
//! Privacy-first: queries go directly to DuckDuckGo, no API key required.
//! Response parsing is factored out of the network call so it can be
//! tested against fixture payloads.

use async_trait::async_trait;
use lacuna_core::config::ResearchConfig;
use lacuna_core::error::ProviderError;
use lacuna_core::provider::SearchProvider;
use lacuna_core::types::Document;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = "Lacuna/0.3";

/// Search provider using the DuckDuckGo instant answer API.
pub struct DuckDuckGoProvider {
    client: reqwest::Client,
}

impl DuckDuckGoProvider {
    /// Build a provider with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::Request {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    /// Build a provider from engine configuration.
    pub fn from_config(config: &ResearchConfig) -> Result<Self, ProviderError> {
        Self::new(Duration::from_secs(config.search_timeout_secs))
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Document>, ProviderError> {
        let url = format!(
            "https://api.duckduckgo.com/?q={}&format=json&no_html=1&skip_disambig=1",
            urlencoding::encode(query)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Request {
                message: format!("search request failed: {e}"),
            })?;

        let body: serde_json::Value =
            response.json().await.map_err(|e| ProviderError::ResponseParse {
                message: format!("failed to parse search response: {e}"),
            })?;

        let documents = parse_instant_answers(&body, query, max_results);
        debug!(query = %query, results = documents.len(), "Search complete");
        Ok(documents)
    }
}

/// Map a DuckDuckGo instant answer payload into documents.
///
/// Walks the abstract, related topics, and results arrays in that order,
/// stopping at `max_results`. Entries without text are skipped; entries
/// without a URL keep an empty one (the orchestrator ignores empty URLs
/// when collecting sources).
fn parse_instant_answers(
    body: &serde_json::Value,
    query: &str,
    max_results: usize,
) -> Vec<Document> {
    let mut documents = Vec::new();

    if let Some(abstract_text) = body.get("AbstractText").and_then(|v| v.as_str()) {
        if !abstract_text.is_empty() {
            let source = body
                .get("AbstractSource")
                .and_then(|v| v.as_str())
                .unwrap_or("DuckDuckGo");
            let url = body
                .get("AbstractURL")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            documents.push(Document::new(source, url, abstract_text));
        }
    }

    for key in ["RelatedTopics", "Results"] {
        let Some(entries) = body.get(key).and_then(|v| v.as_array()) else {
            continue;
        };
        for entry in entries {
            if documents.len() >= max_results {
                break;
            }
            if let Some(text) = entry.get("Text").and_then(|v| v.as_str()) {
                let url = entry.get("FirstURL").and_then(|v| v.as_str()).unwrap_or("");
                documents.push(Document::new(query, url, text));
            }
        }
    }

    documents.truncate(max_results);
    documents
}
