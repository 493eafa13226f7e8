//! Error types for the Lacuna research engine.
//!
//! Uses `thiserror` for public API error types with structured variants
//! covering the search provider, extraction, and configuration domains.
//!
//! Provider and extraction errors never escape the research loop: the
//! orchestrator recovers them per step and per document. They are still
//! explicit in the boundary trait signatures so failure handling is
//! visible in the types rather than implicit control flow.

use std::path::PathBuf;

/// Top-level error type for the Lacuna core library.
#[derive(Debug, thiserror::Error)]
pub enum LacunaError {
    #[error("Search provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from search provider interactions.
///
/// Recovered locally by the orchestrator: a failed search degrades the
/// step to an empty result set and the loop continues.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Search request failed: {message}")]
    Request { message: String },

    #[error("Search response parse error: {message}")]
    ResponseParse { message: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Search request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

/// Errors from data point extraction.
///
/// Recovered locally per document: a failing document simply contributes
/// nothing to the iteration.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Malformed document content: {message}")]
    MalformedContent { message: String },

    #[error("Extraction pattern error: {message}")]
    Pattern { message: String },
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },
}

/// A type alias for results using the top-level `LacunaError`.
pub type Result<T> = std::result::Result<T, LacunaError>;
