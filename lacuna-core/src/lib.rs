//! # Lacuna Core
//!
//! Core library for the Lacuna gap-filling research engine.
//! Provides the search orchestrator, query generation strategies,
//! gap tracking, coverage scoring, configuration, and fundamental types.

pub mod config;
pub mod error;
pub mod provider;
pub mod research;
pub mod types;

// Re-export commonly used types at the crate root.
pub use config::ResearchConfig;
pub use error::{ConfigError, ExtractionError, LacunaError, ProviderError, Result};
pub use provider::{
    ExtractionEngine, ScriptStep, ScriptedSearchProvider, SearchProvider, StaticExtractor,
    StaticSearchProvider,
};
pub use research::engine::ResearchEngine;
pub use research::orchestrator::{
    NoOpResearchCallback, ResearchCallback, ResearchState, SearchOrchestrator,
};
pub use types::{Document, Gap, Query, QueryOrigin, ResearchResult};
