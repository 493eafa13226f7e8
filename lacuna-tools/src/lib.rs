//! # Lacuna Tools
//!
//! Boundary implementations for the Lacuna research engine: a web search
//! provider backed by DuckDuckGo instant answers and a regex-based metric
//! extractor. The engine core depends only on the traits in
//! `lacuna_core::provider`; everything here is swappable.

pub mod extract;
pub mod web;

pub use extract::MetricExtractor;
pub use web::DuckDuckGoProvider;
