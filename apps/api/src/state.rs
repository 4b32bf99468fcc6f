use crate::engine::RecommendationEngine;
use crate::profile::ProfileBuilder;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Catalog, scorer and resource provider behind `Arc`s.
    pub engine: RecommendationEngine,
    pub profile_builder: ProfileBuilder,
    /// Used when a request omits `top_n`.
    pub default_top_n: i64,
}
