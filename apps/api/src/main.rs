use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use careerlens::catalog::CareerCatalog;
use careerlens::config::Config;
use careerlens::engine::RecommendationEngine;
use careerlens::profile::{AnswerScale, ProfileBuilder};
use careerlens::routes::build_router;
use careerlens::scoring::{MatchScorer, ModelArtifact};
use careerlens::state::AppState;
use careerlens::upskill::{HttpResourceProvider, ResourceProvider, StaticResourceProvider};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "careerlens={level},careerlens_api={level},tower_http={level}",
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerLens API v{}", env!("CARGO_PKG_VERSION"));

    // Catalog and model are fatal at startup; never serve with either broken.
    let catalog = CareerCatalog::load_path(&config.catalog_path)
        .with_context(|| format!("failed to load career catalog {}", config.catalog_path))?;
    let model = ModelArtifact::load_path(&config.model_path)
        .with_context(|| format!("failed to load model {}", config.model_path))?;
    let scorer = MatchScorer::from_model(model).context("model does not match its vocabulary")?;

    let untrained = catalog
        .all()
        .filter(|c| !scorer.classes().contains(&c.id))
        .count();
    if untrained > 0 {
        tracing::warn!("{untrained} catalog careers have no trained class and will never rank");
    }

    let provider = build_resource_provider(&config)?;

    let engine = RecommendationEngine::new(
        Arc::new(catalog),
        Arc::new(scorer),
        provider,
        config.weights,
    )?;
    info!(
        "Ranking weights: classifier={} riasec={} skill={}",
        config.weights.classifier, config.weights.riasec, config.weights.skill
    );

    let state = AppState {
        engine,
        profile_builder: ProfileBuilder::new(AnswerScale::default(), config.riasec_scaling),
        default_top_n: config.default_top_n,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// HTTP provider when a URL is configured, else a static map (possibly empty).
fn build_resource_provider(config: &Config) -> Result<Arc<dyn ResourceProvider>> {
    if let Some(url) = &config.resource_provider_url {
        info!("Resource provider: HTTP ({url})");
        return Ok(Arc::new(HttpResourceProvider::new(url.clone())?));
    }
    match &config.resource_catalog_path {
        Some(path) => {
            info!("Resource provider: static file ({path})");
            Ok(Arc::new(StaticResourceProvider::load_path(path)?))
        }
        None => {
            info!("Resource provider: none configured; upskill lists will be empty");
            Ok(Arc::new(StaticResourceProvider::default()))
        }
    }
}
