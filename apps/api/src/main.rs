mod ats;
mod config;
mod embedding;
mod errors;
mod matching;
mod parsing;
mod recommend;
mod routes;
mod state;
mod taxonomy;
mod text;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, EmbedderConfig};
use crate::embedding::hashing::HashingEmbedder;
use crate::embedding::http::HttpEmbedder;
use crate::embedding::Embedder;
use crate::matching::engine::MatchEngine;
use crate::routes::build_router;
use crate::state::AppState;
use crate::taxonomy::SkillTaxonomy;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid weights or thresholds)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Crate name with hyphens does not match tracing's module targets.
            let target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobfit API v{}", env!("CARGO_PKG_VERSION"));

    // Load the skill taxonomy
    let taxonomy = SkillTaxonomy::load(&config.taxonomy_path, &config.matching.normalizer)?;
    info!(
        "Skill taxonomy loaded: {} skills, longest alias {} words",
        taxonomy.len(),
        taxonomy.max_window()
    );

    // Initialize the embedding backend
    let embedder = build_embedder(&config)?;
    info!("Embedding backend: {}", embedder.name());

    // Build the match engine and app state
    let engine = MatchEngine::new(Arc::new(taxonomy), embedder, config.matching.clone());
    let state = AppState {
        engine: Arc::new(engine),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the embedding backend selected by configuration: the local
/// hashing embedder (default) or a remote OpenAI-compatible HTTP service.
fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    let embedder: Arc<dyn Embedder> = match &config.embedder {
        EmbedderConfig::Hashing { dimensions } => Arc::new(HashingEmbedder::new(
            *dimensions,
            config.matching.normalizer.clone(),
        )),
        EmbedderConfig::Http {
            endpoint,
            model,
            api_key,
            timeout,
        } => Arc::new(HttpEmbedder::new(
            endpoint.clone(),
            model.clone(),
            api_key.clone(),
            *timeout,
        )?),
    };
    Ok(embedder)
}
