mod analysis;
mod config;
mod db;
mod errors;
mod extraction;
mod jobs;
mod llm_client;
mod models;
mod normalization;
mod routes;
mod search_client;
mod state;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::gemini::{VisionClient, VISION_MODEL};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::search_client::SearchClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvmatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize model clients
    let llm = LlmClient::new(config.openai_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let vision = VisionClient::new(config.gemini_api_key.clone())?;
    info!("Vision client initialized (model: {VISION_MODEL})");

    // Initialize search client; it also serves formation lookups
    let search = SearchClient::new(
        config.google_api_key.clone(),
        config.google_search_engine_id.clone(),
    )?;
    let formation_search = Arc::new(search.clone());
    info!("Search client initialized");

    // Build app state
    let state = AppState {
        db,
        llm,
        vision,
        search,
        formation_search,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
