mod analysis;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod persistence;
mod report;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::ProfileChecker;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{GenerationGateway, LlmClient};
use crate::persistence::{MemoryProfileStore, PgProfileStore, ProfileStore};
use crate::routes::build_router;
use crate::scoring::ScoringConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting profile checker API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations), or fall back to memory
    let store: Arc<dyn ProfileStore> = match &config.database_url {
        Some(url) => Arc::new(PgProfileStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL is not set; evaluations will be kept in memory only");
            Arc::new(MemoryProfileStore::new())
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(
        config.groq_api_key.clone(),
        config.groq_api_url.clone(),
        config.llm_timeout,
    )
    .context("Failed to build LLM client")?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?})",
        llm_client::MODEL,
        config.llm_timeout
    );

    let checker = ProfileChecker::standard(
        Arc::new(ScoringConfig::default()),
        GenerationGateway::new(Arc::new(llm)),
    );
    info!("{} section evaluators ready", checker.section_count());

    // Build app state
    let state = AppState {
        checker: Arc::new(checker),
        store,
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
