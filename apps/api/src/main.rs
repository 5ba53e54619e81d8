mod config;
mod errors;
mod generation;
mod images;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::actions::PostActions;
use crate::images::pexels::PexelsClient;
use crate::images::{ImageResolver, PhotoSearch};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::controller::SessionController;
use crate::session::store::FileStateStore;
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

    info!("Starting PostCraft API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_max_attempts)?;
    info!(
        "LLM client initialized (model: {}, max attempts: {})",
        llm_client::MODEL,
        config.llm_max_attempts
    );

    // Initialize photo search (optional)
    let photo_search: Option<Arc<dyn PhotoSearch>> = match &config.pexels_api_key {
        Some(key) => {
            info!("Photo search enabled (Pexels)");
            Some(Arc::new(PexelsClient::new(key.clone())?))
        }
        None => {
            warn!("PEXELS_API_KEY not set; all posts will use placeholder images");
            None
        }
    };

    let actions = PostActions::new(Arc::new(llm), ImageResolver::new(photo_search));

    // Restore the saved session
    let store = FileStateStore::new(&config.state_dir);
    info!("Session state file: {}", store.path().display());
    let session = SessionController::load(Arc::new(store), actions.clone()).await?;

    // Build app state
    let state = AppState {
        actions,
        session: Arc::new(session),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
