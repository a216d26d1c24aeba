mod config;
mod errors;
mod generation;
mod layout;
mod letters;
mod llm_client;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::StandardFontMetrics;
use crate::letters::{file_adapters, file_profile_store, LetterStore};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (malformed values abort startup)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Letterdesk API v{}", env!("CARGO_PKG_VERSION"));

    // Load persisted letters and profile
    std::fs::create_dir_all(&config.data_dir)?;
    let letters = LetterStore::load(file_adapters(&config.data_dir), chrono::Utc::now());
    let profile = file_profile_store(&config.data_dir);
    info!(
        "Loaded {} letter(s) from {}",
        letters.len(),
        config.data_dir.display()
    );

    // Initialize provider client (keys arrive per request, never from config)
    let llm = LlmClient::new(&config)?;
    info!(
        "LLM client initialized (openai: {}, gemini default: {})",
        config.openai_model, config.gemini_default_model
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm: Arc::new(llm),
        letters: Arc::new(RwLock::new(letters)),
        profile: Arc::new(RwLock::new(profile)),
        measurer: Arc::new(StandardFontMetrics),
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
