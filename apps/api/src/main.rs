mod config;
mod errors;
mod evaluation;
mod llm_client;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::evaluation::EvaluationEngine;
use crate::llm_client::GroqClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{EvaluationStore, InMemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.rust_log)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting SkillBridge evaluation API v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Initialize model gateway
    let gateway = Arc::new(GroqClient::new(config.gateway.clone())?);
    info!("Model gateway initialized (model: {})", config.gateway.model);

    let engine = Arc::new(EvaluationEngine::new(gateway));
    let store: Arc<dyn EvaluationStore> = Arc::new(InMemoryStore::default());

    let state = AppState { engine, store };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
