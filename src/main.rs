use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use pdf_chat_backend::config::AppConfig;
use pdf_chat_backend::routes;
use pdf_chat_backend::services::llm_provider::RigCompleter;
use pdf_chat_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    tracing::info!(
        "Configuration loaded (env: {}, provider: {}, model: {})",
        std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into()),
        config.llm.provider,
        config.llm.model
    );

    let api_key = config
        .llm
        .resolve_api_key()
        .context("No API key configured. Set APP__LLM__API_KEY or OPENAI_API_KEY")?;

    let completer = RigCompleter::new(&config.llm.provider, &api_key)
        .context("Failed to create completion client")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, Arc::new(completer));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
