//! Yang HTTP Server
//!
//! Axum host for the Yang tools: publishes the app identity and tool
//! manifest, and invokes tools by name. Instance state is loaded at start
//! and written back on graceful shutdown.

mod handlers;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::LlmProvider;
use agent_runtime::OllamaProvider;
use yang_quant::{
    build_registry,
    config::DEFAULT_STATE_PATH,
    AppConfig, AppMetadata, InstanceState, Services,
};

use crate::handlers::{app_metadata, health_check, invoke_tool, list_tools};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state_path = PathBuf::from(
        std::env::var("YANG_STATE_PATH").unwrap_or_else(|_| DEFAULT_STATE_PATH.into()),
    );
    let instance = InstanceState::load_or_default(&state_path)?;
    let config = Arc::new(AppConfig::from_env(&instance));
    tracing::debug!(?config, "Loaded configuration");

    if config.perplexity_api_key.is_none() {
        tracing::warn!("⚠ PERPLEXITY_API_KEY not set - search tools will fail");
    }

    // Initialize LLM provider
    let provider: Arc<dyn LlmProvider> = Arc::new(OllamaProvider::from_env());

    // Verify Ollama connection
    match provider.health_check().await {
        Ok(true) => {
            tracing::info!("✓ Connected to Ollama");
            if let Ok(models) = provider.list_models().await {
                for model in models {
                    tracing::info!("  Model: {}", model.id);
                }
            }
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Ollama not available - inference tools will fail");
            tracing::warn!("  Make sure Ollama is running: ollama serve");
        }
    }

    let services = Services::new(config.clone(), provider.clone())?;
    let tools = build_registry(&services);

    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }

    let state = AppState {
        provider,
        tools: Arc::new(tools),
        metadata: Arc::new(AppMetadata::default()),
    };

    let app = router(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 {} running on http://{}", AppMetadata::default().fullname, addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health           - Health check");
    tracing::info!("  GET  /api/app          - App metadata");
    tracing::info!("  GET  /api/tools        - Tool manifest");
    tracing::info!("  POST /api/tools/{{name}} - Invoke a tool");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    config.state().save(&state_path)?;
    tracing::info!(path = %state_path.display(), "Saved instance state");

    Ok(())
}

fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/app", get(app_metadata))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/{name}", post(invoke_tool))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolves on SIGINT, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
