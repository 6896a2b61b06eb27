//! pico-maps Server - HTTP surface for the pipe and the location tool
//!
//! A small axum backend that lets a chat host reach the pico-core adapters
//! over HTTP:
//! - `POST /api/pipe` runs the n8n workflow pipe
//! - `GET|POST /api/tools/search_location` runs the place search
//! - `GET /api/health` reports liveness
//!
//! This crate can be used standalone (via `pico server`) or embedded in
//! another application through [`build_router`].

pub mod api;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use pico_core::PicoConfig;

use self::state::{AppState, AppStateInner};

/// Configuration for the pico-maps server.
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub adapters: PicoConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3210,
            adapters: PicoConfig::default(),
        }
    }
}

/// Create a shared `AppState` from adapter settings.
pub fn create_app_state(adapters: PicoConfig) -> AppState {
    Arc::new(AppStateInner::new(adapters))
}

/// Build the full router (API routes, health check, CORS, tracing).
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::api_router())
        .route("/api/health", axum::routing::get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// Returns the actual address the server is listening on.
pub async fn start_server(config: ServerConfig) -> Result<SocketAddr, String> {
    // A subscriber may already be installed by the CLI.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pico_core=info,pico_server=info,tower_http=info".into()),
        )
        .try_init();

    tracing::info!(
        "Starting pico-maps server on {}:{}",
        config.host,
        config.port
    );

    let state = create_app_state(config.adapters.clone());

    start_server_with_state(config, state).await
}

/// Start the HTTP server with a pre-built `AppState`.
pub async fn start_server_with_state(
    config: ServerConfig,
    state: AppState,
) -> Result<SocketAddr, String> {
    let app = build_router(state);

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get local address: {}", e))?;

    tracing::info!("pico-maps server listening on {}", local_addr);

    // Spawn the server in a background task
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(local_addr)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "server": "pico-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
