//! Family Activity Finder HTTP Server
//!
//! Main entry point for the HTTP API server.

use axum::http::{HeaderValue, Method, header};
use infrastructure::{AppConfig, Environment, init_tracing};
use presentation_http::{AppState, SecurityHeadersLayer, routes, server};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration first so the log format can follow it
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&config.logging)?;

    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!(
        "Family Activity Finder v{} starting...",
        env!("CARGO_PKG_VERSION")
    );
    info!(
        environment = %config.environment(),
        host = %config.server.host,
        port = config.server.port,
        model = %config.generation.model,
        web_search = config.generation.web_search.enabled,
        "Configuration loaded"
    );
    config.log_warnings();

    let addr = config.server.bind_address();
    let shutdown_timeout = config.server.shutdown_timeout();
    let cors = cors_layer(&config);

    let app = routes::create_router(AppState::from_config(config))
        .layer(SecurityHeadersLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);
    info!("API endpoint: http://{}/api/recommendations", addr);

    server::serve(listener, app, shutdown_signal(), shutdown_timeout).await?;

    info!("Server shutdown complete");

    Ok(())
}

/// CORS policy
///
/// Configured origins always win. With none configured, development allows
/// any origin and production allows none.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    let headers = [header::CONTENT_TYPE, header::ACCEPT];

    if config.server.allowed_origins.is_empty() {
        return match config.environment() {
            Environment::Development => CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(methods)
                .allow_headers(Any),
            Environment::Production => CorsLayer::new()
                .allow_methods(methods)
                .allow_headers(headers),
        };
    }

    let origins: Vec<HeaderValue> = config
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
