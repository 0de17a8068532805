//! Cellmap API server implementation
//!
//! HTTP REST API using Axum. Templates and their field mappings are held
//! in the in-memory store; all field semantics live in the core
//! validator, so handlers only translate between HTTP and core types.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::core::FieldValidator;
use crate::store::TemplateStore;

use super::handlers;

/// API server configuration
#[derive(Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub version: String,
    pub store: TemplateStore,
    pub validator: FieldValidator,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: TemplateStore::new(),
            validator: FieldValidator::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the application router over the given state.
pub fn build_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route(
            "/api/templates",
            get(handlers::list_templates).post(handlers::create_template),
        )
        .route(
            "/api/templates/:template_id/fields",
            get(handlers::list_fields).post(handlers::create_field),
        )
        .route(
            "/api/templates/:template_id/fields/:field_id",
            delete(handlers::delete_field),
        )
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cellmap=info,tower_http=info".into()),
        )
        .init();

    let state = Arc::new(AppState::new());
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("🗺️  Cellmap API server starting on http://{}", addr);
    info!("   Endpoints: /api/templates, /api/templates/:id/fields");
    info!("   Health: /api/health");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Cellmap API server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}
