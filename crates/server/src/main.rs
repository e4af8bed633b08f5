//! Sari admin backend - session-authenticated CRUD API.
//!
//! This binary serves the JSON API consumed by the store admin frontend.
//!
//! # Architecture
//!
//! - Axum web framework with uniform JSON envelope responses
//! - `PostgreSQL` via sqlx for entities and session storage
//! - tower-sessions cookie authentication (operators log in with a
//!   generated code and a password)

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sari_server::config::ServerConfig;
use sari_server::state::AppState;
use sari_server::{db, middleware, routes};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sari_server=info,tower_http=debug".into());

    // Use JSON format when deployed for structured log parsing, text format locally
    let use_json = std::env::var("SARI_LOG_JSON").is_ok_and(|v| v == "1" || v == "true");
    let json_layer = use_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!use_json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p sari-cli -- migrate

    let state = AppState::new(config.clone(), pool);

    // Create session layer
    let session_layer = middleware::create_session_layer(state.pool(), state.config());

    // Build router
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    // Credentialed CORS for a cross-origin frontend
    if let Some(cors) = cors_layer(&config) {
        app = app.layer(cors);
    }

    let app = app.with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("sari-server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Build the CORS layer when a frontend origin is configured.
///
/// Session cookies require `allow_credentials`, which forbids wildcard
/// origins, so the origin must be named explicitly.
fn cors_layer(config: &ServerConfig) -> Option<CorsLayer> {
    let origin = config.cors_origin.as_ref()?;
    let origin = origin
        .parse::<axum::http::HeaderValue>()
        .expect("Invalid SARI_CORS_ORIGIN");

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PATCH,
                axum::http::Method::DELETE,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE])
            .allow_credentials(true),
    )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
