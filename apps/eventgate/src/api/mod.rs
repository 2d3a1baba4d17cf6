//! # eventgate HTTP API Module
//!
//! This module implements the HTTP operation router using axum.
//!
//! ## Endpoints
//!
//! - `POST /operation` - Execute a named operation (`{"operation": "getEvent", ...}`)
//! - `GET /status` - Collection sizes and gateway capabilities
//! - `GET /health` - Health check
//!
//! ## Configuration
//!
//! - `server.cors_origins` / `EVENTGATE_CORS_ORIGINS`: allowed origins, or "*" for all (default: localhost only)
//! - `server.rate_limit` / `EVENTGATE_RATE_LIMIT`: requests per second (default: 100, 0 to disable)
//! - `server.body_limit_bytes`: maximum request body size

mod handlers;
mod middleware;
mod types;

// Re-exports for external use (CLI and integration tests)
pub use handlers::{
    error_status, execute_operation, execute_read, health_handler, operation_handler, respond,
    status_handler,
};
pub use middleware::create_rate_limiter;
pub use types::{ErrorBody, HealthResponse, OperationRequest, OperationResponse, StatusResponse};

use crate::config::ServerConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use eventgate_core::{Gateway, GatewayError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the gateway.
#[derive(Clone)]
pub struct AppState {
    /// The gateway; reads take the read lock, mutations the write lock.
    pub gateway: Arc<RwLock<Gateway>>,
}

impl AppState {
    /// Create new app state owning `gateway`.
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(RwLock::new(gateway)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from configured origins.
///
/// - `["*"]`: allows all origins
/// - `None`: localhost only
/// - otherwise: the listed origins; if none parse, localhost only
fn build_cors_layer(origins: Option<&[String]>) -> CorsLayer {
    match origins {
        Some([wildcard]) if wildcard == "*" => {
            tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No origins configured, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = [
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:4000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:4000".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting (if enabled)
pub fn create_router(state: AppState, settings: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/operation", post(handlers::operation_handler));

    if settings.rate_limit > 0 {
        tracing::info!(
            "Rate limiting enabled: {} requests/second",
            settings.rate_limit
        );
        let limiter = create_rate_limiter(settings.rate_limit);
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(settings.cors_origins.as_deref()))
                .layer(axum::extract::DefaultBodyLimit::max(
                    settings.body_limit_bytes,
                )),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server; returns after Ctrl+C.
pub async fn run_server(gateway: Gateway, settings: &ServerConfig) -> Result<(), GatewayError> {
    let addr = settings.addr();
    let router = create_router(AppState::new(gateway), settings);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GatewayError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("eventgate HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| GatewayError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
