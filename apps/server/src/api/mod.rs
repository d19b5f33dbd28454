//! API layer - routes, handlers, and middleware

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.server.max_request_body_size;
    let cors_origins = state.config.server.cors_origins.clone();

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/health/", get(health_check))
        // Returns 204 so browsers probing for an icon do not produce 404 noise
        .route("/favicon.ico", get(favicon))
        .merge(routes::metrics::metrics_routes())
        .merge(routes::cases::case_routes())
        .merge(routes::search::search_routes())
        .with_state(state)
        // Applied in reverse order: the body limit runs first, security headers last
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(axum::middleware::from_fn(middleware::metrics_middleware))
        .layer(middleware::compression())
        .layer(middleware::cors(&cors_origins))
        .layer(middleware::trace())
        .layer(middleware::layers::body_limit(max_body_size))
}

/// Liveness plus store connectivity. Always 200; `database` reports the store.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match state.store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the case store");
            "offline"
        }
    };

    Json(json!({
        "status": "healthy",
        "service": state.config.logging.service_name,
        "backend": state.store.backend_name(),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn root(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "service": "Docket legal case records API",
            "version": env!("CARGO_PKG_VERSION"),
            "backend": state.store.backend_name(),
            "status": "running",
            "endpoints": {
                "cases": "/cases",
                "search": "/search",
                "advanced_search": "/search/advanced",
                "suggestions": "/search/suggest/{case-types|statuses|judges|counties}",
                "health": "/health",
                "metrics": "/metrics"
            }
        })),
    )
}

async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
