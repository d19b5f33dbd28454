//! Metrics endpoint handler

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use prometheus::{Encoder, TextEncoder};

use crate::state::AppState;

/// GET /metrics
///
/// Prometheus text exposition of the default registry plus the service info metric.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let encoder = TextEncoder::new();

    // Sample gauges before gathering so this scrape sees them
    let custom_metrics = state
        .metrics_service
        .collect_custom_metrics(env!("CARGO_PKG_VERSION"));

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain")],
            b"Failed to encode metrics".to_vec(),
        );
    }
    buffer.extend_from_slice(custom_metrics.as_bytes());

    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        buffer,
    )
}
