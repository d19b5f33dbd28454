//! Metrics collection for the case service
//!
//! Prometheus metrics registered in the default registry and exposed at `/metrics`.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, register_int_gauge_vec,
    HistogramVec, IntCounterVec, IntGauge, IntGaugeVec,
};

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "docket_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "docket_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "docket_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    pub static ref HTTP_RESPONSE_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "docket_http_response_size_bytes",
        "HTTP response size in bytes",
        &["method", "path", "status"],
        vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0]
    )
    .expect("Failed to register HTTP_RESPONSE_SIZE_BYTES");

    // Case Operation Metrics

    /// Case operations by operation name and outcome
    pub static ref CASE_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "docket_case_operations_total",
        "Total number of case operations",
        &["operation", "status"]
    )
    .expect("Failed to register CASE_OPERATIONS_TOTAL");

    pub static ref CASE_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "docket_case_operation_duration_seconds",
        "Case operation duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register CASE_OPERATION_DURATION_SECONDS");

    /// Number of matching records reported by searches
    pub static ref SEARCH_TOTAL_COUNT: HistogramVec = register_histogram_vec!(
        "docket_search_total_count",
        "Number of records matching a search",
        &["kind"],
        vec![0.0, 1.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0, 10000.0]
    )
    .expect("Failed to register SEARCH_TOTAL_COUNT");

    // Store Metrics

    pub static ref STORE_QUERY_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "docket_store_query_duration_seconds",
        "Document store query duration in seconds",
        &["backend", "query_type"],
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    )
    .expect("Failed to register STORE_QUERY_DURATION_SECONDS");

    pub static ref STORE_QUERY_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "docket_store_query_errors_total",
        "Total number of document store query errors",
        &["backend", "query_type"]
    )
    .expect("Failed to register STORE_QUERY_ERRORS_TOTAL");

    pub static ref DB_CONNECTIONS_ACTIVE: IntGauge = register_int_gauge!(
        "docket_db_connections_active",
        "Number of active database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_ACTIVE");

    pub static ref DB_CONNECTIONS_IDLE: IntGauge = register_int_gauge!(
        "docket_db_connections_idle",
        "Number of idle database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_IDLE");
}

/// Normalize a request path into a low-cardinality metrics label.
///
/// Record identifiers and case numbers are replaced by placeholders and trailing
/// slashes are dropped.
pub fn sanitize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => "/".to_string(),
        ["cases", "case-number", _] => "/cases/case-number/{case_number}".to_string(),
        ["cases", _] => "/cases/{id}".to_string(),
        ["search", "suggest", field] => match crate::db::search::SuggestField::from_path(field) {
            Some(_) => format!("/search/suggest/{field}"),
            None => "/search/suggest/{field}".to_string(),
        },
        [first] => format!("/{first}"),
        [first, second] => format!("/{first}/{second}"),
        [first, second, ..] => format!("/{first}/{second}/*"),
    }
}

/// Map a request onto the case/search operation it performs, if any.
pub fn extract_operation(method: &str, path: &str) -> Option<&'static str> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method, segments.as_slice()) {
        ("POST", ["cases"]) => Some("create"),
        ("GET", ["cases"]) => Some("list"),
        ("GET", ["cases", "case-number", _]) => Some("read_by_case_number"),
        ("GET", ["cases", _]) => Some("read"),
        ("PUT", ["cases", _]) => Some("update"),
        ("DELETE", ["cases", _]) => Some("delete"),
        ("GET", ["search"]) => Some("search"),
        ("GET", ["search", "advanced"]) => Some("advanced_search"),
        ("GET", ["search", "suggest", _]) => Some("suggest"),
        _ => None,
    }
}
