//! Route tables
//!
//! Every path is served with and without a trailing slash.

pub mod cases;
pub mod metrics;
pub mod search;

use crate::state::AppState;
use axum::{routing::MethodRouter, Router};

/// Register `path` and `path/` with the same handlers.
pub(crate) fn route_both(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    let trimmed = path.trim_end_matches('/');
    router
        .route(trimmed, method_router.clone())
        .route(&format!("{trimmed}/"), method_router)
}
