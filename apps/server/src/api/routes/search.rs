//! Search routes

use super::route_both;
use crate::{api::handlers::search, state::AppState};
use axum::{routing::get, Router};

pub fn search_routes() -> Router<AppState> {
    let router = route_both(Router::new(), "/search", get(search::search_cases));
    let router = route_both(router, "/search/advanced", get(search::advanced_search));
    route_both(router, "/search/suggest/:field", get(search::suggest))
}
