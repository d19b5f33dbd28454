//! Case CRUD routes

use super::route_both;
use crate::{api::handlers::cases, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};

pub fn case_routes() -> Router<AppState> {
    let router = Router::new();
    let router = route_both(
        router,
        "/cases",
        post(cases::create_case).get(cases::list_cases),
    );
    let router = route_both(
        router,
        "/cases/case-number/:case_number",
        get(cases::read_case_by_number),
    );
    route_both(
        router,
        "/cases/:id",
        get(cases::read_case)
            .put(cases::update_case)
            .delete(cases::delete_case),
    )
}
