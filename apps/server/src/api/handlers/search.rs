//! Search and suggestion handlers

use crate::{
    api::extractors::SearchQuery,
    db::search::{Paged, RawAdvancedParams, RawSearchParams, SuggestField},
    state::AppState,
    Error, Result,
};
use axum::{
    extract::{Path, State},
    Json,
};
use docket_models::LegalCase;

/// GET /search
pub async fn search_cases(
    State(state): State<AppState>,
    SearchQuery(params): SearchQuery<RawSearchParams>,
) -> Result<Json<Paged<LegalCase>>> {
    Ok(Json(state.search_service.search(&params).await?))
}

/// GET /search/advanced
pub async fn advanced_search(
    State(state): State<AppState>,
    SearchQuery(params): SearchQuery<RawAdvancedParams>,
) -> Result<Json<Paged<LegalCase>>> {
    Ok(Json(state.search_service.advanced_search(&params).await?))
}

/// GET /search/suggest/{field}
///
/// `field` is one of `case-types`, `statuses`, `judges`, `counties`.
pub async fn suggest(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<Vec<String>>> {
    let field = SuggestField::from_path(&field).ok_or_else(|| {
        Error::NotFound(format!(
            "Unknown suggestion field '{field}'; expected case-types, statuses, judges or counties"
        ))
    })?;
    Ok(Json(state.search_service.suggest(field).await?))
}
