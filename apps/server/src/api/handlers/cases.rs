//! Case CRUD handlers

use crate::{
    api::extractors::{CaseBody, SearchQuery},
    db::search::{Paged, RawPageParams},
    models::{CasePatch, NewCase},
    state::AppState,
    Result,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use docket_models::LegalCase;

/// POST /cases
pub async fn create_case(
    State(state): State<AppState>,
    CaseBody(input): CaseBody<NewCase>,
) -> Result<(StatusCode, Json<LegalCase>)> {
    let case = state.case_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(case)))
}

/// GET /cases
pub async fn list_cases(
    State(state): State<AppState>,
    SearchQuery(paging): SearchQuery<RawPageParams>,
) -> Result<Json<Paged<LegalCase>>> {
    Ok(Json(state.case_service.list(&paging).await?))
}

/// GET /cases/{id}
pub async fn read_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LegalCase>> {
    Ok(Json(state.case_service.get(&id).await?))
}

/// GET /cases/case-number/{case_number}
pub async fn read_case_by_number(
    State(state): State<AppState>,
    Path(case_number): Path<String>,
) -> Result<Json<LegalCase>> {
    Ok(Json(state.case_service.get_by_case_number(&case_number).await?))
}

/// PUT /cases/{id}
pub async fn update_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CaseBody(patch): CaseBody<CasePatch>,
) -> Result<Json<LegalCase>> {
    Ok(Json(state.case_service.update(&id, patch).await?))
}

/// DELETE /cases/{id}
pub async fn delete_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.case_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
