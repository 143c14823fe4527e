//! Grid registry API endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::{
    api::{error::ApiError, response::ApiResponse},
    controller::AppState,
    domain::GridSource,
};

#[derive(Debug, Serialize)]
pub struct SourcesResponse {
    pub sources: Vec<GridSource>,
    pub total_capacity_mw: f64,
    pub renewable_mw: f64,
}

/// GET /api/v1/grid/sources - List the fleet in registry order
pub async fn list_sources(
    State(st): State<AppState>,
) -> Result<Json<ApiResponse<SourcesResponse>>, ApiError> {
    let registry = st.controller.registry();
    let response = SourcesResponse {
        sources: registry.sources().to_vec(),
        total_capacity_mw: registry.total_capacity_mw(),
        renewable_mw: st.controller.renewable_mw(),
    };
    let count = response.sources.len();

    Ok(Json(ApiResponse::success(response).with_count(count)))
}

/// GET /api/v1/grid/sources/:name - Look up one source
pub async fn get_source(
    State(st): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<GridSource>>, ApiError> {
    st.controller
        .registry()
        .get(&name)
        .cloned()
        .map(|source| Json(ApiResponse::success(source)))
        .ok_or_else(|| ApiError::NotFound(format!("grid source {}", name)))
}
