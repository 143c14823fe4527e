use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use crate::{
    api::{allocate, grid},
    controller::AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/grid/sources", get(grid::list_sources))
        .route("/grid/sources/:name", get(grid::get_source))
        .route("/allocate", post(allocate::allocate_power))
        .route("/sufficiency", post(allocate::assess_sufficiency))
        .route("/advisories/renewables", get(allocate::renewable_steps))
        .with_state(state)
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
