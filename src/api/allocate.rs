use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{
    api::{error::ApiError, response::ApiResponse},
    controller::AppState,
    dispatch::{
        renewable_expansion_steps, AdvisoryList, AllocationResult, PresentedAllocation,
        SufficiencyAssessment,
    },
};

/// Request to allocate a demand across the fleet
#[derive(Debug, Deserialize)]
pub struct AllocateRequest {
    pub demand_mw: f64,
    /// Overrides the configured renewable contribution
    #[serde(default)]
    pub renewable_mw: Option<f64>,
}

/// Allocation as shown to the caller, rounded to two decimals
#[derive(Debug, Serialize)]
pub struct AllocationView {
    pub status: &'static str,
    pub demand_mw: f64,
    pub renewable_mw: f64,
    pub remaining_mw: f64,
    pub total_capacity_mw: f64,
    pub allocations: Vec<PresentedAllocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excess_mw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<&'static str>>,
}

impl From<&AllocationResult> for AllocationView {
    fn from(result: &AllocationResult) -> Self {
        let shortfall = result.shortfall();
        Self {
            status: if shortfall.is_some() { "shortfall" } else { "met" },
            demand_mw: result.demand_mw,
            renewable_mw: result.renewable_mw,
            remaining_mw: result.remaining_mw,
            total_capacity_mw: result.total_capacity_mw,
            allocations: result.presented_allocations(),
            excess_mw: shortfall.map(|r| r.excess_mw),
            warning: result.warning().map(str::to_string),
            suggestions: shortfall.map(|_| result.advisories().to_vec()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SufficiencyRequest {
    pub peak_demand_mw: f64,
    #[serde(default)]
    pub renewable_mw: Option<f64>,
}

/// POST /api/v1/allocate - Distribute demand across grid sources
pub async fn allocate_power(
    State(st): State<AppState>,
    Json(req): Json<AllocateRequest>,
) -> Result<Json<ApiResponse<AllocationView>>, ApiError> {
    let started = Instant::now();
    let renewable_mw = req.renewable_mw.unwrap_or(st.controller.renewable_mw());
    let result = st
        .controller
        .allocate_with_renewable(req.demand_mw, renewable_mw)?;

    Ok(Json(
        ApiResponse::success(AllocationView::from(&result)).with_duration(started.elapsed()),
    ))
}

/// POST /api/v1/sufficiency - Compare available supply against a peak demand
pub async fn assess_sufficiency(
    State(st): State<AppState>,
    Json(req): Json<SufficiencyRequest>,
) -> Result<Json<ApiResponse<SufficiencyAssessment>>, ApiError> {
    let assessment = st.controller.assess(req.peak_demand_mw, req.renewable_mw)?;
    Ok(Json(ApiResponse::success(assessment)))
}

/// GET /api/v1/advisories/renewables - Steps to grow renewable supply
pub async fn renewable_steps() -> Json<ApiResponse<AdvisoryList>> {
    let steps = renewable_expansion_steps();
    let count = steps.len();
    Json(ApiResponse::success(steps).with_count(count))
}
