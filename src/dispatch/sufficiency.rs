use serde::Serialize;

use super::{inputs::check_mw, AllocationError};
use crate::domain::GridRegistry;

/// Whether grid capacity plus renewables can carry a peak demand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SufficiencyAssessment {
    pub peak_demand_mw: f64,
    pub grid_capacity_mw: f64,
    pub renewable_mw: f64,
    pub total_available_mw: f64,

    /// Available minus peak (MW); negative when supply falls short
    pub margin_mw: f64,
    pub sufficient: bool,
}

impl SufficiencyAssessment {
    /// Reserve margin as a fraction of peak demand (0 when peak is 0)
    pub fn reserve_ratio(&self) -> f64 {
        if self.peak_demand_mw > 0.0 {
            self.margin_mw / self.peak_demand_mw
        } else {
            0.0
        }
    }
}

pub fn assess_sufficiency(
    peak_demand_mw: f64,
    renewable_mw: f64,
    registry: &GridRegistry,
) -> Result<SufficiencyAssessment, AllocationError> {
    check_mw("peak_demand_mw", peak_demand_mw)?;
    check_mw("renewable_mw", renewable_mw)?;

    let grid_capacity_mw = registry.total_capacity_mw();
    let total_available_mw = grid_capacity_mw + renewable_mw;
    let margin_mw = total_available_mw - peak_demand_mw;

    Ok(SufficiencyAssessment {
        peak_demand_mw,
        grid_capacity_mw,
        renewable_mw,
        total_available_mw,
        margin_mw,
        sufficient: total_available_mw >= peak_demand_mw,
    })
}
