use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::dispatch::{self, AllocationError, AllocationResult, SufficiencyAssessment};
use crate::domain::GridRegistry;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub controller: Arc<DispatchController>,
}

impl AppState {
    pub fn new(cfg: Config) -> Result<Self> {
        let registry = cfg.grid.registry()?;
        let controller = Arc::new(DispatchController::new(registry, cfg.dispatch.renewable_mw));

        info!(
            sources = controller.registry().len(),
            total_capacity_mw = controller.registry().total_capacity_mw(),
            renewable_mw = controller.renewable_mw(),
            "grid registry loaded"
        );

        Ok(Self { cfg, controller })
    }
}

/// Binds a registry snapshot to the configured renewable contribution
///
/// Holds no mutable state; calls may run concurrently.
pub struct DispatchController {
    registry: GridRegistry,
    renewable_mw: f64,
}

impl DispatchController {
    pub fn new(registry: GridRegistry, renewable_mw: f64) -> Self {
        Self {
            registry,
            renewable_mw,
        }
    }

    pub fn registry(&self) -> &GridRegistry {
        &self.registry
    }

    pub fn renewable_mw(&self) -> f64 {
        self.renewable_mw
    }

    pub fn allocate(&self, demand_mw: f64) -> Result<AllocationResult, AllocationError> {
        self.allocate_with_renewable(demand_mw, self.renewable_mw)
    }

    pub fn allocate_with_renewable(
        &self,
        demand_mw: f64,
        renewable_mw: f64,
    ) -> Result<AllocationResult, AllocationError> {
        let result = dispatch::allocate(demand_mw, renewable_mw, &self.registry);

        match &result {
            Ok(r) => match r.shortfall() {
                Some(report) => warn!(
                    demand_mw,
                    renewable_mw,
                    excess_mw = report.excess_mw,
                    "demand exceeds grid capacity"
                ),
                None => info!(
                    demand_mw,
                    renewable_mw,
                    remaining_mw = r.remaining_mw,
                    "demand allocated"
                ),
            },
            Err(e @ AllocationError::Configuration { .. }) => {
                error!(error = %e, "grid registry cannot carry demand")
            }
            Err(e) => warn!(error = %e, "rejected allocation request"),
        }

        result
    }

    pub fn assess(
        &self,
        peak_demand_mw: f64,
        renewable_mw: Option<f64>,
    ) -> Result<SufficiencyAssessment, AllocationError> {
        let renewable_mw = renewable_mw.unwrap_or(self.renewable_mw);
        let assessment = dispatch::assess_sufficiency(peak_demand_mw, renewable_mw, &self.registry)?;

        if !assessment.sufficient {
            warn!(
                peak_demand_mw,
                margin_mw = assessment.margin_mw,
                "available power is not sufficient for peak demand"
            );
        }

        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> DispatchController {
        DispatchController::new(GridRegistry::delhi_default(), 500.0)
    }

    #[test]
    fn test_allocate_uses_configured_renewables() {
        let result = controller().allocate(4000.0).unwrap();
        assert_eq!(result.renewable_mw, 500.0);
        assert_eq!(result.remaining_mw, 3500.0);
    }

    #[test]
    fn test_allocate_with_override() {
        let result = controller().allocate_with_renewable(4000.0, 0.0).unwrap();
        assert_eq!(result.remaining_mw, 4000.0);
    }

    #[test]
    fn test_assess_defaults_renewables() {
        let assessment = controller().assess(17285.0, None).unwrap();
        assert!(assessment.sufficient);
        assert_eq!(assessment.margin_mw, 0.0);
    }

    #[test]
    fn test_app_state_from_default_config() {
        let state = AppState::new(Config::default()).unwrap();
        assert_eq!(state.controller.registry().len(), 5);
    }

    #[test]
    fn test_concurrent_calls_agree() {
        let controller = Arc::new(controller());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let c = Arc::clone(&controller);
                std::thread::spawn(move || c.allocate(9876.5).unwrap())
            })
            .collect();

        let results: Vec<AllocationResult> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }
}
