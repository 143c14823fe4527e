use super::{
    advise, AllocationEntry, AllocationError, AllocationOutcome, AllocationResult,
    DispatchInputs, ShortfallReport,
};
use crate::domain::GridRegistry;

/// Allocate demand across the grid fleet - THE CORE ALGORITHM
///
/// Algorithm steps:
/// 1. Validate demand and renewable contribution
/// 2. Subtract renewables from demand (never below zero)
/// 3. Sum capacity fresh from the registry snapshot
/// 4. Split remaining demand in proportion to capacity, or
/// 5. Run every source at full capacity and report the shortfall
///
/// Arithmetic is done at full precision; rounding is left to
/// [`AllocationResult::presented_allocations`].
pub fn allocate(
    demand_mw: f64,
    renewable_mw: f64,
    registry: &GridRegistry,
) -> Result<AllocationResult, AllocationError> {
    // Step 1: Nothing is computed for invalid input
    let inputs = DispatchInputs::new(demand_mw, renewable_mw);
    inputs.validate()?;

    // Step 2: Renewables alone may cover the ask
    let remaining_mw = inputs.remaining_mw();

    // Step 3: Zero capacity cannot be split proportionally
    let total_capacity_mw = registry.total_capacity_mw();
    if total_capacity_mw <= 0.0 && remaining_mw > 0.0 {
        return Err(AllocationError::Configuration { remaining_mw });
    }

    let (allocations, outcome) = if remaining_mw > total_capacity_mw {
        // Step 5: Shortfall
        let excess_mw = remaining_mw - total_capacity_mw;
        (
            capped_split(registry),
            AllocationOutcome::Shortfall {
                report: ShortfallReport::new(excess_mw),
                advisories: advise(true),
            },
        )
    } else {
        // Step 4: Proportional split
        (
            proportional_split(registry, remaining_mw, total_capacity_mw),
            AllocationOutcome::Met,
        )
    };

    Ok(AllocationResult {
        demand_mw,
        renewable_mw,
        remaining_mw,
        total_capacity_mw,
        allocations,
        outcome,
    })
}

/// Capacity-weighted split of `remaining_mw`, assuming it fits in `total_capacity_mw`
///
/// The `min` cap keeps each source within capacity despite rounding at the
/// boundary. The last source with positive capacity then takes whatever is
/// left so the entries sum to `remaining_mw`.
fn proportional_split(
    registry: &GridRegistry,
    remaining_mw: f64,
    total_capacity_mw: f64,
) -> Vec<AllocationEntry> {
    if remaining_mw <= 0.0 {
        return registry
            .iter()
            .map(|source| AllocationEntry {
                source_name: source.name.clone(),
                capacity_mw: source.capacity_mw,
                allocated_mw: 0.0,
            })
            .collect();
    }

    let mut allocations: Vec<AllocationEntry> = registry
        .iter()
        .map(|source| {
            let share = (source.capacity_mw / total_capacity_mw) * remaining_mw;
            AllocationEntry {
                source_name: source.name.clone(),
                capacity_mw: source.capacity_mw,
                allocated_mw: share.min(source.capacity_mw),
            }
        })
        .collect();

    if let Some(last) = allocations.iter().rposition(|a| a.capacity_mw > 0.0) {
        let others: f64 = allocations
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != last)
            .map(|(_, a)| a.allocated_mw)
            .sum();
        let entry = &mut allocations[last];
        entry.allocated_mw = (remaining_mw - others).clamp(0.0, entry.capacity_mw);
    }

    allocations
}

/// Every source at full capacity
fn capped_split(registry: &GridRegistry) -> Vec<AllocationEntry> {
    registry
        .iter()
        .map(|source| AllocationEntry {
            source_name: source.name.clone(),
            capacity_mw: source.capacity_mw,
            allocated_mw: source.capacity_mw,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GridSource;

    const RENEWABLE_MW: f64 = 500.0;

    fn assert_within_capacity(result: &AllocationResult) {
        for entry in &result.allocations {
            assert!(
                entry.allocated_mw <= entry.capacity_mw,
                "{} allocated {} above capacity {}",
                entry.source_name,
                entry.allocated_mw,
                entry.capacity_mw
            );
            assert!(entry.allocated_mw >= 0.0);
        }
    }

    #[test]
    fn test_demand_met_proportionally() {
        let registry = GridRegistry::delhi_default();
        let result = allocate(4000.0, RENEWABLE_MW, &registry).unwrap();

        assert!(!result.is_shortfall());
        assert_eq!(result.remaining_mw, 3500.0);
        assert_eq!(result.allocations.len(), 5);

        let northern = &result.allocations[0];
        assert_eq!(northern.source_name, "Northern Grid");
        assert!((northern.allocated_mw - 12000.0 / 16785.0 * 3500.0).abs() < 1e-9);
        assert!((result.total_allocated_mw() - 3500.0).abs() < 1e-6);
        assert_within_capacity(&result);
    }

    #[test]
    fn test_equal_utilization_when_met() {
        let registry = GridRegistry::delhi_default();
        let result = allocate(4000.0, RENEWABLE_MW, &registry).unwrap();
        let expected = 3500.0 / 16785.0;

        for entry in &result.allocations {
            assert!((entry.utilization() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_shortfall_runs_all_sources_at_capacity() {
        let registry = GridRegistry::delhi_default();
        let result = allocate(20000.0, RENEWABLE_MW, &registry).unwrap();

        assert!(result.is_shortfall());
        for entry in &result.allocations {
            assert_eq!(entry.allocated_mw, entry.capacity_mw);
        }
        let report = result.shortfall().unwrap();
        assert_eq!(report.excess_mw, 2715.0);
        assert_eq!(result.advisories().len(), 5);
    }

    #[test]
    fn test_renewables_cover_demand() {
        let registry = GridRegistry::delhi_default();
        let result = allocate(300.0, RENEWABLE_MW, &registry).unwrap();

        assert!(!result.is_shortfall());
        assert_eq!(result.remaining_mw, 0.0);
        assert!(result.allocations.iter().all(|a| a.allocated_mw == 0.0));
        assert!(result.advisories().is_empty());
    }

    #[test]
    fn test_negative_demand_rejected() {
        let registry = GridRegistry::delhi_default();
        let err = allocate(-5.0, RENEWABLE_MW, &registry).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_zero_capacity_is_configuration_error() {
        let registry = GridRegistry::new(vec![GridSource::new("Idle", 0.0)]).unwrap();
        let err = allocate(1000.0, RENEWABLE_MW, &registry).unwrap_err();
        assert_eq!(err, AllocationError::Configuration { remaining_mw: 500.0 });
    }

    #[test]
    fn test_zero_capacity_with_no_remaining_demand_is_fine() {
        let registry = GridRegistry::new(vec![GridSource::new("Idle", 0.0)]).unwrap();
        let result = allocate(100.0, RENEWABLE_MW, &registry).unwrap();
        assert_eq!(result.allocations[0].allocated_mw, 0.0);
    }

    #[test]
    fn test_empty_registry_is_configuration_error() {
        let registry = GridRegistry::new(Vec::new()).unwrap();
        assert!(allocate(600.0, RENEWABLE_MW, &registry)
            .unwrap_err()
            .is_configuration());
    }

    #[test]
    fn test_exact_capacity_is_not_shortfall() {
        let registry = GridRegistry::delhi_default();
        let result = allocate(16785.0 + RENEWABLE_MW, RENEWABLE_MW, &registry).unwrap();

        assert!(!result.is_shortfall());
        for entry in &result.allocations {
            assert!((entry.allocated_mw - entry.capacity_mw).abs() < 1e-9);
        }
        assert_within_capacity(&result);
    }

    #[test]
    fn test_zero_capacity_source_gets_nothing() {
        let registry = GridRegistry::new(vec![
            GridSource::new("A", 100.0),
            GridSource::new("B", 300.0),
            GridSource::new("Idle", 0.0),
        ])
        .unwrap();
        let result = allocate(200.0, 0.0, &registry).unwrap();

        assert_eq!(result.allocations[0].allocated_mw, 50.0);
        assert_eq!(result.allocations[1].allocated_mw, 150.0);
        assert_eq!(result.allocations[2].allocated_mw, 0.0);
    }

    #[test]
    fn test_repeated_calls_are_bit_identical() {
        let registry = GridRegistry::delhi_default();
        let a = allocate(7777.77, RENEWABLE_MW, &registry).unwrap();
        let b = allocate(7777.77, RENEWABLE_MW, &registry).unwrap();

        for (x, y) in a.allocations.iter().zip(&b.allocations) {
            assert_eq!(x.allocated_mw.to_bits(), y.allocated_mw.to_bits());
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_presented_rows_for_default_fleet() {
        let registry = GridRegistry::delhi_default();
        let result = allocate(4000.0, RENEWABLE_MW, &registry).unwrap();
        let rows = result.presented_allocations();

        assert_eq!(rows[0].allocated_mw, 2502.23);
        let total: f64 = rows.iter().map(|r| r.allocated_mw).sum();
        assert!((total - 3500.0).abs() < 1e-6);
    }

    #[test]
    fn test_presented_rows_for_large_capacity_fleet() {
        let registry =
            GridRegistry::new(vec![GridSource::new("A", 1e17), GridSource::new("B", 1e17)])
                .unwrap();
        let result = allocate(1e17, 0.0, &registry).unwrap();
        let rows = result.presented_allocations();

        assert_eq!(rows[0].allocated_mw, 5e16);
        assert_eq!(rows[1].allocated_mw, 5e16);
    }
}
