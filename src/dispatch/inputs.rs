use super::AllocationError;

/// Input state for one allocation call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchInputs {
    /// Total requested power (MW)
    pub demand_mw: f64,

    /// Renewable contribution already available (MW)
    pub renewable_mw: f64,
}

impl DispatchInputs {
    pub fn new(demand_mw: f64, renewable_mw: f64) -> Self {
        Self {
            demand_mw,
            renewable_mw,
        }
    }

    /// Reject negative or non-finite values before any computation
    pub fn validate(&self) -> Result<(), AllocationError> {
        check_mw("demand_mw", self.demand_mw)?;
        check_mw("renewable_mw", self.renewable_mw)?;
        Ok(())
    }

    /// Demand left for the grid after renewables, never below zero
    pub fn remaining_mw(&self) -> f64 {
        let diff = self.demand_mw - self.renewable_mw;
        if diff > 0.0 {
            diff
        } else {
            0.0
        }
    }
}

pub(crate) fn check_mw(field: &'static str, value: f64) -> Result<(), AllocationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AllocationError::InvalidInput { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_subtracts_renewables() {
        assert_eq!(DispatchInputs::new(4000.0, 500.0).remaining_mw(), 3500.0);
    }

    #[test]
    fn test_remaining_clamps_at_zero() {
        let inputs = DispatchInputs::new(300.0, 500.0);
        assert_eq!(inputs.remaining_mw(), 0.0);
        assert!(inputs.remaining_mw().is_sign_positive());
    }

    #[test]
    fn test_negative_demand_rejected() {
        let err = DispatchInputs::new(-5.0, 500.0).validate().unwrap_err();
        assert_eq!(
            err,
            AllocationError::InvalidInput {
                field: "demand_mw",
                value: -5.0
            }
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(DispatchInputs::new(f64::NAN, 0.0).validate().is_err());
        assert!(DispatchInputs::new(f64::INFINITY, 0.0).validate().is_err());
        assert!(DispatchInputs::new(100.0, f64::NEG_INFINITY).validate().is_err());
    }

    #[test]
    fn test_negative_renewable_rejected() {
        let err = DispatchInputs::new(100.0, -1.0).validate().unwrap_err();
        assert!(matches!(err, AllocationError::InvalidInput { field: "renewable_mw", .. }));
    }

    #[test]
    fn test_zero_inputs_valid() {
        assert!(DispatchInputs::new(0.0, 0.0).validate().is_ok());
    }
}
