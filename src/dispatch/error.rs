use thiserror::Error;

/// Reasons an allocation or assessment cannot be computed
///
/// A shortfall is not an error; it is reported through the allocation outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("invalid input: {field} must be a finite, non-negative MW value (got {value})")]
    InvalidInput { field: &'static str, value: f64 },

    #[error(
        "grid registry has zero total capacity while {remaining_mw:.2} MW remains to allocate"
    )]
    Configuration { remaining_mw: f64 },
}

impl AllocationError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
