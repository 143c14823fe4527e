//! Power Allocation Engine
//!
//! Splits demand left over after renewables across the grid fleet in
//! proportion to rated capacity, and reports a shortfall with mitigation
//! advice when the fleet cannot carry it.

pub mod advisory;
pub mod allocation;
pub mod error;
pub mod inputs;
pub mod model;
pub mod sufficiency;

pub use advisory::{advise, renewable_expansion_steps, AdvisoryList, MitigationAction, RenewableStep};
pub use allocation::{
    AllocationEntry, AllocationOutcome, AllocationResult, PresentedAllocation, ShortfallReport,
};
pub use error::AllocationError;
pub use inputs::DispatchInputs;
pub use model::allocate;
pub use sufficiency::{assess_sufficiency, SufficiencyAssessment};
