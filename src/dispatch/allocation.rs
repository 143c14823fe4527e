use serde::Serialize;
use std::fmt;

use super::AdvisoryList;

/// Power assigned to one grid source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationEntry {
    pub source_name: String,

    /// Rated capacity of the source (MW)
    pub capacity_mw: f64,

    /// Allocated power at full precision (MW), never above `capacity_mw`
    pub allocated_mw: f64,
}

impl AllocationEntry {
    /// Fraction of capacity in use (0 for a zero-capacity source)
    pub fn utilization(&self) -> f64 {
        if self.capacity_mw > 0.0 {
            self.allocated_mw / self.capacity_mw
        } else {
            0.0
        }
    }
}

/// Unmet demand after every source runs at full capacity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortfallReport {
    /// Demand beyond total grid capacity (MW, always positive)
    pub excess_mw: f64,
    pub message: String,
}

impl ShortfallReport {
    pub fn new(excess_mw: f64) -> Self {
        Self {
            excess_mw,
            message: format!(
                "Demand exceeds grid capacities by {:.2} MW. Power outages may occur.",
                excess_mw
            ),
        }
    }
}

/// The two mutually exclusive outcomes of an allocation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AllocationOutcome {
    /// Remaining demand fits within total capacity
    Met,

    /// Every source at full capacity and demand still unmet
    Shortfall {
        report: ShortfallReport,
        advisories: AdvisoryList,
    },
}

/// Complete result of one allocation call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationResult {
    pub demand_mw: f64,
    pub renewable_mw: f64,
    pub remaining_mw: f64,
    pub total_capacity_mw: f64,

    /// One entry per source, in registry order
    pub allocations: Vec<AllocationEntry>,

    #[serde(flatten)]
    pub outcome: AllocationOutcome,
}

/// A row rounded to two decimals for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentedAllocation {
    pub source_name: String,
    pub allocated_mw: f64,
}

impl fmt::Display for PresentedAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2} MW", self.source_name, self.allocated_mw)
    }
}

impl AllocationResult {
    pub fn is_shortfall(&self) -> bool {
        matches!(self.outcome, AllocationOutcome::Shortfall { .. })
    }

    pub fn shortfall(&self) -> Option<&ShortfallReport> {
        match &self.outcome {
            AllocationOutcome::Shortfall { report, .. } => Some(report),
            AllocationOutcome::Met => None,
        }
    }

    /// Warning text for display, present only on shortfall
    pub fn warning(&self) -> Option<&str> {
        self.shortfall().map(|r| r.message.as_str())
    }

    /// Mitigation advisories; empty when demand is met
    pub fn advisories(&self) -> &[&'static str] {
        match &self.outcome {
            AllocationOutcome::Shortfall { advisories, .. } => advisories.items(),
            AllocationOutcome::Met => &[],
        }
    }

    pub fn total_allocated_mw(&self) -> f64 {
        self.allocations.iter().map(|a| a.allocated_mw).sum()
    }

    /// Rows rounded to two decimals
    ///
    /// Rounding happens here and nowhere else. When demand is met, the last
    /// source with positive capacity absorbs the cent-level residual so the
    /// rows add up to the rounded remaining demand. A row never exceeds its
    /// rounded capacity; anything that does not fit spills to earlier rows.
    /// Values too large for integer cents are rounded row by row instead.
    pub fn presented_allocations(&self) -> Vec<PresentedAllocation> {
        let rows = self.balanced_rows().unwrap_or_else(|| {
            self.allocations
                .iter()
                .map(|a| (a.allocated_mw * 100.0).round() / 100.0)
                .collect()
        });

        self.allocations
            .iter()
            .zip(rows)
            .map(|(entry, allocated_mw)| PresentedAllocation {
                source_name: entry.source_name.clone(),
                allocated_mw,
            })
            .collect()
    }

    fn balanced_rows(&self) -> Option<Vec<f64>> {
        let mut cents = self
            .allocations
            .iter()
            .map(|a| to_cents(a.allocated_mw))
            .collect::<Option<Vec<i128>>>()?;

        if !self.is_shortfall() {
            let allocated = cents.iter().try_fold(0i128, |acc, c| acc.checked_add(*c))?;
            let mut residual = to_cents(self.remaining_mw)?.checked_sub(allocated)?;
            for (idx, entry) in self.allocations.iter().enumerate().rev() {
                if residual == 0 {
                    break;
                }
                if entry.capacity_mw <= 0.0 {
                    continue;
                }
                let cap = to_cents(entry.capacity_mw)?;
                let adjusted = cents[idx].checked_add(residual)?.clamp(0, cap);
                residual = residual.checked_sub(adjusted - cents[idx])?;
                cents[idx] = adjusted;
            }
        }

        Some(cents.into_iter().map(|c| c as f64 / 100.0).collect())
    }
}

/// Whole cents, or `None` once the value leaves the exact integer range
fn to_cents(mw: f64) -> Option<i128> {
    let cents = (mw * 100.0).round();
    if cents.is_finite() && cents.abs() < i128::MAX as f64 {
        Some(cents as i128)
    } else {
        None
    }
}

impl fmt::Display for AllocationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.presented_allocations() {
            writeln!(f, "{}", row)?;
        }
        if let Some(warning) = self.warning() {
            writeln!(f, "{}", warning)?;
        }
        Ok(())
    }
}
