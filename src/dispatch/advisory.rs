use serde::{Serialize, Serializer};
use std::fmt;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// Mitigation actions offered when grid capacity cannot cover demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr, strum::Display)]
pub enum MitigationAction {
    #[strum(to_string = "Purchase electricity from neighboring states or regions.")]
    PurchaseFromNeighbors,
    #[strum(to_string = "Increase the use of renewable energy sources such as wind or solar.")]
    IncreaseRenewables,
    #[strum(to_string = "Implement demand-side management techniques to reduce peak demand.")]
    DemandSideManagement,
    #[strum(to_string = "Use energy storage systems to mitigate demand spikes.")]
    DeployStorage,
    #[strum(to_string = "Encourage users to shift usage to off-peak times.")]
    ShiftToOffPeak,
}

/// Steps for growing the renewable contribution over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr, strum::Display)]
pub enum RenewableStep {
    #[strum(to_string = "Invest in large-scale solar power plants.")]
    UtilitySolar,
    #[strum(
        to_string = "Increase rooftop solar installations across residential and commercial buildings."
    )]
    RooftopSolar,
    #[strum(to_string = "Encourage the use of wind and hydroelectric power in nearby regions.")]
    WindAndHydro,
    #[strum(to_string = "Implement energy storage systems like batteries for renewable energy.")]
    BatteryStorage,
    #[strum(to_string = "Incentivize energy efficiency programs to reduce overall demand.")]
    EfficiencyPrograms,
}

/// Ordered list of fixed advisory strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvisoryList(Vec<&'static str>);

impl AdvisoryList {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn items(&self) -> &[&'static str] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

impl Serialize for AdvisoryList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl fmt::Display for AdvisoryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, item) in self.0.iter().enumerate() {
            writeln!(f, "{}. {}", idx + 1, item)?;
        }
        Ok(())
    }
}

/// Map "shortfall detected" to the fixed mitigation list
///
/// Independent of the numeric inputs; an empty list when there is no shortfall.
pub fn advise(shortfall_present: bool) -> AdvisoryList {
    if !shortfall_present {
        return AdvisoryList::empty();
    }
    AdvisoryList(MitigationAction::iter().map(<&'static str>::from).collect())
}

/// Standing guidance for expanding renewable supply, shown regardless of shortfall
pub fn renewable_expansion_steps() -> AdvisoryList {
    AdvisoryList(RenewableStep::iter().map(<&'static str>::from).collect())
}
