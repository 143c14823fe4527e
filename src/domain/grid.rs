use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// A single power source in the grid fleet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSource {
    /// Display identity, unique within a registry
    pub name: String,

    /// Rated capacity (MW)
    pub capacity_mw: f64,
}

impl GridSource {
    pub fn new(name: impl Into<String>, capacity_mw: f64) -> Self {
        Self {
            name: name.into(),
            capacity_mw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("grid source at position {0} has an empty name")]
    EmptyName(usize),

    #[error("duplicate grid source name: {0}")]
    DuplicateName(String),

    #[error("grid source {name} has invalid capacity {capacity_mw} MW")]
    InvalidCapacity { name: String, capacity_mw: f64 },
}

/// Ordered, read-only fleet of grid sources
///
/// Cloning is cheap and yields a snapshot sharing the same backing slice.
/// There is no mutation path; a changed fleet is a new registry.
#[derive(Debug, Clone)]
pub struct GridRegistry {
    sources: Arc<[GridSource]>,
}

impl GridRegistry {
    /// Build a registry, rejecting empty or duplicate names and capacities
    /// that are negative or non-finite
    pub fn new(sources: Vec<GridSource>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(sources.len());

        for (idx, source) in sources.iter().enumerate() {
            if source.name.trim().is_empty() {
                return Err(RegistryError::EmptyName(idx));
            }

            if !source.capacity_mw.is_finite() || source.capacity_mw < 0.0 {
                return Err(RegistryError::InvalidCapacity {
                    name: source.name.clone(),
                    capacity_mw: source.capacity_mw,
                });
            }

            if !seen.insert(source.name.as_str()) {
                return Err(RegistryError::DuplicateName(source.name.clone()));
            }
        }

        Ok(Self {
            sources: sources.into(),
        })
    }

    /// Delhi fleet: Northern Grid, DTL, Bawana, Rajghat, Okhla (16785 MW total)
    pub fn delhi_default() -> Self {
        Self {
            sources: default_delhi_sources().into(),
        }
    }

    pub fn sources(&self) -> &[GridSource] {
        &self.sources
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GridSource> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Look up a source by its display name
    pub fn get(&self, name: &str) -> Option<&GridSource> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Sum of all rated capacities (MW)
    ///
    /// Recomputed on every call, never cached.
    pub fn total_capacity_mw(&self) -> f64 {
        self.sources.iter().map(|s| s.capacity_mw).sum()
    }
}

impl<'a> IntoIterator for &'a GridRegistry {
    type Item = &'a GridSource;
    type IntoIter = std::slice::Iter<'a, GridSource>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub fn default_delhi_sources() -> Vec<GridSource> {
    vec![
        GridSource::new("Northern Grid", 12000.0),
        GridSource::new("Delhi Transco Limited (DTL)", 3000.0),
        GridSource::new("Bawana Power Plant", 1500.0),
        GridSource::new("Rajghat Power House", 135.0),
        GridSource::new("Okhla Power Plant", 150.0),
    ]
}
