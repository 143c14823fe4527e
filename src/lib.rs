//! Grid Dispatch
//!
//! Capacity-weighted allocation of power demand across a fixed grid fleet,
//! with shortfall detection and mitigation advice.

pub mod api;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod domain;
pub mod telemetry;
