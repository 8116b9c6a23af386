//! Route simulation and objective evaluation.
//!
//! - [`FleetSimulator`] — walks decoded routes, inserting charging stops and
//!   recording violations
//! - [`FleetPlan`] — per-drone timelines, annotated tasks, aggregate metrics
//! - [`SimParams`] — cruise speed and battery capacity

mod plan;
mod simulator;

pub use plan::{DroneRoute, FleetPlan, Violation, Visit};
pub use simulator::{FleetSimulator, SimParams};
