//! Closed-form flight energy model.
//!
//! Energy for one delivery is the sum of an aerodynamic-drag term over all
//! three legs and induced-lift terms that distinguish the loaded leg (pickup
//! to dropoff) from the unloaded legs, divided by a global efficiency
//! factor:
//!
//! ```text
//! E = (1/η) · [ c_d·ρ·A_d·(L1+L2+L3)·v²
//!             + L2·((m+m_p)·g)^1.5 / (v·FM·√(2ρA_r))
//!             + (L1+L3)·(m·g)^1.5  / (v·FM·√(2ρA_r)) ]
//! ```
//!
//! Distances are in meters, speed in m/s, masses in kilograms; the result is
//! in joules.

use serde::{Deserialize, Serialize};

/// Physical constants of a delivery drone.
///
/// # Examples
///
/// ```
/// use drone_delivery_ga::energy::DroneParams;
///
/// let params = DroneParams::default();
/// assert!(params.energy(0.0, 0.0, 0.0, 15.0, 0.0).abs() < 1e-12);
/// assert!(params.energy(100.0, 100.0, 0.0, 15.0, 1.0) > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneParams {
    /// Empty drone mass (kg).
    pub mass: f64,
    /// Drag coefficient (dimensionless).
    pub drag_coefficient: f64,
    /// Frontal area in the direction of travel (m²).
    pub frontal_area: f64,
    /// Total rotor disc area (m²).
    pub rotor_area: f64,
    /// Rotor figure of merit (dimensionless, typically 0.6–0.75).
    pub figure_of_merit: f64,
    /// Global powertrain efficiency (dimensionless).
    pub efficiency: f64,
    /// Air density (kg/m³).
    pub air_density: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
}

impl Default for DroneParams {
    fn default() -> Self {
        Self {
            mass: 1.5,
            drag_coefficient: 1.0,
            frontal_area: 0.1,
            rotor_area: 0.05,
            figure_of_merit: 0.7,
            efficiency: 0.9,
            air_density: 1.225,
            gravity: 9.81,
        }
    }
}

impl DroneParams {
    /// Energy consumed over a three-leg flight.
    ///
    /// `l1` is the approach leg to the pickup, `l2` the loaded leg carrying
    /// `payload_mass`, and `l3` the leg after the dropoff. Pure and
    /// monotonically non-decreasing in each distance and in the payload.
    pub fn energy(&self, l1: f64, l2: f64, l3: f64, speed: f64, payload_mass: f64) -> f64 {
        let drag =
            self.drag_coefficient * self.air_density * self.frontal_area * (l1 + l2 + l3) * speed * speed;

        let lift_denom =
            speed * self.figure_of_merit * (2.0 * self.air_density * self.rotor_area).sqrt();
        let lift_loaded = l2 * ((self.mass + payload_mass) * self.gravity).powi(3).sqrt() / lift_denom;
        let lift_unloaded = (l1 + l3) * (self.mass * self.gravity).powi(3).sqrt() / lift_denom;

        (drag + lift_loaded + lift_unloaded) / self.efficiency
    }
}
