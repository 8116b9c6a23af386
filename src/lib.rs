//! # drone-delivery-ga
//!
//! Energy-optimal assignment and sequencing of delivery tasks across a
//! fleet of battery-limited drones. A genetic algorithm searches over a
//! two-part permutation encoding; each candidate is scored by a
//! physics-based route simulator that inserts charging-station visits and
//! enforces delivery deadlines and battery-safety margins.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Task, Drone, charging stations as [`models::Point`], FleetProblem)
//! - [`energy`] — Closed-form aerodynamic-drag + induced-lift energy model
//! - [`simulation`] — Route simulator and objective evaluator
//! - [`ga`] — Chromosome encoding, genetic operators, selection, generation
//!   processing, and the evolutionary loop
//!
//! The crate is single-threaded and synchronous. All randomness flows
//! through a caller-supplied [`rand::Rng`], so seeded runs are
//! reproducible. Progress and diagnostics are emitted as `tracing` events.

pub mod energy;
pub mod ga;
pub mod models;
pub mod simulation;
