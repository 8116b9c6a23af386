//! Route simulator and objective evaluator.
//!
//! Walks each drone's decoded route sequentially, tracking position,
//! battery, and elapsed time. A charging stop is inserted before a pickup
//! leg whenever the battery cannot cover the task's direct energy
//! requirement; deadline and reach-a-station safety checks record
//! violations. Any violation zeroes the objective (the feasibility filter
//! discards such individuals), but the plan keeps full diagnostics.

use serde::{Deserialize, Serialize};

use crate::energy::DroneParams;
use crate::ga::Chromosome;
use crate::models::{FleetProblem, Point};

use super::plan::{DroneRoute, FleetPlan, Violation, Visit};

/// Simulation-wide flight parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Cruise speed for every leg (m/s).
    pub cruise_speed: f64,
    /// Battery capacity (joules). Drones start full and refill to full at
    /// charging stations.
    pub battery_capacity: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            cruise_speed: 15.0,
            battery_capacity: 5.0e6,
        }
    }
}

/// Returns the charging station nearest to `point`.
pub(crate) fn nearest_station(point: &Point, stations: &[Point]) -> Option<Point> {
    stations
        .iter()
        .copied()
        .min_by(|a, b| {
            point
                .distance_to(a)
                .partial_cmp(&point.distance_to(b))
                .expect("station distance should not be NaN")
        })
}

/// Simulates chromosomes against a fleet problem and scores them.
///
/// Each evaluation operates on a private clone of the task list, so the
/// recharge annotations written during one evaluation can never leak into
/// another individual's score.
///
/// # Examples
///
/// ```
/// use drone_delivery_ga::energy::DroneParams;
/// use drone_delivery_ga::ga::Chromosome;
/// use drone_delivery_ga::models::{Drone, FleetProblem, Point, Task};
/// use drone_delivery_ga::simulation::{FleetSimulator, SimParams};
///
/// let tasks = vec![Task::new(0, Point::new(0.0, 0.0), Point::new(30.0, 40.0), 1.0, 600.0)];
/// let drones = vec![Drone::new(0, Point::new(0.0, 0.0))];
/// let stations = vec![Point::new(30.0, 40.0)];
/// let problem = FleetProblem::new(tasks, drones, stations).expect("valid");
///
/// let params = DroneParams::default();
/// let sim_params = SimParams::default();
/// let sim = FleetSimulator::new(&problem, &params, &sim_params);
///
/// let energy = sim.evaluate(&Chromosome::new(vec![0], vec![]));
/// assert!(energy > 0.0);
/// ```
pub struct FleetSimulator<'a> {
    problem: &'a FleetProblem,
    params: &'a DroneParams,
    sim: &'a SimParams,
}

impl<'a> FleetSimulator<'a> {
    /// Creates a simulator over the given problem and parameters.
    pub fn new(problem: &'a FleetProblem, params: &'a DroneParams, sim: &'a SimParams) -> Self {
        Self {
            problem,
            params,
            sim,
        }
    }

    /// Simulates one chromosome into a full fleet plan.
    pub fn simulate(&self, chromosome: &Chromosome) -> FleetPlan {
        let mut tasks = self.problem.tasks().to_vec();
        for task in &mut tasks {
            task.set_recharge_previous(None);
        }

        let decoded = chromosome.decode(self.problem.num_drones());
        let speed = self.sim.cruise_speed;
        let full = self.sim.battery_capacity;
        let stations = self.problem.stations();

        let mut routes = Vec::with_capacity(decoded.len());
        let mut violations = Vec::new();

        for (drone, assigned) in self.problem.drones().iter().zip(&decoded) {
            let mut route = DroneRoute::new(drone.id());
            let mut position = drone.base();
            let mut battery = full;
            let mut elapsed = 0.0;

            for &task_id in assigned {
                let (pickup, dropoff, payload, deadline) = {
                    let t = &tasks[task_id];
                    (t.pickup(), t.dropoff(), t.payload_mass(), t.deadline())
                };

                let mut l1 = position.distance_to(&pickup);
                let l2 = pickup.distance_to(&dropoff);
                let mut required = self.params.energy(l1, l2, 0.0, speed, payload);
                let mut recharge_before = None;

                if required > battery {
                    // Not enough for the direct flight: divert to the
                    // nearest station first, or strand if even that is out
                    // of reach.
                    let station = nearest_station(&position, stations);
                    let reachable = station.map(|s| {
                        let l0 = position.distance_to(&s);
                        (s, l0, self.params.energy(l0, 0.0, 0.0, speed, 0.0))
                    });
                    match reachable {
                        Some((station, l0, detour)) if detour <= battery => {
                            route.add_energy(detour);
                            elapsed += l0 / speed;
                            position = station;
                            battery = full;
                            recharge_before = Some(station);
                            tasks[task_id].set_recharge_previous(Some(station));
                            l1 = position.distance_to(&pickup);
                            required = self.params.energy(l1, l2, 0.0, speed, payload);
                        }
                        _ => {
                            tracing::trace!(
                                drone_id = drone.id(),
                                task_id,
                                "stranded: nearest station out of battery range"
                            );
                            violations.push(Violation::Stranded {
                                drone_id: drone.id(),
                                task_id,
                            });
                            break;
                        }
                    }
                }

                battery -= required;
                route.add_energy(required);
                elapsed += (l1 + l2) / speed;
                position = dropoff;
                route.push_visit(Visit {
                    task_id,
                    recharge_before,
                    energy: required,
                    completed_at: elapsed,
                });

                if elapsed > deadline {
                    violations.push(Violation::DeadlineMissed {
                        drone_id: drone.id(),
                        task_id,
                        completed_at: elapsed,
                        deadline,
                    });
                }

                // The drone must always keep enough charge to reach a
                // station from wherever a task leaves it.
                if let Some(station) = nearest_station(&position, stations) {
                    let l3 = position.distance_to(&station);
                    let reserve = self.params.energy(l3, 0.0, 0.0, speed, 0.0);
                    if battery < reserve {
                        violations.push(Violation::UnsafeFinish {
                            drone_id: drone.id(),
                            task_id,
                            battery,
                            required: reserve,
                        });
                    }
                }
            }

            route.set_duration(elapsed);
            routes.push(route);
        }

        FleetPlan::new(routes, tasks, violations)
    }

    /// Scores one chromosome: total fleet energy, or 0 when infeasible.
    pub fn evaluate(&self, chromosome: &Chromosome) -> f64 {
        self.simulate(chromosome).objective()
    }
}
