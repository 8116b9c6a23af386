//! Validated problem container.

use serde::{Deserialize, Serialize};

use super::{Drone, Point, Task};

/// A complete fleet routing problem: tasks, drones, and charging stations.
///
/// Construction validates the data once so the optimizer can assume task IDs
/// are dense, coordinates are finite, and every list is non-empty.
///
/// # Examples
///
/// ```
/// use drone_delivery_ga::models::{Drone, FleetProblem, Point, Task};
///
/// let tasks = vec![Task::new(0, Point::new(0.0, 0.0), Point::new(10.0, 0.0), 1.0, 600.0)];
/// let drones = vec![Drone::new(0, Point::new(0.0, 0.0))];
/// let stations = vec![Point::new(5.0, 0.0)];
///
/// let problem = FleetProblem::new(tasks, drones, stations).expect("valid");
/// assert_eq!(problem.num_tasks(), 1);
/// assert_eq!(problem.num_drones(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetProblem {
    tasks: Vec<Task>,
    drones: Vec<Drone>,
    stations: Vec<Point>,
}

impl FleetProblem {
    /// Creates a problem after validating the inputs.
    ///
    /// Returns `None` if any list is empty, any coordinate is non-finite,
    /// task IDs are not exactly `0..tasks.len()` in order, a payload mass is
    /// negative or non-finite, or a deadline is not strictly positive.
    pub fn new(tasks: Vec<Task>, drones: Vec<Drone>, stations: Vec<Point>) -> Option<Self> {
        if tasks.is_empty() || drones.is_empty() || stations.is_empty() {
            return None;
        }
        for (i, task) in tasks.iter().enumerate() {
            if task.id() != i
                || !task.pickup().is_finite()
                || !task.dropoff().is_finite()
                || !task.payload_mass().is_finite()
                || task.payload_mass() < 0.0
                || !task.deadline().is_finite()
                || task.deadline() <= 0.0
            {
                return None;
            }
        }
        for drone in &drones {
            if !drone.base().is_finite() {
                return None;
            }
        }
        for station in &stations {
            if !station.is_finite() {
                return None;
            }
        }
        Some(Self {
            tasks,
            drones,
            stations,
        })
    }

    /// The task list, indexed by task ID.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The drone fleet, indexed by drone ID.
    pub fn drones(&self) -> &[Drone] {
        &self.drones
    }

    /// Charging station positions, fixed for the whole run.
    pub fn stations(&self) -> &[Point] {
        &self.stations
    }

    /// Number of tasks.
    pub fn num_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Number of drones.
    pub fn num_drones(&self) -> usize {
        self.drones.len()
    }
}
