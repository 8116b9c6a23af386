//! Fleet plan and violation types produced by the simulator.

use crate::models::{Point, Task};

/// One executed task within a drone's route timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    /// Task that was executed.
    pub task_id: usize,
    /// Charging station visited before the pickup leg, if any.
    pub recharge_before: Option<Point>,
    /// Energy consumed by the pickup and delivery legs (joules).
    pub energy: f64,
    /// Elapsed time since the drone left its base, at the dropoff (seconds).
    pub completed_at: f64,
}

/// A constraint violation found while simulating a route.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// The drone could not reach a charging station before running dry;
    /// its remaining tasks were not simulated.
    Stranded {
        /// Drone whose route failed.
        drone_id: usize,
        /// Task that triggered the failed recharge attempt.
        task_id: usize,
    },
    /// A task finished after its delivery deadline.
    DeadlineMissed {
        /// Drone that executed the task.
        drone_id: usize,
        /// Task whose deadline was missed.
        task_id: usize,
        /// Elapsed time at the dropoff.
        completed_at: f64,
        /// The task's time limit.
        deadline: f64,
    },
    /// After a dropoff the drone lacked the battery to reach its nearest
    /// charging station.
    UnsafeFinish {
        /// Drone left at risk.
        drone_id: usize,
        /// Task after which the check failed.
        task_id: usize,
        /// Battery remaining at the dropoff (joules).
        battery: f64,
        /// Energy needed to reach the nearest station (joules).
        required: f64,
    },
}

/// The simulated timeline of one drone.
#[derive(Debug, Clone)]
pub struct DroneRoute {
    drone_id: usize,
    visits: Vec<Visit>,
    duration: f64,
    energy: f64,
}

impl DroneRoute {
    pub(crate) fn new(drone_id: usize) -> Self {
        Self {
            drone_id,
            visits: Vec::new(),
            duration: 0.0,
            energy: 0.0,
        }
    }

    pub(crate) fn push_visit(&mut self, visit: Visit) {
        self.visits.push(visit);
    }

    pub(crate) fn add_energy(&mut self, energy: f64) {
        self.energy += energy;
    }

    pub(crate) fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }

    /// Drone this route belongs to.
    pub fn drone_id(&self) -> usize {
        self.drone_id
    }

    /// Executed visits in order.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Task IDs in execution order.
    pub fn task_ids(&self) -> Vec<usize> {
        self.visits.iter().map(|v| v.task_id).collect()
    }

    /// Total elapsed time from base departure to the last dropoff (seconds).
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Total energy consumed, recharge detours included (joules).
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Number of tasks executed.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns `true` if the drone was assigned no tasks.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

/// The full result of simulating one chromosome: per-drone timelines, the
/// annotated private task copy, aggregate energy and time, and every
/// violation found.
///
/// The objective consumed by the optimizer is [`FleetPlan::objective`]:
/// total fleet energy, or 0 when any violation was recorded.
#[derive(Debug, Clone)]
pub struct FleetPlan {
    routes: Vec<DroneRoute>,
    tasks: Vec<Task>,
    total_energy: f64,
    total_time: f64,
    violations: Vec<Violation>,
}

impl FleetPlan {
    pub(crate) fn new(routes: Vec<DroneRoute>, tasks: Vec<Task>, violations: Vec<Violation>) -> Self {
        let total_energy = routes.iter().map(|r| r.energy()).sum();
        let total_time = routes.iter().map(|r| r.duration()).sum();
        Self {
            routes,
            tasks,
            total_energy,
            total_time,
            violations,
        }
    }

    /// Per-drone route timelines, indexed by drone ID.
    pub fn routes(&self) -> &[DroneRoute] {
        &self.routes
    }

    /// The task list annotated with recharge-previous markers.
    ///
    /// This is the simulator's private copy; the problem's task list is
    /// never touched.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Consumes the plan, returning the annotated task list.
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    /// Total fleet energy (joules), recharge detours included.
    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    /// Sum of all drone route durations (seconds).
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Completion time of the last-finishing drone (seconds).
    pub fn makespan(&self) -> f64 {
        self.routes.iter().map(|r| r.duration()).fold(0.0, f64::max)
    }

    /// Violations recorded during simulation.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns `true` if no violation was recorded.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }

    /// The optimizer's objective: total fleet energy, or 0 when the plan is
    /// infeasible (or degenerately consumed no energy at all).
    pub fn objective(&self) -> f64 {
        if self.is_feasible() && self.total_energy > 0.0 {
            self.total_energy
        } else {
            0.0
        }
    }
}
