//! Delivery task type.

use serde::{Deserialize, Serialize};

use super::Point;

/// A delivery task: pick a package up and drop it off before a deadline.
///
/// Tasks are read-only problem data except for the `recharge_previous`
/// annotation, which the simulator fills in on its private copy of the task
/// list when it inserts a charging stop before the task's pickup leg.
///
/// # Examples
///
/// ```
/// use drone_delivery_ga::models::{Point, Task};
///
/// let t = Task::new(0, Point::new(0.0, 0.0), Point::new(100.0, 0.0), 1.2, 600.0);
/// assert_eq!(t.id(), 0);
/// assert_eq!(t.payload_mass(), 1.2);
/// assert!(t.recharge_previous().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: usize,
    pickup: Point,
    dropoff: Point,
    payload_mass: f64,
    deadline: f64,
    recharge_previous: Option<Point>,
}

impl Task {
    /// Creates a new task.
    ///
    /// `payload_mass` is in kilograms, `deadline` in seconds measured from
    /// the assigned drone's departure.
    pub fn new(id: usize, pickup: Point, dropoff: Point, payload_mass: f64, deadline: f64) -> Self {
        Self {
            id,
            pickup,
            dropoff,
            payload_mass,
            deadline,
            recharge_previous: None,
        }
    }

    /// Task ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Pickup location.
    pub fn pickup(&self) -> Point {
        self.pickup
    }

    /// Dropoff location.
    pub fn dropoff(&self) -> Point {
        self.dropoff
    }

    /// Package mass in kilograms.
    pub fn payload_mass(&self) -> f64 {
        self.payload_mass
    }

    /// Delivery time limit in seconds.
    pub fn deadline(&self) -> f64 {
        self.deadline
    }

    /// Charging stop taken before this task, if the simulator inserted one.
    pub fn recharge_previous(&self) -> Option<Point> {
        self.recharge_previous
    }

    pub(crate) fn set_recharge_previous(&mut self, station: Option<Point>) {
        self.recharge_previous = station;
    }

    /// Distance of the loaded pickup-to-dropoff leg.
    pub fn delivery_distance(&self) -> f64 {
        self.pickup.distance_to(&self.dropoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_new() {
        let t = Task::new(3, Point::new(1.0, 2.0), Point::new(4.0, 6.0), 0.5, 900.0);
        assert_eq!(t.id(), 3);
        assert_eq!(t.pickup(), Point::new(1.0, 2.0));
        assert_eq!(t.dropoff(), Point::new(4.0, 6.0));
        assert_eq!(t.payload_mass(), 0.5);
        assert_eq!(t.deadline(), 900.0);
        assert!(t.recharge_previous().is_none());
    }

    #[test]
    fn test_delivery_distance() {
        let t = Task::new(0, Point::new(0.0, 0.0), Point::new(3.0, 4.0), 1.0, 600.0);
        assert!((t.delivery_distance() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_recharge_annotation() {
        let mut t = Task::new(0, Point::new(0.0, 0.0), Point::new(1.0, 0.0), 1.0, 600.0);
        t.set_recharge_previous(Some(Point::new(5.0, 5.0)));
        assert_eq!(t.recharge_previous(), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_task_serde_roundtrip() {
        let t = Task::new(1, Point::new(0.0, 0.0), Point::new(10.0, 10.0), 1.5, 1200.0);
        let json = serde_json::to_string(&t).expect("serialize");
        let back: Task = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(t, back);
    }
}
