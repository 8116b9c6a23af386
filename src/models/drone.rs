//! Drone type.

use serde::{Deserialize, Serialize};

use super::Point;

/// A drone with a fixed base position.
///
/// Each drone starts every plan at its base with a full battery. Physical
/// constants shared by the whole fleet live in
/// [`DroneParams`](crate::energy::DroneParams).
///
/// # Examples
///
/// ```
/// use drone_delivery_ga::models::{Drone, Point};
///
/// let d = Drone::new(0, Point::new(50.0, 50.0));
/// assert_eq!(d.id(), 0);
/// assert_eq!(d.base(), Point::new(50.0, 50.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    id: usize,
    base: Point,
}

impl Drone {
    /// Creates a drone with the given ID and base position.
    pub fn new(id: usize, base: Point) -> Self {
        Self { id, base }
    }

    /// Drone ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Initial position.
    pub fn base(&self) -> Point {
        self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drone_new() {
        let d = Drone::new(2, Point::new(-1.0, 4.0));
        assert_eq!(d.id(), 2);
        assert_eq!(d.base(), Point::new(-1.0, 4.0));
    }

    #[test]
    fn test_drone_serde_roundtrip() {
        let d = Drone::new(0, Point::new(10.0, 20.0));
        let json = serde_json::to_string(&d).expect("serialize");
        let back: Drone = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(d, back);
    }
}
