//! Geometric primitives shared by the gesture state machines.

use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Straight-line distance from the origin, `sqrt(x² + y²)`.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let end = Point::new(130.0, 60.0);
        let origin = Point::new(50.0, 50.0);
        let delta = end - origin;
        assert_eq!(delta, Point::new(80.0, 10.0));
        assert_eq!(origin + delta, end);
    }

    #[test]
    fn test_magnitude() {
        let delta = Point::new(3.0, 4.0);
        assert!((delta.magnitude() - 5.0).abs() < f32::EPSILON);
        assert_eq!(Point::ZERO.magnitude(), 0.0);
    }
}
