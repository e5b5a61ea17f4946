//! Wall segment geometry
//!
//! Every wall in the maze is a line segment between two points in world
//! units. Levels are just lists of these.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A wall: a line segment from `a` to `b`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    /// Construct from raw coordinates, as level data is written
    pub const fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            a: Vec2::new(x1, y1),
            b: Vec2::new(x2, y2),
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.a + self.b) * 0.5
    }

    /// Collinearity touch test: a point touches the wall when the sum of its
    /// distances to both endpoints is within `tolerance` of the wall length.
    pub fn touched_by(&self, point: Vec2, tolerance: f32) -> bool {
        let d = point.distance(self.a) + point.distance(self.b);
        d <= self.length() + tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_midpoint() {
        let wall = Segment::from_coords(0.0, 0.0, 30.0, 40.0);
        assert!((wall.length() - 50.0).abs() < 0.001);
        assert_eq!(wall.midpoint(), Vec2::new(15.0, 20.0));
    }

    #[test]
    fn test_touch_on_segment() {
        let wall = Segment::from_coords(100.0, 100.0, 300.0, 100.0);
        // Point on the wall
        assert!(wall.touched_by(Vec2::new(200.0, 100.0), 5.0));
        // Point slightly off the wall, within tolerance
        assert!(wall.touched_by(Vec2::new(200.0, 103.0), 5.0));
    }

    #[test]
    fn test_touch_miss() {
        let wall = Segment::from_coords(100.0, 100.0, 300.0, 100.0);
        // Well clear of the wall
        assert!(!wall.touched_by(Vec2::new(200.0, 150.0), 5.0));
        // Past an endpoint
        assert!(!wall.touched_by(Vec2::new(400.0, 100.0), 5.0));
    }

    #[test]
    fn test_touch_near_endpoint() {
        let wall = Segment::from_coords(100.0, 100.0, 300.0, 100.0);
        assert!(wall.touched_by(Vec2::new(101.0, 101.0), 5.0));
    }
}
