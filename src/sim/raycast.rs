//! Visibility raycasting
//!
//! The light effect is a fan of rays cast from the particle against every
//! wall. Each ray keeps only its nearest intersection. The whole sweep is
//! O(rays × walls) and runs once per rendered frame.

use glam::Vec2;
use std::f32::consts::TAU;

use super::segment::Segment;
use crate::angle_to_dir;

/// A directed half-line from the particle
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec2,
    /// Unit direction
    pub dir: Vec2,
}

impl Ray {
    pub fn from_angle(origin: Vec2, theta: f32) -> Self {
        Self {
            origin,
            dir: angle_to_dir(theta),
        }
    }

    /// Aim the ray at a point, keeping the origin
    pub fn look_at(&mut self, target: Vec2) {
        self.dir = (target - self.origin).normalize_or_zero();
    }

    /// Closed-form segment intersection.
    ///
    /// The wall is parameterized by `t` in (0,1), the ray by `u > 0` along
    /// its direction. Parallel lines (zero denominator) never hit.
    pub fn cast(&self, wall: &Segment) -> Option<Vec2> {
        let x1 = wall.a.x;
        let y1 = wall.a.y;
        let x2 = wall.b.x;
        let y2 = wall.b.y;

        let x3 = self.origin.x;
        let y3 = self.origin.y;
        let x4 = self.origin.x + self.dir.x;
        let y4 = self.origin.y + self.dir.y;

        let den = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
        if den == 0.0 {
            return None;
        }

        let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / den;
        let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / den;

        if t > 0.0 && t < 1.0 && u > 0.0 {
            Some(wall.a + t * (wall.b - wall.a))
        } else {
            None
        }
    }
}

/// Nearest intersection of one ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec2,
    pub distance: f32,
}

/// Find the closest wall intersection along a ray, if any
pub fn closest_hit(origin: Vec2, dir: Vec2, walls: &[Segment]) -> Option<RayHit> {
    let ray = Ray { origin, dir };
    let mut record = f32::INFINITY;
    let mut closest = None;

    for wall in walls {
        if let Some(pt) = ray.cast(wall) {
            let d = origin.distance(pt);
            if d < record {
                record = d;
                closest = Some(RayHit {
                    point: pt,
                    distance: d,
                });
            }
        }
    }

    closest
}

/// Cast `ray_count` rays at uniform angular spacing and collect the nearest
/// hit per ray (`None` where the ray escapes all walls).
///
/// `out` is cleared and refilled so the caller can reuse its allocation
/// across frames.
pub fn sweep(origin: Vec2, walls: &[Segment], ray_count: u32, out: &mut Vec<Option<RayHit>>) {
    out.clear();
    out.reserve(ray_count as usize);

    for i in 0..ray_count {
        let theta = i as f32 / ray_count as f32 * TAU;
        out.push(closest_hit(origin, angle_to_dir(theta), walls));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cast_hit() {
        // Vertical wall ahead of a ray pointing +x
        let wall = Segment::from_coords(100.0, -50.0, 100.0, 50.0);
        let ray = Ray::from_angle(Vec2::ZERO, 0.0);

        let pt = ray.cast(&wall).expect("should hit");
        assert!((pt.x - 100.0).abs() < 0.001);
        assert!(pt.y.abs() < 0.001);
    }

    #[test]
    fn test_cast_behind() {
        // Wall behind the ray origin
        let wall = Segment::from_coords(-100.0, -50.0, -100.0, 50.0);
        let ray = Ray::from_angle(Vec2::ZERO, 0.0);
        assert!(ray.cast(&wall).is_none());
    }

    #[test]
    fn test_cast_parallel() {
        // Wall parallel to the ray
        let wall = Segment::from_coords(0.0, 10.0, 100.0, 10.0);
        let ray = Ray::from_angle(Vec2::ZERO, 0.0);
        assert!(ray.cast(&wall).is_none());
    }

    #[test]
    fn test_cast_misses_past_endpoint() {
        // Wall span doesn't cross the ray line
        let wall = Segment::from_coords(100.0, 10.0, 100.0, 50.0);
        let ray = Ray::from_angle(Vec2::ZERO, 0.0);
        assert!(ray.cast(&wall).is_none());
    }

    #[test]
    fn test_look_at() {
        let mut ray = Ray::from_angle(Vec2::new(10.0, 10.0), 0.0);
        ray.look_at(Vec2::new(10.0, 110.0));
        assert!((ray.dir - Vec2::new(0.0, 1.0)).length() < 0.001);
    }

    #[test]
    fn test_closest_hit_picks_nearest() {
        let walls = [
            Segment::from_coords(200.0, -50.0, 200.0, 50.0),
            Segment::from_coords(100.0, -50.0, 100.0, 50.0),
            Segment::from_coords(300.0, -50.0, 300.0, 50.0),
        ];
        let hit = closest_hit(Vec2::ZERO, Vec2::X, &walls).expect("should hit");
        assert!((hit.distance - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_sweep_counts() {
        // A box around the origin: every ray must land somewhere
        let walls = [
            Segment::from_coords(-100.0, -100.0, 100.0, -100.0),
            Segment::from_coords(100.0, -100.0, 100.0, 100.0),
            Segment::from_coords(100.0, 100.0, -100.0, 100.0),
            Segment::from_coords(-100.0, 100.0, -100.0, -100.0),
        ];
        let mut hits = Vec::new();
        sweep(Vec2::ZERO, &walls, 360, &mut hits);
        assert_eq!(hits.len(), 360);
        assert!(hits.iter().all(|h| h.is_some()));
    }

    #[test]
    fn test_sweep_open_world() {
        let mut hits = Vec::new();
        sweep(Vec2::ZERO, &[], 90, &mut hits);
        assert_eq!(hits.len(), 90);
        assert!(hits.iter().all(|h| h.is_none()));
    }

    proptest! {
        /// Any reported intersection lies on the wall segment and in front
        /// of the ray origin.
        #[test]
        fn prop_hit_point_on_wall(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            theta in 0.0f32..std::f32::consts::TAU,
        ) {
            let wall = Segment::from_coords(ax, ay, bx, by);
            let ray = Ray::from_angle(Vec2::new(600.0, 600.0), theta);

            if let Some(pt) = ray.cast(&wall) {
                // On the wall: endpoint distances sum to the wall length
                let on_wall = pt.distance(wall.a) + pt.distance(wall.b);
                prop_assert!((on_wall - wall.length()).abs() < 1e-3 * (1.0 + wall.length()));
                // In front of the origin
                prop_assert!((pt - ray.origin).dot(ray.dir) > 0.0);
            }
        }
    }
}
