//! Hand-authored level data
//!
//! Three levels, each a list of wall segments plus one goal point. Level 1
//! also sprinkles short scatter walls over a 30-unit grid, drawn from the
//! seeded run RNG so a seed fully determines the layout.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::segment::Segment;
use crate::consts::{GOAL_RADIUS, SPAWN, WORLD_SIZE};

/// One level: static walls plus a fixed goal
#[derive(Debug, Clone)]
pub struct Level {
    pub walls: Vec<Segment>,
    pub goal: Vec2,
    pub spawn: Vec2,
}

/// Scatter grid cell size (and scatter wall length)
const SCATTER_STEP: f32 = 30.0;
/// Probability a grid cell gets a scatter wall
const SCATTER_CHANCE: f32 = 0.15;
/// Keep scatter walls out of this radius around the spawn point
const SPAWN_CLEARANCE: f32 = 60.0;

/// Build a level by 0-based index. Panics on an out-of-range index; the
/// caller clamps to `LEVEL_COUNT`.
pub fn build(index: u32, rng: &mut Pcg32) -> Level {
    match index {
        0 => level_one(rng),
        1 => level_two(),
        2 => level_three(),
        _ => unreachable!("no level {index}"),
    }
}

fn level_one(rng: &mut Pcg32) -> Level {
    let mut walls = vec![
        Segment::from_coords(100.0, 100.0, 300.0, 100.0),
        Segment::from_coords(300.0, 100.0, 300.0, 300.0),
        Segment::from_coords(300.0, 300.0, 700.0, 300.0),
        Segment::from_coords(700.0, 300.0, 700.0, 700.0),
        Segment::from_coords(300.0, 500.0, 300.0, 700.0),
        Segment::from_coords(200.0, 600.0, 600.0, 600.0),
        Segment::from_coords(100.0, 100.0, 500.0, 100.0),
        Segment::from_coords(100.0, 100.0, 100.0, 500.0),
        Segment::from_coords(300.0, 700.0, 800.0, 700.0),
        // Partial spans leaving gaps to thread through
        Segment::from_coords(400.0, 100.0, 400.0, 300.0),
        Segment::from_coords(500.0, 300.0, 600.0, 300.0),
    ];

    let goal = Vec2::new(850.0, 850.0);
    scatter_walls(&mut walls, goal, rng);

    Level {
        walls,
        goal,
        spawn: SPAWN,
    }
}

/// Short scattered walls on a 30-unit grid for visual clutter. Cells near
/// the spawn or the goal stay clear so a fresh run is survivable.
fn scatter_walls(walls: &mut Vec<Segment>, goal: Vec2, rng: &mut Pcg32) {
    let steps = (WORLD_SIZE / SCATTER_STEP) as u32;

    for ix in 0..steps {
        for iy in 0..steps {
            let x = ix as f32 * SCATTER_STEP;
            let y = iy as f32 * SCATTER_STEP;

            if rng.random::<f32>() >= SCATTER_CHANCE {
                continue;
            }
            let horizontal = rng.random::<f32>() < 0.5;

            let cell = Vec2::new(x, y);
            if cell.distance(SPAWN) < SPAWN_CLEARANCE
                || cell.distance(goal) < GOAL_RADIUS + SCATTER_STEP
            {
                continue;
            }

            let wall = if horizontal {
                Segment::from_coords(x, y, x + SCATTER_STEP, y)
            } else {
                Segment::from_coords(x, y, x, y + SCATTER_STEP)
            };
            walls.push(wall);
        }
    }
}

fn level_two() -> Level {
    let walls = vec![
        Segment::from_coords(150.0, 150.0, 850.0, 150.0),
        Segment::from_coords(850.0, 150.0, 850.0, 550.0),
        Segment::from_coords(150.0, 150.0, 150.0, 600.0),
        Segment::from_coords(300.0, 300.0, 700.0, 300.0),
        Segment::from_coords(700.0, 300.0, 700.0, 700.0),
        Segment::from_coords(300.0, 300.0, 300.0, 650.0),
        Segment::from_coords(450.0, 450.0, 550.0, 450.0),
        Segment::from_coords(550.0, 450.0, 550.0, 750.0),
        Segment::from_coords(250.0, 750.0, 450.0, 750.0),
        Segment::from_coords(600.0, 600.0, 850.0, 600.0),
        Segment::from_coords(250.0, 550.0, 400.0, 550.0),
        Segment::from_coords(400.0, 850.0, 850.0, 850.0),
    ];

    Level {
        walls,
        goal: Vec2::new(150.0, 850.0),
        spawn: SPAWN,
    }
}

fn level_three() -> Level {
    let walls = vec![
        Segment::from_coords(150.0, 150.0, 550.0, 150.0),
        Segment::from_coords(150.0, 150.0, 150.0, 850.0),
        Segment::from_coords(150.0, 850.0, 850.0, 850.0),
        Segment::from_coords(850.0, 850.0, 850.0, 450.0),
        Segment::from_coords(300.0, 300.0, 300.0, 700.0),
        Segment::from_coords(300.0, 300.0, 650.0, 300.0),
        Segment::from_coords(650.0, 300.0, 650.0, 550.0),
        Segment::from_coords(450.0, 450.0, 450.0, 700.0),
        Segment::from_coords(450.0, 700.0, 750.0, 700.0),
        Segment::from_coords(550.0, 550.0, 750.0, 550.0),
        Segment::from_coords(700.0, 150.0, 700.0, 250.0),
        Segment::from_coords(250.0, 450.0, 300.0, 450.0),
    ];

    Level {
        walls,
        goal: Vec2::new(850.0, 150.0),
        spawn: SPAWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LEVEL_COUNT, WALL_TOUCH_TOLERANCE};
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_goal_positions() {
        let mut rng = rng();
        assert_eq!(build(0, &mut rng).goal, Vec2::new(850.0, 850.0));
        assert_eq!(build(1, &mut rng).goal, Vec2::new(150.0, 850.0));
        assert_eq!(build(2, &mut rng).goal, Vec2::new(850.0, 150.0));
    }

    #[test]
    fn test_walls_within_world() {
        let mut rng = rng();
        for i in 0..LEVEL_COUNT {
            for wall in &build(i, &mut rng).walls {
                for p in [wall.a, wall.b] {
                    assert!(p.x >= 0.0 && p.x <= WORLD_SIZE, "level {i}: {p:?}");
                    assert!(p.y >= 0.0 && p.y <= WORLD_SIZE, "level {i}: {p:?}");
                }
            }
        }
    }

    #[test]
    fn test_spawn_is_clear() {
        // Spawning must not immediately count as a wall touch
        let mut rng = rng();
        for i in 0..LEVEL_COUNT {
            let level = build(i, &mut rng);
            for wall in &level.walls {
                assert!(
                    !wall.touched_by(level.spawn, WALL_TOUCH_TOLERANCE),
                    "level {i}: spawn touches {wall:?}"
                );
            }
        }
    }

    #[test]
    fn test_scatter_is_deterministic() {
        let a = build(0, &mut Pcg32::seed_from_u64(7)).walls;
        let b = build(0, &mut Pcg32::seed_from_u64(7)).walls;
        assert_eq!(a, b);

        let c = build(0, &mut Pcg32::seed_from_u64(8)).walls;
        assert_ne!(a, c);
    }

    #[test]
    fn test_level_one_has_scatter() {
        // 11 fixed walls plus some scatter at p=0.15 over a 33x33 grid
        let walls = build(0, &mut rng()).walls;
        assert!(walls.len() > 11);
    }
}
