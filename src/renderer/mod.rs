//! WebGPU rendering module
//!
//! A single colored-triangle pipeline; the whole scene is rebuilt as a
//! vertex list every frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GameState, RayHit};
use shapes::{circle, line_quad};
use vertex::colors;

/// Build the full scene vertex list for one frame.
///
/// Draw order is back to front: glow (High quality), walls, rays, goal,
/// particle.
pub fn build_scene(state: &GameState, ray_hits: &[Option<RayHit>], glow: bool) -> Vec<Vertex> {
    // Rough capacity: 6 verts per ray quad and wall quad, plus two fans
    let mut vertices = Vec::with_capacity((ray_hits.len() + state.walls.len() * 2) * 6 + 96);

    // Soft glow pass: wide translucent quads beneath the walls
    if glow {
        for wall in &state.walls {
            line_quad(
                &mut vertices,
                wall.a,
                wall.b,
                WALL_GLOW_HALF_WIDTH,
                colors::WALL_GLOW,
            );
        }
    }

    // Walls
    for wall in &state.walls {
        line_quad(&mut vertices, wall.a, wall.b, WALL_HALF_WIDTH, colors::WALL);
    }

    // Light rays from the particle, drawn over the walls
    for (i, hit) in ray_hits.iter().enumerate() {
        let end = match hit {
            Some(hit) => hit.point,
            None => {
                // Escaped ray: draw at the fallback length
                let theta = i as f32 / ray_hits.len() as f32 * std::f32::consts::TAU;
                state.particle + crate::angle_to_dir(theta) * RAY_FALLBACK_LEN
            }
        };
        line_quad(&mut vertices, state.particle, end, RAY_HALF_WIDTH, colors::RAY);
    }

    // Goal disc
    circle(&mut vertices, state.goal, GOAL_DRAW_RADIUS, colors::GOAL, 32);

    // Particle
    circle(
        &mut vertices,
        state.particle,
        PARTICLE_RADIUS,
        colors::PARTICLE,
        16,
    );

    vertices
}

/// Map a world position to normalized device coordinates, letterboxing the
/// square world into the viewport. World y grows downward, NDC y upward.
pub fn world_to_ndc(p: Vec2, viewport: (u32, u32)) -> (f32, f32) {
    let (w, h) = viewport;
    let aspect = w as f32 / h as f32;
    let scale = 2.0 / WORLD_SIZE;

    let x = p.x * scale - 1.0;
    let y = 1.0 - p.y * scale;

    if aspect > 1.0 {
        (x / aspect, y)
    } else {
        (x, y * aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_ndc_square_viewport() {
        let vp = (800, 800);
        assert_eq!(world_to_ndc(Vec2::new(0.0, 0.0), vp), (-1.0, 1.0));
        assert_eq!(world_to_ndc(Vec2::new(1000.0, 1000.0), vp), (1.0, -1.0));
        assert_eq!(world_to_ndc(Vec2::new(500.0, 500.0), vp), (0.0, 0.0));
    }

    #[test]
    fn test_world_to_ndc_letterbox() {
        // Wide viewport squeezes x
        let (x, _) = world_to_ndc(Vec2::new(1000.0, 500.0), (1600, 800));
        assert!((x - 0.5).abs() < 0.001);
        // Tall viewport squeezes y
        let (_, y) = world_to_ndc(Vec2::new(500.0, 0.0), (800, 1600));
        assert!((y - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_build_scene_vertex_count() {
        let state = GameState::new(1);
        let hits = vec![None; 8];
        let vertices = build_scene(&state, &hits, false);

        // 6 verts per ray and wall quad, 32-segment goal fan, 16-segment
        // particle fan
        let expected = 8 * 6 + state.walls.len() * 6 + 32 * 3 + 16 * 3;
        assert_eq!(vertices.len(), expected);
    }

    #[test]
    fn test_build_scene_glow_adds_wall_quads() {
        let state = GameState::new(1);
        let hits = vec![None; 8];

        let plain = build_scene(&state, &hits, false);
        let glowing = build_scene(&state, &hits, true);
        assert_eq!(glowing.len(), plain.len() + state.walls.len() * 6);
        assert_eq!(glowing[0].color, vertex::colors::WALL_GLOW);
    }

    #[test]
    fn test_build_scene_draws_walls_before_rays() {
        let state = GameState::new(1);
        let hits = vec![None; 4];
        let vertices = build_scene(&state, &hits, false);

        assert_eq!(vertices[0].color, vertex::colors::WALL);
        let rays_start = state.walls.len() * 6;
        assert_eq!(vertices[rays_start].color, vertex::colors::RAY);
    }
}
