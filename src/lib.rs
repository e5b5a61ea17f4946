//! Ray Maze - a raycast-light maze game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, raycasting, levels, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Quality presets and preferences
//! - `besttimes`: Fastest-run leaderboard
//! - `audio`: Procedural sound effects

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod besttimes;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use besttimes::BestTimes;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical world is a square of this many units; levels are authored in it
    pub const WORLD_SIZE: f32 = 1000.0;
    /// Particle spawn point (world center)
    pub const SPAWN: Vec2 = Vec2::new(500.0, 500.0);

    /// Number of levels in a run
    pub const LEVEL_COUNT: u32 = 3;

    /// Goal capture distance (particle center to goal center)
    pub const GOAL_RADIUS: f32 = 40.0;
    /// Drawn goal disc radius
    pub const GOAL_DRAW_RADIUS: f32 = 20.0;

    /// Wall touch tolerance for the collinearity test
    pub const WALL_TOUCH_TOLERANCE: f32 = 5.0;

    /// Default visibility ray count (one per degree)
    pub const DEFAULT_RAY_COUNT: u32 = 360;
    /// Length rays are drawn at when they escape all walls
    pub const RAY_FALLBACK_LEN: f32 = 150.0;

    /// Drawn particle radius
    pub const PARTICLE_RADIUS: f32 = 3.0;
    /// Drawn wall half-thickness
    pub const WALL_HALF_WIDTH: f32 = 1.5;
    /// Half-thickness of the wall glow pass
    pub const WALL_GLOW_HALF_WIDTH: f32 = 5.0;
    /// Drawn ray half-thickness
    pub const RAY_HALF_WIDTH: f32 = 0.75;
}

/// Unit direction vector for an angle in radians
#[inline]
pub fn angle_to_dir(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
