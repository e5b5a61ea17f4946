//! Game state and core simulation types

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::levels;
use super::segment::Segment;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// "Click to Start!" screen
    Start,
    /// Active gameplay, particle follows the pointer
    Playing,
    /// Game is paused (Escape, tab hidden, window blur)
    Paused,
    /// All three levels cleared; click restarts
    Won,
}

/// RNG state wrapper: a run seed plus a stream counter, so every level
/// rebuild gets a fresh but reproducible generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Next generator in the run's stream sequence
    pub fn next_rng(&mut self) -> Pcg32 {
        self.stream += 1;
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// Current level index (0-based)
    pub level_index: u32,
    /// Current phase
    pub phase: GamePhase,
    /// Ticks since the run started (run timer)
    pub time_ticks: u64,
    /// Wall touches this session
    pub resets: u32,
    /// Mouse-tracked ray origin
    pub particle: Vec2,
    /// Walls of the current level
    pub walls: Vec<Segment>,
    /// Goal of the current level
    pub goal: Vec2,
}

impl GameState {
    /// Create a new game state with the given seed, on level 1
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            level_index: 0,
            phase: GamePhase::Start,
            time_ticks: 0,
            resets: 0,
            particle: SPAWN,
            walls: Vec::new(),
            goal: SPAWN,
        };
        state.load_level(0);
        state
    }

    /// Rebuild walls and goal for a level and recenter the particle
    pub fn load_level(&mut self, index: u32) {
        debug_assert!(index < LEVEL_COUNT);
        let mut rng = self.rng_state.next_rng();
        let level = levels::build(index, &mut rng);
        self.level_index = index;
        self.walls = level.walls;
        self.goal = level.goal;
        self.particle = level.spawn;
    }

    /// Full reset after a wall touch: back to level 1 and the start screen
    pub fn reset_run(&mut self) {
        self.resets += 1;
        self.time_ticks = 0;
        self.phase = GamePhase::Start;
        self.load_level(0);
    }

    /// Run timer in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    /// Whether the particle currently touches any wall
    pub fn touches_wall(&self) -> bool {
        self.walls
            .iter()
            .any(|w| w.touched_by(self.particle, WALL_TOUCH_TOLERANCE))
    }

    /// Whether the particle is within goal capture range
    pub fn at_goal(&self) -> bool {
        self.particle.distance(self.goal) < GOAL_RADIUS
    }
}
