//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod levels;
pub mod raycast;
pub mod segment;
pub mod state;
pub mod tick;

pub use levels::Level;
pub use raycast::{Ray, RayHit, closest_hit, sweep};
pub use segment::Segment;
pub use state::{GamePhase, GameState};
pub use tick::{TickEvent, TickInput, tick};
