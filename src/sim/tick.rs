//! Fixed timestep simulation tick
//!
//! The game has no physics: the particle teleports to the pointer each tick,
//! then the tick checks wall touches and goal capture. Wall touch is checked
//! first, so touching a wall next to the goal still resets the run.

use glam::Vec2;

use super::state::{GamePhase, GameState};
use crate::consts::LEVEL_COUNT;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer position in world units, if the cursor has entered the canvas
    pub pointer: Option<Vec2>,
    /// Click/tap (one-shot)
    pub click: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

/// Noteworthy state transition produced by a tick, for sound and HUD hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Run started from the start screen
    Started,
    /// Goal reached, advanced to the next level
    LevelCleared,
    /// Wall touched, run reset to level 1
    WallTouched,
    /// Final level cleared
    Won,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> Option<TickEvent> {
    match state.phase {
        GamePhase::Start => {
            if input.click {
                state.phase = GamePhase::Playing;
                state.time_ticks = 0;
                return Some(TickEvent::Started);
            }
            None
        }

        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
            }
            None
        }

        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                return None;
            }

            state.time_ticks += 1;

            if let Some(pointer) = input.pointer {
                state.particle = pointer;
            }

            if state.touches_wall() {
                state.reset_run();
                return Some(TickEvent::WallTouched);
            }

            if state.at_goal() {
                let next = state.level_index + 1;
                if next >= LEVEL_COUNT {
                    state.phase = GamePhase::Won;
                    return Some(TickEvent::Won);
                }
                state.load_level(next);
                return Some(TickEvent::LevelCleared);
            }

            None
        }

        GamePhase::Won => {
            if input.click {
                // Fresh run, back to the start screen
                state.resets = 0;
                state.time_ticks = 0;
                state.phase = GamePhase::Start;
                state.load_level(0);
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPAWN;

    fn click() -> TickInput {
        TickInput {
            click: true,
            ..Default::default()
        }
    }

    fn pointer(p: Vec2) -> TickInput {
        TickInput {
            pointer: Some(p),
            ..Default::default()
        }
    }

    fn start_playing(state: &mut GameState) {
        assert_eq!(tick(state, &click()), Some(TickEvent::Started));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_click_starts_run() {
        let mut state = GameState::new(1);
        assert_eq!(tick(&mut state, &TickInput::default()), None);
        assert_eq!(state.phase, GamePhase::Start);
        start_playing(&mut state);
    }

    #[test]
    fn test_particle_follows_pointer() {
        let mut state = GameState::new(1);
        start_playing(&mut state);

        let target = Vec2::new(520.0, 480.0);
        tick(&mut state, &pointer(target));
        assert_eq!(state.particle, target);

        // No pointer: particle stays put
        tick(&mut state, &TickInput::default());
        assert_eq!(state.particle, target);
    }

    #[test]
    fn test_wall_touch_resets_run() {
        let mut state = GameState::new(1);
        start_playing(&mut state);

        // Drive the particle straight onto a fixed level-1 wall
        let on_wall = Vec2::new(500.0, 300.0);
        let event = tick(&mut state, &pointer(on_wall));
        assert_eq!(event, Some(TickEvent::WallTouched));
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.resets, 1);
        assert_eq!(state.particle, SPAWN);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_goal_advances_level() {
        let mut state = GameState::new(1);
        start_playing(&mut state);

        let goal = state.goal;
        let event = tick(&mut state, &pointer(goal));
        assert_eq!(event, Some(TickEvent::LevelCleared));
        assert_eq!(state.level_index, 1);
        assert_eq!(state.particle, SPAWN);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_win_after_three_levels() {
        let mut state = GameState::new(1);
        start_playing(&mut state);

        for expected in [
            Some(TickEvent::LevelCleared),
            Some(TickEvent::LevelCleared),
            Some(TickEvent::Won),
        ] {
            let goal = state.goal;
            assert_eq!(tick(&mut state, &pointer(goal)), expected);
        }
        assert_eq!(state.phase, GamePhase::Won);

        // Click on the win screen starts a fresh run
        tick(&mut state, &click());
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_pause_toggles_and_freezes() {
        let mut state = GameState::new(1);
        start_playing(&mut state);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        // Frozen: pointer has no effect while paused
        let ticks = state.time_ticks;
        tick(&mut state, &pointer(Vec2::new(900.0, 900.0)));
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.particle, SPAWN);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_timer_counts_only_while_playing() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 0);

        start_playing(&mut state);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.time_ticks, 10);
    }
}
