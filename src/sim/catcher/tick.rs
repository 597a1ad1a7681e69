//! Fixed timestep Shape Catcher tick

use super::state::CatcherState;
use crate::consts::*;
use crate::sim::GamePhase;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer-style target for the catcher center (takes precedence)
    pub target_x: Option<f32>,
    /// Keyboard-style movement axis in [-1, 1]
    pub axis: f32,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - built-in pilot chases the lowest shape
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut CatcherState, input: &TickInput, dt: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Resolve the movement target
    let target_x = if input.autopilot {
        // Chase the shape closest to the floor
        state
            .shapes
            .iter()
            .max_by(|a, b| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|s| s.pos.x)
            .or(Some(state.arena.x / 2.0))
    } else {
        input.target_x
    };

    // Move the catcher: toward the target when one is given, otherwise by
    // the held axis; clamped to the arena either way.
    let max_step = CATCHER_SPEED * dt;
    if let Some(target) = target_x {
        let delta = (target - state.catcher_x).clamp(-max_step, max_step);
        state.catcher_x += delta;
    } else {
        state.catcher_x += input.axis.clamp(-1.0, 1.0) * max_step;
    }
    let half = CATCHER_WIDTH / 2.0;
    state.catcher_x = state.catcher_x.clamp(half, state.arena.x - half);

    // Drop a new shape on the spawn timer
    if state.spawn_timer == 0 {
        state.spawn_shape();
        state.spawn_timer = state.spawn_interval_ticks();
    } else {
        state.spawn_timer -= 1;
    }

    // Advance shapes
    let drop_speed = state.drop_speed();
    for shape in state.shapes.iter_mut() {
        shape.pos.y += drop_speed * dt;
    }

    // Misses first: a shape whose box clears the bottom edge costs a life
    let arena_floor = state.arena.y;
    let mut missed = 0;
    state.shapes.retain(|s| {
        let out = s.bounds().max().y > arena_floor;
        if out {
            missed += 1;
        }
        !out
    });
    for _ in 0..missed {
        state.lives = state.lives.saturating_sub(1);
    }
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        return;
    }

    // Catches: score the shape and quicken the spawn cadence
    let catcher = state.catcher_bounds();
    let mut caught_points = 0;
    let mut caught = 0;
    state.shapes.retain(|s| {
        let hit = s.bounds().overlaps(&catcher);
        if hit {
            caught_points += s.kind.points();
            caught += 1;
        }
        !hit
    });
    state.score += caught_points;
    for _ in 0..caught {
        state.spawn_interval_ms *= DIFFICULTY_FACTOR;
    }
}
