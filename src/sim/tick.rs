//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by one step. Order within a
//! tick is fixed: launches, hoop, balls (physics then scoring), particles,
//! then the game over check.

use glam::Vec2;

use super::particles::{spawn_fire, update_particles};
use super::physics::step_ball;
use super::progression::expire_notification;
use super::scoring::resolve;
use super::state::{GameEvent, GameState};
use crate::tuning::Tuning;

/// Input gathered between ticks
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Launch velocities from released drags, oldest first
    pub launches: Vec<Vec2>,
}

impl TickInput {
    pub fn clear(&mut self) {
        self.launches.clear();
    }
}

/// Advance the game state by one step, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.game_over {
        return events;
    }

    state.time_ticks += 1;
    expire_notification(state);

    // Gestures are gated when they start; a released drag always fires
    for &vel in &input.launches {
        let id = state.spawn_ball(vel, tuning);
        log::debug!("Launched ball {} with velocity {:?}", id, vel);
        events.push(GameEvent::Launched { id });
    }

    state.hoop.advance(state.score, state.stage, tuning);
    let hoop = state.hoop.geometry(state.field, state.stage, tuning);
    let field = state.field;

    for i in 0..state.balls.len() {
        if !state.balls[i].active {
            continue;
        }

        if state.fire_trail && state.stage.is_fireball() {
            let pos = state.balls[i].pos;
            spawn_fire(state, pos, tuning);
        }

        let ball = &mut state.balls[i];
        let outcome = step_ball(ball, &hoop, field, tuning);
        let (id, pos) = (ball.id, ball.pos);
        resolve(state, id, pos, outcome, tuning, &mut events);
    }

    // Single compaction pass
    state.balls.retain(|b| b.active);

    update_particles(&mut state.particles, tuning);

    if state.lives == 0 && state.balls.is_empty() {
        state.game_over = true;
        log::info!("Game over with score {}", state.score);
        events.push(GameEvent::GameOver { score: state.score });
    }

    events
}
