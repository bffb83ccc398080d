//! Scoring and lives
//!
//! Turns ball outcomes into points, lives, particle bursts and events.
//! Scoring a basket is the only way to win a life back.

use glam::Vec2;

use super::particles::spawn_burst;
use super::physics::BallOutcome;
use super::progression::advance_stage;
use super::state::{GameEvent, GameState, ParticleColor};
use crate::tuning::Tuning;

/// Apply the consequences of one ball step
pub fn resolve(
    state: &mut GameState,
    id: u32,
    pos: Vec2,
    outcome: BallOutcome,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    match outcome {
        BallOutcome::InPlay => {}
        BallOutcome::Captured => {
            log::debug!("Ball {} caught by the net", id);
            events.push(GameEvent::Captured { id });
        }
        BallOutcome::RimBounce { side } => {
            log::debug!("Ball {} bounced off the {:?} rim", id, side);
            events.push(GameEvent::RimBounce { id, pos, side });
        }
        BallOutcome::Missed { impact } => {
            register_miss(state);
            spawn_burst(state, impact, tuning.splat_count, ParticleColor::Splat, tuning);
            log::debug!("Ball {} missed, {} lives left", id, state.lives);
            events.push(GameEvent::Missed { id, pos: impact });
        }
        BallOutcome::Scored => {
            let points = register_score(state, tuning, events);
            spawn_burst(state, pos, tuning.confetti_count, ParticleColor::Confetti, tuning);
            log::debug!("Ball {} scored {} (total {})", id, points, state.score);
            events.push(GameEvent::Scored { id, points, pos });
        }
    }
}

/// Lose a life, never going below zero
pub fn register_miss(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
}

/// Award a basket: points for the current stage, one life back (capped),
/// then high score and stage bookkeeping. Returns the points awarded.
pub fn register_score(state: &mut GameState, tuning: &Tuning, events: &mut Vec<GameEvent>) -> u64 {
    let points = state.stage.points_per_basket();
    state.score += points;
    state.lives = state.lives.saturating_add(1).min(state.max_lives);

    if state.record_high_score() {
        events.push(GameEvent::NewHighScore {
            score: state.high_score,
        });
    }
    if let Some(stage) = advance_stage(state, &tuning.stage_thresholds, tuning.notification_ticks) {
        events.push(GameEvent::StageReached { stage });
    }
    points
}
