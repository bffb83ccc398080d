//! Read-only render state
//!
//! Built once at the end of every tick. The presentation layer draws from
//! this and never touches [`GameState`] directly.

use glam::Vec2;
use serde::Serialize;

use super::aim::Aim;
use super::hoop::HoopGeometry;
use super::state::{GameState, Notification};
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub in_hoop: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub id: u32,
    pub pos: Vec2,
    pub life: f32,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoopView {
    /// Center as a percentage of field width
    pub x_percent: f32,
    pub geometry: HoopGeometry,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub width: f32,
    pub height: f32,
    pub balls: Vec<BallView>,
    pub particles: Vec<ParticleView>,
    pub hoop: HoopView,
    pub launch_point: Vec2,
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    pub max_lives: u8,
    pub stage: u8,
    pub notification: Option<Notification>,
    pub aim: Option<Aim>,
    pub game_over: bool,
    /// Show the "drag to aim" hint
    pub show_hint: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState, aim: Option<&Aim>, tuning: &Tuning) -> Self {
        let geometry = state.hoop.geometry(state.field, state.stage, tuning);
        let aim = if state.game_over { None } else { aim.cloned() };
        let balls: Vec<BallView> = state
            .balls
            .iter()
            .filter(|b| b.active)
            .map(|b| BallView {
                id: b.id,
                pos: b.pos,
                radius: b.radius,
                in_hoop: b.in_hoop,
            })
            .collect();
        let show_hint = aim.is_none() && balls.is_empty() && state.score == 0 && !state.game_over;

        Self {
            tick: state.time_ticks,
            width: state.field.width,
            height: state.field.height,
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    id: p.id,
                    pos: p.pos,
                    life: p.life,
                    color: p.color.hex(),
                })
                .collect(),
            balls,
            hoop: HoopView {
                x_percent: state.hoop.x,
                geometry,
            },
            launch_point: state.field.launch_point(tuning),
            score: state.score,
            high_score: state.high_score,
            lives: state.lives,
            max_lives: state.max_lives,
            stage: state.stage.index(),
            notification: state.notification.clone(),
            aim,
            game_over: state.game_over,
            show_hint,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Field;

    #[test]
    fn test_fresh_state_shows_hint() {
        let tuning = Tuning::default();
        let state = GameState::new(Field::default(), &tuning, 3, 1);
        let snap = Snapshot::capture(&state, None, &tuning);
        assert!(snap.show_hint);
        assert_eq!(snap.high_score, 3);
        assert_eq!(snap.lives, tuning.max_lives);
        assert_eq!(snap.stage, 0);
    }

    #[test]
    fn test_inactive_balls_are_hidden() {
        let tuning = Tuning::default();
        let mut state = GameState::new(Field::default(), &tuning, 0, 1);
        state.spawn_ball(Vec2::ZERO, &tuning);
        state.spawn_ball(Vec2::ZERO, &tuning);
        state.balls[0].active = false;
        let snap = Snapshot::capture(&state, None, &tuning);
        assert_eq!(snap.balls.len(), 1);
        assert!(!snap.show_hint);
    }

    #[test]
    fn test_snapshot_serializes() {
        let tuning = Tuning::default();
        let state = GameState::new(Field::default(), &tuning, 0, 1);
        let json = Snapshot::capture(&state, None, &tuning).to_json().unwrap();
        assert!(json.contains("\"score\":0"));
        assert!(json.contains("\"hoop\""));
    }
}
