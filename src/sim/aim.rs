//! Drag-to-aim input
//!
//! The player drags away from where they pressed; releasing fires a ball
//! from the launch point in the opposite direction, like pulling back a
//! slingshot. While dragging, the flight path is previewed by running the
//! same gravity and friction as the real ball.

use glam::Vec2;
use serde::Serialize;

use super::physics::apply_forces;
use super::state::Field;
use crate::tuning::Tuning;

/// An in-progress drag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aim {
    /// Where the drag started
    pub anchor: Vec2,
    /// Latest pointer position
    pub current: Vec2,
    /// Predicted path from the launch point
    pub trajectory: Vec<Vec2>,
}

/// Pointer gesture state machine
#[derive(Debug, Clone, Default)]
pub struct AimController {
    aim: Option<Aim>,
}

impl AimController {
    pub fn new() -> Self {
        Self { aim: None }
    }

    pub fn is_aiming(&self) -> bool {
        self.aim.is_some()
    }

    pub fn aim(&self) -> Option<&Aim> {
        self.aim.as_ref()
    }

    /// Begin a drag. Callers must not start one while the game is over or out
    /// of lives; see [`Session::pointer_down`](crate::session::Session::pointer_down).
    pub fn start(&mut self, point: Vec2) {
        self.aim = Some(Aim {
            anchor: point,
            current: point,
            trajectory: Vec::new(),
        });
    }

    /// Track the pointer and refresh the preview. Ignored when not aiming.
    pub fn update(&mut self, point: Vec2, field: Field, tuning: &Tuning, preview: bool) {
        if let Some(aim) = self.aim.as_mut() {
            aim.current = point;
            aim.trajectory = if preview {
                predict_trajectory(
                    field.launch_point(tuning),
                    launch_velocity(aim.anchor, aim.current, tuning.aim_power),
                    tuning,
                )
            } else {
                Vec::new()
            };
        }
    }

    /// Finish the drag, returning the launch velocity if one was in progress
    pub fn release(&mut self, tuning: &Tuning) -> Option<Vec2> {
        self.aim
            .take()
            .map(|aim| launch_velocity(aim.anchor, aim.current, tuning.aim_power))
    }

    /// Abandon the drag without firing
    pub fn cancel(&mut self) {
        self.aim = None;
    }
}

/// Velocity for a drag from `anchor` to `current`
#[inline]
pub fn launch_velocity(anchor: Vec2, current: Vec2, power: f32) -> Vec2 {
    (anchor - current) * power
}

/// Forward-simulate a free ball without collisions
pub fn predict_trajectory(start: Vec2, velocity: Vec2, tuning: &Tuning) -> Vec<Vec2> {
    let mut pos = start;
    let mut vel = velocity;
    (0..tuning.trajectory_steps)
        .map(|_| {
            apply_forces(&mut vel, tuning);
            pos += vel;
            pos
        })
        .collect()
}
