//! Hoop motion and geometry
//!
//! The hoop slides left and right across the top of the field. Its speed
//! eases toward a target that grows with the score; its size is derived
//! from the field and the current stage, never stored.

use serde::{Deserialize, Serialize};

use super::progression::Stage;
use super::state::Field;
use crate::tuning::Tuning;

/// Moving hoop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hoop {
    /// Center position as a percentage of field width (0-100)
    pub x: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    /// Current speed in percent per step
    pub speed: f32,
}

impl Hoop {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.hoop_start_x,
            direction: 1.0,
            speed: tuning.hoop_base_speed,
        }
    }

    /// Speed the hoop is easing toward
    pub fn target_speed(score: u64, stage: Stage, tuning: &Tuning) -> f32 {
        let multiplier = if stage.is_slow_motion() {
            tuning.slow_motion_factor
        } else {
            1.0
        };
        (tuning.hoop_base_speed + score as f32 * tuning.hoop_speed_per_point) * multiplier
    }

    /// Advance one step
    pub fn advance(&mut self, score: u64, stage: Stage, tuning: &Tuning) {
        let target = Self::target_speed(score, stage, tuning);
        let blend = tuning.hoop_speed_smoothing;
        self.speed = self.speed * (1.0 - blend) + target * blend;

        self.x += self.direction * self.speed;
        if self.x > tuning.hoop_max_x {
            self.direction = -1.0;
        } else if self.x < tuning.hoop_min_x {
            self.direction = 1.0;
        }
    }

    /// Pixel-space geometry for the current field and stage
    pub fn geometry(&self, field: Field, stage: Stage, tuning: &Tuning) -> HoopGeometry {
        let mut width = field.width * tuning.hoop_width_ratio;
        if stage.has_big_hoop() {
            width *= tuning.big_hoop_factor;
        }
        let center_x = self.x / 100.0 * field.width;
        let rim_y = field.height * tuning.rim_y_ratio;
        HoopGeometry {
            center_x,
            rim_y,
            width,
            left: center_x - width / 2.0,
            right: center_x + width / 2.0,
            net_bottom: rim_y + width * tuning.net_depth_ratio,
        }
    }
}

/// Rim and net extents in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoopGeometry {
    pub center_x: f32,
    /// Vertical plane of the rim
    pub rim_y: f32,
    pub width: f32,
    /// Left rim edge
    pub left: f32,
    /// Right rim edge
    pub right: f32,
    /// Balls in the net score once they drop below this
    pub net_bottom: f32,
}
