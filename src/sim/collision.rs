//! Ball vs rim collision
//!
//! The rim is a horizontal segment at `rim_y`. A ball crossing that plane
//! on its way down either drops through the scoring window, clips one of
//! the rim edges and bounces, or misses the hoop entirely.

use glam::Vec2;
use serde::Serialize;

use super::hoop::HoopGeometry;
use super::state::Ball;
use crate::tuning::Tuning;

/// Result of testing a falling ball against the rim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RimContact {
    /// Not near the rim plane, moving up, or clear of both edges
    None,
    /// Inside the scoring window
    Enter,
    /// Clipped the rim; carries which side of center the ball is on
    Edge { side: Side },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Horizontal push direction away from hoop center
    pub fn push_sign(&self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Check a not-yet-captured ball against the rim
pub fn rim_contact(pos: Vec2, vel: Vec2, hoop: &HoopGeometry, tuning: &Tuning) -> RimContact {
    if vel.y <= 0.0 || (pos.y - hoop.rim_y).abs() >= tuning.rim_tolerance {
        return RimContact::None;
    }

    if pos.x > hoop.left + tuning.rim_inset && pos.x < hoop.right - tuning.rim_inset {
        return RimContact::Enter;
    }

    let near_left = (pos.x - hoop.left).abs() < tuning.rim_edge_band;
    let near_right = (pos.x - hoop.right).abs() < tuning.rim_edge_band;
    if near_left || near_right {
        let side = if pos.x < hoop.center_x {
            Side::Left
        } else {
            Side::Right
        };
        return RimContact::Edge { side };
    }

    RimContact::None
}

/// Deflect a ball off the rim.
///
/// Vertical speed flips and is damped, horizontal speed points away from
/// center with at least `rim_min_push`, and the ball is lifted above the
/// rim so the same contact cannot fire again next step.
pub fn rim_bounce(ball: &mut Ball, side: Side, hoop: &HoopGeometry, tuning: &Tuning) {
    ball.vel.y *= -tuning.bounce;
    ball.vel.x = side.push_sign() * ball.vel.x.abs().max(tuning.rim_min_push);
    ball.pos.y = hoop.rim_y - tuning.rim_reseat;
}

/// Clamp to the side walls, reflecting horizontal speed with damping.
///
/// Returns true if a wall was hit.
pub fn wall_collision(ball: &mut Ball, field_width: f32, bounce: f32) -> bool {
    if ball.pos.x < ball.radius {
        ball.pos.x = ball.radius;
        ball.vel.x *= -bounce;
        true
    } else if ball.pos.x > field_width - ball.radius {
        ball.pos.x = field_width - ball.radius;
        ball.vel.x *= -bounce;
        true
    } else {
        false
    }
}

/// Ball has dropped past the floor
#[inline]
pub fn floor_collision(ball: &Ball, field_height: f32) -> bool {
    ball.pos.y > field_height - ball.radius
}
