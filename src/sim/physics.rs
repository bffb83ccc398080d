//! Ball physics
//!
//! One step of ball motion. Free balls fly under gravity and friction and
//! collide with the walls, floor and rim. Balls caught by the net are
//! funnelled toward the hoop center until they drop out of the bottom.

use glam::Vec2;

use super::collision::{RimContact, Side, floor_collision, rim_bounce, rim_contact, wall_collision};
use super::hoop::HoopGeometry;
use super::state::{Ball, Field};
use crate::tuning::Tuning;

/// What happened to a ball during one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallOutcome {
    /// Still flying (or still in the net)
    InPlay,
    /// Dropped into the net this step
    Captured,
    /// Clipped the rim
    RimBounce { side: Side },
    /// Hit the floor; `impact` is where it landed
    Missed { impact: Vec2 },
    /// Fell out of the bottom of the net
    Scored,
}

/// Gravity then friction, shared by the ball step and trajectory preview
#[inline]
pub fn apply_forces(vel: &mut Vec2, tuning: &Tuning) {
    vel.y += tuning.gravity;
    *vel *= tuning.friction;
}

/// Advance one active ball by one step.
///
/// Inactive balls are left untouched. A ball that misses or scores is
/// deactivated here; the caller applies the scoring consequences.
pub fn step_ball(ball: &mut Ball, hoop: &HoopGeometry, field: Field, tuning: &Tuning) -> BallOutcome {
    if !ball.active {
        return BallOutcome::InPlay;
    }
    if ball.in_hoop {
        step_in_net(ball, hoop, tuning)
    } else {
        step_free(ball, hoop, field, tuning)
    }
}

fn step_free(ball: &mut Ball, hoop: &HoopGeometry, field: Field, tuning: &Tuning) -> BallOutcome {
    apply_forces(&mut ball.vel, tuning);
    wall_collision(ball, field.width, tuning.bounce);

    if floor_collision(ball, field.height) {
        ball.active = false;
        let impact = Vec2::new(ball.pos.x, field.height - tuning.splat_lift);
        return BallOutcome::Missed { impact };
    }

    let outcome = match rim_contact(ball.pos, ball.vel, hoop, tuning) {
        RimContact::Enter => {
            ball.capture(tuning.catch_damping);
            BallOutcome::Captured
        }
        RimContact::Edge { side } => {
            rim_bounce(ball, side, hoop, tuning);
            BallOutcome::RimBounce { side }
        }
        RimContact::None => BallOutcome::InPlay,
    };

    ball.integrate();
    outcome
}

fn step_in_net(ball: &mut Ball, hoop: &HoopGeometry, tuning: &Tuning) -> BallOutcome {
    // Gravity keeps acting in the net; the damping alone would stall the ball
    ball.vel.y += tuning.gravity;
    ball.vel.x += (hoop.center_x - ball.pos.x) * tuning.net_pull;
    ball.vel.x *= tuning.net_damping_x;
    ball.vel.y *= tuning.net_damping_y;

    if ball.pos.y > hoop.net_bottom {
        ball.active = false;
        return BallOutcome::Scored;
    }

    ball.integrate();
    BallOutcome::InPlay
}
