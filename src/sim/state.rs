//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`]. Rendering only
//! ever sees a [`Snapshot`](super::Snapshot) built from it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Side;
use super::hoop::Hoop;
use super::progression::Stage;
use crate::tuning::Tuning;

/// Play field size in pixels (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Where every shot starts: centered, a fixed distance above the floor
    pub fn launch_point(&self, tuning: &Tuning) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - tuning.launch_offset_y)
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(512.0, 800.0)
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Cleared once the ball scores or misses; removed at the end of the tick
    pub active: bool,
    /// Caught by the net; never reverts
    pub in_hoop: bool,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            active: true,
            in_hoop: false,
        }
    }

    /// Drop into the net (one-way)
    pub fn capture(&mut self, catch_damping: f32) {
        self.in_hoop = true;
        self.vel.y *= catch_damping;
    }

    /// Integrate position by the current velocity
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }
}

/// Particle palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    /// Score celebration
    Confetti,
    /// Floor impact
    Splat,
    /// Fireball trail
    Fire,
}

impl ParticleColor {
    pub fn hex(&self) -> &'static str {
        match self {
            ParticleColor::Confetti => "#00f5ff",
            ParticleColor::Splat => "#ff006e",
            ParticleColor::Fire => "#ff4d00",
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 on spawn, dead at <= 0
    pub life: f32,
    pub color: ParticleColor,
}

/// One-shot banner shown when a new stage is reached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub text: &'static str,
    pub color: &'static str,
    /// Ticks left before it disappears
    pub ticks_left: u32,
}

/// Discrete things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    Launched { id: u32 },
    Captured { id: u32 },
    RimBounce { id: u32, pos: Vec2, side: Side },
    Scored { id: u32, points: u64, pos: Vec2 },
    Missed { id: u32, pos: Vec2 },
    StageReached { stage: Stage },
    NewHighScore { score: u64 },
    GameOver { score: u64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub field: Field,
    pub score: u64,
    /// Best score ever seen, seeded from storage; never decreases
    pub high_score: u64,
    pub lives: u8,
    pub max_lives: u8,
    pub game_over: bool,
    pub stage: Stage,
    pub notification: Option<Notification>,
    pub hoop: Hoop,
    /// Dense ball list; inactive entries are compacted at the end of each tick
    pub balls: Vec<Ball>,
    pub particles: Vec<Particle>,
    /// Upper bound on live particles (0 disables effects)
    pub max_particles: usize,
    /// Emit the fireball trail in the top stage
    pub fire_trail: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Decorative randomness only (particle bursts, fire trail)
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session state
    pub fn new(field: Field, tuning: &Tuning, high_score: u64, seed: u64) -> Self {
        Self {
            field,
            score: 0,
            high_score,
            lives: tuning.max_lives,
            max_lives: tuning.max_lives,
            game_over: false,
            stage: Stage::Normal,
            notification: None,
            hoop: Hoop::new(tuning),
            balls: Vec::new(),
            particles: Vec::new(),
            max_particles: MAX_PARTICLES,
            fire_trail: true,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Spawn an active ball at the launch point
    pub fn spawn_ball(&mut self, vel: Vec2, tuning: &Tuning) -> u32 {
        let id = self.next_entity_id();
        let pos = self.field.launch_point(tuning);
        self.balls.push(Ball::new(id, pos, vel, tuning.ball_radius));
        id
    }

    /// Number of balls still in play
    pub fn active_balls(&self) -> usize {
        self.balls.iter().filter(|b| b.active).count()
    }

    /// Raise the high score to the current score if it beats it.
    /// Returns true when a new best was set.
    pub fn record_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Back to a fresh run. Keeps the high score, field and preferences.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.lives = tuning.max_lives;
        self.max_lives = tuning.max_lives;
        self.game_over = false;
        self.stage = Stage::Normal;
        self.notification = None;
        self.hoop = Hoop::new(tuning);
        self.balls.clear();
        self.particles.clear();
    }

    /// Drop everything in flight (balls and particles)
    pub fn discard_in_flight(&mut self) {
        self.balls.clear();
        self.particles.clear();
        if self.lives == 0 {
            self.game_over = true;
        }
    }
}

/// Default cap on live particles
pub const MAX_PARTICLES: usize = 500;
