//! Data-driven game balance
//!
//! Every physics and progression constant lives here so balance can be
//! tweaked from JSON without touching the simulation. All per-step values
//! assume one step per `SIM_DT`.

use serde::{Deserialize, Serialize};

/// Tunable constants for the mini-game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Projectile ===
    /// Downward acceleration added to vy every step
    pub gravity: f32,
    /// Per-step velocity decay in free flight
    pub friction: f32,
    /// Damping applied when a ball bounces off a wall or the rim
    pub bounce: f32,
    pub ball_radius: f32,

    // === Session ===
    pub max_lives: u8,
    /// Launch point offset from the bottom edge (x is always centered)
    pub launch_offset_y: f32,
    /// Drag displacement to launch velocity scale
    pub aim_power: f32,
    /// Number of steps simulated for the trajectory preview
    pub trajectory_steps: usize,

    // === Hoop motion ===
    /// Starting position (percent of field width)
    pub hoop_start_x: f32,
    pub hoop_base_speed: f32,
    /// Extra target speed per point scored
    pub hoop_speed_per_point: f32,
    /// Fraction of the target speed blended in each step
    pub hoop_speed_smoothing: f32,
    /// Speed multiplier while in the slow-motion stage
    pub slow_motion_factor: f32,
    pub hoop_min_x: f32,
    pub hoop_max_x: f32,

    // === Hoop geometry ===
    /// Rim height as a fraction of field height
    pub rim_y_ratio: f32,
    /// Hoop width as a fraction of field width
    pub hoop_width_ratio: f32,
    /// Width multiplier once the big hoop stage is reached
    pub big_hoop_factor: f32,
    /// Net depth as a fraction of hoop width
    pub net_depth_ratio: f32,

    // === Rim collision ===
    /// Vertical distance from the rim plane that counts as crossing it
    pub rim_tolerance: f32,
    /// Inset of the scoring window from each rim edge
    pub rim_inset: f32,
    /// Horizontal band around each rim edge that deflects the ball
    pub rim_edge_band: f32,
    /// Minimum horizontal speed after a rim bounce
    pub rim_min_push: f32,
    /// Ball is re-seated this far above the rim after a bounce
    pub rim_reseat: f32,
    /// vy multiplier when the ball drops into the net
    pub catch_damping: f32,

    // === Net funnel ===
    pub net_pull: f32,
    pub net_damping_x: f32,
    pub net_damping_y: f32,

    // === Scoring & progression ===
    /// Score needed for stages 1, 2 and 3
    pub stage_thresholds: [u64; 3],
    /// Ticks a stage notification stays visible
    pub notification_ticks: u32,

    // === Particles ===
    /// Particle gravity as a fraction of ball gravity
    pub particle_gravity_factor: f32,
    /// Burst velocity per axis is sampled from [-spread/2, spread/2)
    pub particle_spread: f32,
    pub particle_life_step: f32,
    pub confetti_count: usize,
    pub splat_count: usize,
    /// Splat is spawned this far above the floor
    pub splat_lift: f32,
    /// Chance per ball per step of emitting a fire trail particle
    pub fire_chance: f32,
    pub fire_life: f32,
    pub fire_spread: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            friction: 0.99,
            bounce: 0.7,
            ball_radius: 15.0,

            max_lives: 5,
            launch_offset_y: 50.0,
            aim_power: 0.18,
            trajectory_steps: 30,

            hoop_start_x: 50.0,
            hoop_base_speed: 0.5,
            hoop_speed_per_point: 0.08,
            hoop_speed_smoothing: 0.01,
            slow_motion_factor: 0.5,
            hoop_min_x: 10.0,
            hoop_max_x: 90.0,

            rim_y_ratio: 0.2,
            hoop_width_ratio: 0.25,
            big_hoop_factor: 1.2,
            net_depth_ratio: 0.8,

            rim_tolerance: 15.0,
            rim_inset: 5.0,
            rim_edge_band: 15.0,
            rim_min_push: 3.0,
            rim_reseat: 16.0,
            catch_damping: 0.5,

            net_pull: 0.1,
            net_damping_x: 0.6,
            net_damping_y: 0.9,

            stage_thresholds: [5, 10, 20],
            notification_ticks: 180,

            particle_gravity_factor: 0.5,
            particle_spread: 10.0,
            particle_life_step: 0.02,
            confetti_count: 20,
            splat_count: 10,
            splat_lift: 10.0,
            fire_chance: 0.5,
            fire_life: 0.5,
            fire_spread: 2.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Gravity applied to particles
    #[inline]
    pub fn particle_gravity(&self) -> f32 {
        self.gravity * self.particle_gravity_factor
    }
}
