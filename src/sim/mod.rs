//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (entity list order)
//! - No rendering or platform dependencies

pub mod aim;
pub mod collision;
pub mod hoop;
pub mod particles;
pub mod physics;
pub mod progression;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use aim::{Aim, AimController, launch_velocity, predict_trajectory};
pub use collision::{RimContact, Side, rim_contact};
pub use hoop::{Hoop, HoopGeometry};
pub use physics::{BallOutcome, step_ball};
pub use progression::Stage;
pub use snapshot::Snapshot;
pub use state::{Ball, Field, GameEvent, GameState, Notification, Particle, ParticleColor};
pub use tick::{TickInput, tick};
