//! Jelly Hoops - drag-to-shoot basketball mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, hoop, scoring, stages)
//! - `session`: Frame loop, gestures, open/close and reset
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod clock;
pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use session::{Session, SessionPhase};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep. Every per-step constant in `Tuning`
    /// was balanced for 60 steps per second.
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest host frame that is simulated (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;
}
