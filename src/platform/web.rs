//! Browser entry point
//!
//! The host page owns the overlay and the animation frame callback; it
//! forwards pointer events in play-field coordinates and draws from the
//! JSON snapshot.

use wasm_bindgen::prelude::*;

use super::storage::LocalStore;
use crate::session::{Session, SessionPhase};
use crate::sim::Field;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Jelly Hoops loaded");
}

/// Mini-game handle for JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStore>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a closed game for a field of the given size.
    /// `tuning_json` may override any balance constant.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, tuning_json: Option<String>) -> WebGame {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Bad tuning JSON, using defaults: {}", e);
                Tuning::default()
            }),
            None => Tuning::default(),
        };
        let seed = js_sys::Date::now() as u64;
        WebGame {
            session: Session::new(LocalStore, tuning, Field::new(width, height), seed),
        }
    }

    pub fn open(&mut self) {
        self.session.open();
    }

    pub fn close(&mut self) {
        self.session.close();
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.session.pointer_down(x, y)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.session.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.session.pointer_up(x, y);
    }

    pub fn pointer_cancel(&mut self) {
        self.session.pointer_cancel();
    }

    /// Set the quality preset by name. Returns false for unknown names.
    pub fn set_quality(&mut self, name: &str) -> bool {
        self.session.set_quality(name)
    }

    pub fn quality(&self) -> String {
        self.session.settings().quality.as_str().to_string()
    }

    /// Advance by the frame's elapsed seconds. Returns the events as JSON.
    pub fn frame(&mut self, dt_secs: f32) -> String {
        let events = self.session.frame(dt_secs);
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("Event serialization failed: {}", e);
            "[]".to_string()
        })
    }

    /// Whether the host should keep requesting animation frames
    pub fn is_running(&self) -> bool {
        self.session.phase() == SessionPhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.session.phase() == SessionPhase::GameOver
    }

    pub fn high_score(&self) -> f64 {
        self.session.high_score() as f64
    }

    /// Latest render state as JSON
    pub fn snapshot_json(&self) -> String {
        self.session.snapshot().to_json().unwrap_or_else(|e| {
            log::warn!("Snapshot serialization failed: {}", e);
            "{}".to_string()
        })
    }
}
