//! Fixed timestep accumulator
//!
//! Converts variable host frame times into whole simulation steps so the
//! per-step tuning constants behave the same at any display refresh rate.

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { accumulator: 0.0 }
    }

    /// Add elapsed frame time (seconds). Returns the number of steps to run.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        // Long stalls (background tab) are dropped rather than replayed
        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_TIME)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
