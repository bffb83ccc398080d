//! Best score persistence
//!
//! A single value stored as a decimal string under a fixed key. Read once
//! at startup and written whenever it grows.

use std::num::ParseIntError;

use crate::platform::KeyValueStore;

/// Persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "jellyHighScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Parse the stored decimal string
    pub fn decode(raw: &str) -> Result<u64, ParseIntError> {
        raw.trim().parse::<u64>()
    }

    pub fn encode(&self) -> String {
        self.best.to_string()
    }

    /// Load the best score; missing or corrupt data counts as zero
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let Some(raw) = store.get_item(Self::STORAGE_KEY) else {
            log::info!("No high score found, starting fresh");
            return Self::default();
        };

        match Self::decode(&raw) {
            Ok(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Err(e) => {
                log::warn!("Ignoring corrupt high score {:?}: {}", raw, e);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        store.set_item(Self::STORAGE_KEY, &self.encode());
        log::info!("High score saved ({})", self.best);
    }
}
