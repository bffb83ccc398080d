//! Stage progression
//!
//! Score unlocks stages in order. Each stage changes the hoop or the
//! scoring, and announces itself once with a banner.

use serde::{Deserialize, Serialize};

use super::state::{GameState, Notification};

/// Difficulty / visual tier, ordered by unlock score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    Normal,
    /// Slow motion hoop
    Prospecting,
    /// Wider hoop
    Qualified,
    /// Fireball: double points and a fire trail
    ClosedWon,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Normal,
        Stage::Prospecting,
        Stage::Qualified,
        Stage::ClosedWon,
    ];

    /// Highest stage unlocked by `score`
    pub fn for_score(score: u64, thresholds: &[u64; 3]) -> Stage {
        if score >= thresholds[2] {
            Stage::ClosedWon
        } else if score >= thresholds[1] {
            Stage::Qualified
        } else if score >= thresholds[0] {
            Stage::Prospecting
        } else {
            Stage::Normal
        }
    }

    /// Ordinal (0..=3)
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Hoop runs at reduced speed
    pub fn is_slow_motion(&self) -> bool {
        *self == Stage::Prospecting
    }

    pub fn has_big_hoop(&self) -> bool {
        *self >= Stage::Qualified
    }

    pub fn is_fireball(&self) -> bool {
        *self >= Stage::ClosedWon
    }

    /// Points for one basket
    pub fn points_per_basket(&self) -> u64 {
        if self.is_fireball() { 2 } else { 1 }
    }

    /// Banner text and accent color announcing this stage
    pub fn banner(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Stage::Normal => None,
            Stage::Prospecting => Some(("PROSPECTING MODE: SLOW MO", "#00f5ff")),
            Stage::Qualified => Some(("QUALIFIED LEAD: BIG HOOP", "#ffbe0b")),
            Stage::ClosedWon => Some(("CLOSED WON: FIREBALL!", "#ff006e")),
        }
    }
}

/// Move the state forward to the stage its score has earned.
///
/// Returns the new stage if it advanced. Never moves backwards.
pub fn advance_stage(state: &mut GameState, thresholds: &[u64; 3], notification_ticks: u32) -> Option<Stage> {
    let target = Stage::for_score(state.score, thresholds);
    if target <= state.stage {
        return None;
    }

    state.stage = target;
    state.notification = target.banner().map(|(text, color)| Notification {
        text,
        color,
        ticks_left: notification_ticks,
    });
    log::info!("Stage {} reached at score {}", target.index(), state.score);
    Some(target)
}

/// Count down the active banner and clear it when it expires
pub fn expire_notification(state: &mut GameState) {
    if let Some(note) = state.notification.as_mut() {
        note.ticks_left = note.ticks_left.saturating_sub(1);
        if note.ticks_left == 0 {
            state.notification = None;
        }
    }
}
