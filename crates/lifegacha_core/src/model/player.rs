//! Player progression record.
//!
//! # Responsibility
//! - Hold level, experience and currency counters.
//! - Resolve level-ups after experience is granted.
//!
//! # Invariants
//! - `level >= 1`.
//! - `xp_to_next_level == XP_PER_LEVEL * level`.
//! - `current_xp < xp_to_next_level` after every public mutation.

use serde::{Deserialize, Serialize};

/// Experience required per level; the threshold for level `n` is `n * XP_PER_LEVEL`.
pub const XP_PER_LEVEL: u64 = 100;

/// Level, experience and currency of the single local player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub level: u32,
    #[serde(rename = "currentXP")]
    pub current_xp: u64,
    #[serde(rename = "xpToNextLevel")]
    pub xp_to_next_level: u64,
    /// Shown to players as "Gems".
    pub currency: u64,
}

/// One discrete level-up, carrying the level that was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
}

/// Consecutive level-ups caused by a single grant.
///
/// Stored as a level range so very large grants do not allocate one event
/// per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUps {
    pub from_level: u32,
    pub to_level: u32,
}

impl LevelUps {
    pub fn count(&self) -> u32 {
        self.to_level - self.from_level
    }

    pub fn is_empty(&self) -> bool {
        self.to_level == self.from_level
    }

    /// Yields one event per level reached, lowest first.
    pub fn iter(&self) -> impl Iterator<Item = LevelUp> {
        (self.from_level..self.to_level).map(|level| LevelUp { level: level + 1 })
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            level: 1,
            current_xp: 0,
            xp_to_next_level: threshold_for(1),
            currency: 0,
        }
    }
}

impl PlayerState {
    /// Adds experience and currency, then resolves every level-up it causes.
    ///
    /// Returns the level-ups it caused, in order.
    pub fn grant(&mut self, xp: u64, currency: u64) -> LevelUps {
        self.current_xp = self.current_xp.saturating_add(xp);
        self.currency = self.currency.saturating_add(currency);
        self.resolve_level_ups()
    }

    /// Converts overflowing experience into levels.
    ///
    /// Each pass consumes the current threshold and raises the next one, so
    /// the loop ends once `current_xp < xp_to_next_level`.
    pub fn resolve_level_ups(&mut self) -> LevelUps {
        let from_level = self.level;
        while self.current_xp >= self.xp_to_next_level {
            self.current_xp -= self.xp_to_next_level;
            self.level = self.level.saturating_add(1);
            self.xp_to_next_level = threshold_for(self.level);
        }
        LevelUps {
            from_level,
            to_level: self.level,
        }
    }

    /// Returns whether `cost` can be paid from current currency.
    pub fn can_afford(&self, cost: u64) -> bool {
        self.currency >= cost
    }

    /// Progress toward the next level as a whole percentage, capped at 100.
    pub fn progress_percent(&self) -> u8 {
        if self.xp_to_next_level == 0 {
            return 0;
        }
        let percent = self.current_xp.saturating_mul(100) / self.xp_to_next_level;
        percent.min(100) as u8
    }
}

/// Experience threshold for leaving `level`.
pub fn threshold_for(level: u32) -> u64 {
    XP_PER_LEVEL.saturating_mul(u64::from(level.max(1)))
}
