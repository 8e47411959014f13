//! Gamification stats: point total, stored level and badges.
//!
//! # Invariants
//! - `points` has no floor or ceiling; negative totals are valid.
//! - Badges only move from locked to unlocked.
//! - `level` is stored as-is; nothing derives it from `points`.

use serde::{Deserialize, Serialize};

/// Badge awarded on first launch.
pub const BADGE_STARTER_ID: &str = "1";
/// Badge awarded for three consecutive correct intuition guesses.
pub const BADGE_HIGH_FOCUS_ID: &str = "3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub unlocked: bool,
}

impl Badge {
    fn seed(id: &str, name: &str, icon: &str, description: &str, unlocked: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
            unlocked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub points: i64,
    pub level: u32,
    pub badges: Vec<Badge>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            points: 0,
            level: 1,
            badges: vec![
                Badge::seed(BADGE_STARTER_ID, "Starter", "🚀", "First step toward change", true),
                Badge::seed(
                    BADGE_HIGH_FOCUS_ID,
                    "High Focus",
                    "🎯",
                    "Scored in the intuition game",
                    false,
                ),
            ],
        }
    }
}

impl UserStats {
    pub fn badge(&self, id: &str) -> Option<&Badge> {
        self.badges.iter().find(|badge| badge.id == id)
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.badge(id).is_some_and(|badge| badge.unlocked)
    }

    /// Unlocks one badge.
    ///
    /// Returns `true` only on the locked-to-unlocked transition; unknown IDs
    /// and already-unlocked badges return `false`.
    pub fn unlock_badge(&mut self, id: &str) -> bool {
        match self.badges.iter_mut().find(|badge| badge.id == id) {
            Some(badge) if !badge.unlocked => {
                badge.unlocked = true;
                true
            }
            _ => false,
        }
    }

    pub fn unlocked_badge_count(&self) -> usize {
        self.badges.iter().filter(|badge| badge.unlocked).count()
    }
}
