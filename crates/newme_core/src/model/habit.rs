//! Habit domain model and completion ledger.
//!
//! # Responsibility
//! - Define the habit record and its seven energy-center categories.
//! - Own the per-habit completion set and keep `streak` in sync with it.
//!
//! # Invariants
//! - `completions` never holds the same date key twice.
//! - `streak == completions.len()` after every mutation and after load
//!   normalization. It is a lifetime completion count, not a consecutive run;
//!   see `Habit::current_run` for the consecutive-day figure.

use crate::model::date_key::DateKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Stable habit identifier. Canonical habits use `m1`..`m7`.
pub type HabitId = String;

/// Number of habits in the canonical default set.
pub const DEFAULT_HABIT_COUNT: usize = 7;

/// Weekly target assigned to new habits.
pub const DEFAULT_HABIT_FREQUENCY: u8 = 7;

/// The seven fixed habit categories, ordered root to crown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyCenter {
    Root,
    Sacral,
    SolarPlexus,
    Heart,
    Throat,
    ThirdEye,
    Crown,
}

impl EnergyCenter {
    pub const ALL: [EnergyCenter; 7] = [
        Self::Root,
        Self::Sacral,
        Self::SolarPlexus,
        Self::Heart,
        Self::Throat,
        Self::ThirdEye,
        Self::Crown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::Sacral => "Sacral",
            Self::SolarPlexus => "Solar Plexus",
            Self::Heart => "Heart",
            Self::Throat => "Throat",
            Self::ThirdEye => "Third Eye",
            Self::Crown => "Crown",
        }
    }

    /// Accepts the display label or its snake_case form, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|center| center.label().to_ascii_lowercase().replace(' ', "_") == wanted)
    }

    /// Color tag conventionally paired with this center.
    pub fn color_tag(self) -> &'static str {
        match self {
            Self::Root => "rose",
            Self::Sacral => "orange",
            Self::SolarPlexus => "amber",
            Self::Heart => "emerald",
            Self::Throat => "sky",
            Self::ThirdEye => "indigo",
            Self::Crown => "purple",
        }
    }
}

/// A recurring activity tracked by date-keyed completion marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub category: EnergyCenter,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    completions: BTreeSet<DateKey>,
    #[serde(default)]
    streak: u32,
    /// Target occurrences per week. Informational only.
    pub frequency: u8,
    pub active: bool,
}

impl Habit {
    /// Creates an active habit with no completions.
    pub fn new(
        id: impl Into<HabitId>,
        name: impl Into<String>,
        category: EnergyCenter,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            icon: icon.into(),
            color: color.into(),
            completions: BTreeSet::new(),
            streak: 0,
            frequency: DEFAULT_HABIT_FREQUENCY,
            active: true,
        }
    }

    /// Creates an active habit with a generated stable ID.
    pub fn with_generated_id(
        name: impl Into<String>,
        category: EnergyCenter,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self::new(Uuid::new_v4().to_string(), name, category, icon, color)
    }

    /// Flips completion for `date`.
    ///
    /// Returns `true` when the date is now completed, `false` when the toggle
    /// removed an existing completion.
    pub fn toggle_completion(&mut self, date: DateKey) -> bool {
        let completed = if self.completions.remove(&date) {
            false
        } else {
            self.completions.insert(date);
            true
        };
        self.sync_streak();
        completed
    }

    pub fn is_completed_on(&self, date: &DateKey) -> bool {
        self.completions.contains(date)
    }

    pub fn completions(&self) -> &BTreeSet<DateKey> {
        &self.completions
    }

    /// Completion count; the balance evaluator's "ticks".
    pub fn ticks(&self) -> usize {
        self.completions.len()
    }

    /// Lifetime completion count, kept under its historical name.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Completions within the inclusive range `[start, end]`.
    ///
    /// Returns an empty set when `start > end`.
    pub fn completions_in_range(&self, start: DateKey, end: DateKey) -> BTreeSet<DateKey> {
        if start > end {
            return BTreeSet::new();
        }
        self.completions.range(start..=end).copied().collect()
    }

    /// Length of the consecutive-day run ending at `as_of`.
    ///
    /// An unfinished `as_of` does not break a run that ended the day before.
    pub fn current_run(&self, as_of: DateKey) -> u32 {
        let mut cursor = if self.completions.contains(&as_of) {
            Some(as_of)
        } else {
            as_of.pred()
        };
        let mut run = 0;
        while let Some(day) = cursor {
            if !self.completions.contains(&day) {
                break;
            }
            run += 1;
            cursor = day.pred();
        }
        run
    }

    /// Re-derives `streak` from the completion set.
    ///
    /// Used after deserialization, where the stored count may be stale.
    pub fn sync_streak(&mut self) {
        self.streak = u32::try_from(self.completions.len()).unwrap_or(u32::MAX);
    }
}

/// The canonical default habit set, one per energy center.
pub fn default_habits() -> Vec<Habit> {
    const SEED: [(&str, &str, EnergyCenter, &str); DEFAULT_HABIT_COUNT] = [
        ("m1", "Daily exercise and movement", EnergyCenter::Root, "🏋️"),
        ("m2", "Water and vitality", EnergyCenter::Sacral, "💧"),
        ("m3", "Order and time management", EnergyCenter::SolarPlexus, "✨"),
        ("m4", "Gratitude and love", EnergyCenter::Heart, "💖"),
        ("m5", "Honest expression and reading", EnergyCenter::Throat, "📖"),
        ("m6", "Creative visualization and intuition", EnergyCenter::ThirdEye, "👁️"),
        ("m7", "Meditation and mental silence", EnergyCenter::Crown, "🧘"),
    ];

    SEED.iter()
        .map(|(id, name, center, icon)| Habit::new(*id, *name, *center, *icon, center.color_tag()))
        .collect()
}
