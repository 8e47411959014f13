//! Ordered habit collection and completion ledger.
//!
//! # Responsibility
//! - Own display order and per-habit completion sets.
//! - Report ±1 point per completion toggle.
//! - Apply the short-set repair rule when loading persisted habits.
//!
//! # Invariants
//! - Every toggle applies its own ±1; two toggles of the same date net zero.
//! - Reordering past either end is a no-op.

use crate::model::date_key::DateKey;
use crate::model::habit::{default_habits, EnergyCenter, Habit, HabitId, DEFAULT_HABIT_COUNT};
use crate::store::points::{awards, PointSink};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Input for user-created habits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub category: EnergyCenter,
    pub icon: String,
    /// Defaults to the category's color tag when `None`.
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitStore {
    habits: Vec<Habit>,
}

impl Default for HabitStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl HabitStore {
    pub fn new(habits: Vec<Habit>) -> Self {
        Self { habits }
    }

    pub fn with_defaults() -> Self {
        Self::new(default_habits())
    }

    /// Builds the store from a persisted habit list.
    ///
    /// A list shorter than the canonical default set is discarded in favor of
    /// the defaults. Returns the store and whether that repair happened.
    pub fn from_persisted(mut habits: Vec<Habit>) -> (Self, bool) {
        if habits.len() < DEFAULT_HABIT_COUNT {
            return (Self::with_defaults(), true);
        }
        for habit in &mut habits {
            habit.sync_streak();
        }
        (Self::new(habits), false)
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn active(&self) -> impl Iterator<Item = &Habit> {
        self.habits.iter().filter(|habit| habit.active)
    }

    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.habits.iter().position(|habit| habit.id == id)
    }

    /// Toggles one habit's completion on `date` and reports ±1.
    ///
    /// Returns `Some(true)` when the date is now completed, `Some(false)`
    /// when it was undone, and `None` (no points) for unknown habits.
    pub fn toggle_completion(
        &mut self,
        id: &str,
        date: DateKey,
        points: &mut impl PointSink,
    ) -> Option<bool> {
        let habit = self.habits.iter_mut().find(|habit| habit.id == id)?;
        let completed = habit.toggle_completion(date);
        points.add_points(if completed {
            awards::HABIT_COMPLETION
        } else {
            -awards::HABIT_COMPLETION
        });
        Some(completed)
    }

    /// Swaps a habit with its neighbor. Returns whether anything moved.
    pub fn reorder(&mut self, id: &str, direction: MoveDirection) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|target| *target < self.habits.len()),
        };
        match target {
            Some(target) => {
                self.habits.swap(index, target);
                true
            }
            None => false,
        }
    }

    /// Completions of one habit in `[start, end]`; `None` for unknown habits.
    pub fn completions_in_range(
        &self,
        id: &str,
        start: DateKey,
        end: DateKey,
    ) -> Option<BTreeSet<DateKey>> {
        self.get(id)
            .map(|habit| habit.completions_in_range(start, end))
    }

    /// Appends a user-created habit. Blank names are rejected.
    pub fn add(&mut self, request: NewHabit) -> Option<HabitId> {
        let name = request.name.trim();
        if name.is_empty() {
            return None;
        }
        let color = request
            .color
            .unwrap_or_else(|| request.category.color_tag().to_string());
        let habit = Habit::with_generated_id(name, request.category, request.icon, color);
        let id = habit.id.clone();
        self.habits.push(habit);
        Some(id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.habits.len();
        self.habits.retain(|habit| habit.id != id);
        self.habits.len() != before
    }

    /// Archives or restores a habit. Returns whether the flag changed.
    pub fn set_active(&mut self, id: &str, active: bool) -> bool {
        match self.habits.iter_mut().find(|habit| habit.id == id) {
            Some(habit) if habit.active != active => {
                habit.active = active;
                true
            }
            _ => false,
        }
    }

    pub fn reset_to_defaults(&mut self) {
        self.habits = default_habits();
    }

    /// Sum of completions across every habit, active or not.
    pub fn total_completions(&self) -> usize {
        self.habits.iter().map(Habit::ticks).sum()
    }
}
