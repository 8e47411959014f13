//! Energy balance across active habits.
//!
//! # Invariants
//! - A habit lags when it trails the best active habit by `LAG_THRESHOLD` or
//!   more completions.
//! - Green is shown only when no active habit lags; otherwise non-lagging
//!   habits carry no indicator.
//! - Inactive habits are ignored entirely, including for `max_ticks`.

use crate::model::habit::{Habit, HabitId};

/// Completion deficit at which a habit counts as lagging.
pub const LAG_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Red,
    Green,
    /// No indicator.
    Unmarked,
}

impl StatusColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Unmarked => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitBalance {
    pub habit_id: HabitId,
    pub ticks: usize,
    pub is_lagging: bool,
    pub status: StatusColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    pub items: Vec<HabitBalance>,
    pub max_ticks: usize,
    pub is_overall_balanced: bool,
}

impl BalanceReport {
    /// Evaluates `(habit_id, ticks)` pairs, all assumed active.
    pub fn from_ticks(entries: impl IntoIterator<Item = (HabitId, usize)>) -> Self {
        let entries: Vec<(HabitId, usize)> = entries.into_iter().collect();
        let max_ticks = entries.iter().map(|(_, ticks)| *ticks).max().unwrap_or(0);
        let lags = |ticks: usize| max_ticks - ticks >= LAG_THRESHOLD;
        let is_overall_balanced = entries.iter().all(|(_, ticks)| !lags(*ticks));

        let items = entries
            .into_iter()
            .map(|(habit_id, ticks)| {
                let is_lagging = lags(ticks);
                let status = if is_lagging {
                    StatusColor::Red
                } else if is_overall_balanced {
                    StatusColor::Green
                } else {
                    StatusColor::Unmarked
                };
                HabitBalance {
                    habit_id,
                    ticks,
                    is_lagging,
                    status,
                }
            })
            .collect();

        Self {
            items,
            max_ticks,
            is_overall_balanced,
        }
    }

    pub fn lagging(&self) -> impl Iterator<Item = &HabitBalance> {
        self.items.iter().filter(|item| item.is_lagging)
    }

    pub fn get(&self, habit_id: &str) -> Option<&HabitBalance> {
        self.items.iter().find(|item| item.habit_id == habit_id)
    }
}

/// Evaluates balance over the active habits in `habits`, preserving order.
pub fn evaluate_balance<'a>(habits: impl IntoIterator<Item = &'a Habit>) -> BalanceReport {
    BalanceReport::from_ticks(
        habits
            .into_iter()
            .filter(|habit| habit.active)
            .map(|habit| (habit.id.clone(), habit.ticks())),
    )
}

#[cfg(test)]
mod tests {
    use super::{BalanceReport, StatusColor};

    #[test]
    fn empty_input_is_balanced_with_zero_max() {
        let report = BalanceReport::from_ticks(Vec::new());
        assert_eq!(report.max_ticks, 0);
        assert!(report.is_overall_balanced);
        assert!(report.items.is_empty());
    }

    #[test]
    fn deficit_of_two_is_still_balanced() {
        let report = BalanceReport::from_ticks(vec![("a".to_string(), 4), ("b".to_string(), 2)]);
        assert!(report.is_overall_balanced);
        assert!(report.items.iter().all(|i| i.status == StatusColor::Green));
    }
}
