//! Points ledger entry point and the award table.
//!
//! Stores never touch `UserStats` directly; they report deltas through
//! `PointSink`. The sink knows nothing about why points changed.

use crate::model::stats::UserStats;

/// Receives point deltas from feature stores.
pub trait PointSink {
    fn add_points(&mut self, delta: i64);
}

impl PointSink for UserStats {
    fn add_points(&mut self, delta: i64) {
        self.points = self.points.saturating_add(delta);
    }
}

/// Points awarded per feature action.
pub mod awards {
    /// Marking a habit done; undoing it subtracts the same amount.
    pub const HABIT_COMPLETION: i64 = 1;
    pub const TASK_CREATED: i64 = 10;
    /// Only on the open-to-done transition.
    pub const TASK_COMPLETED: i64 = 15;
    /// Per non-blank gratitude item.
    pub const GRATITUDE_ITEM: i64 = 10;
    pub const JOURNAL_ENTRY: i64 = 20;
    pub const JOURNAL_RELEASE: i64 = 10;
    /// Added for a correct guess, subtracted for a wrong one.
    pub const INTUITION_GUESS: i64 = 1;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::PointSink;

    /// Records every delta for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub deltas: Vec<i64>,
    }

    impl RecordingSink {
        pub fn total(&self) -> i64 {
            self.deltas.iter().sum()
        }
    }

    impl PointSink for RecordingSink {
        fn add_points(&mut self, delta: i64) {
            self.deltas.push(delta);
        }
    }
}
