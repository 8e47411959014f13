//! Daily planner task model.
//!
//! # Invariants
//! - A task belongs to exactly one date key; there is no recurrence.
//! - `title` is non-blank for tasks created through the planner store.

use crate::model::date_key::DateKey;
use crate::model::entry::EntryId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    DeepFocus,
    Personal,
    Social,
    Health,
}

impl TaskCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeepFocus => "deep_focus",
            Self::Personal => "personal",
            Self::Social => "social",
            Self::Health => "health",
        }
    }
}

/// Part of the day a task is planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: EntryId,
    pub title: String,
    pub priority: Priority,
    pub category: TaskCategory,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Owning day.
    pub date: DateKey,
    pub time_slot: TimeSlot,
}

impl Task {
    /// Creates an open task with planner defaults (medium, personal, morning).
    pub fn new(title: impl Into<String>, date: DateKey) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            priority: Priority::Medium,
            category: TaskCategory::Personal,
            completed: false,
            created_at: Utc::now().timestamp_millis(),
            date,
            time_slot: TimeSlot::Morning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, TaskCategory, TimeSlot};

    #[test]
    fn names_match_persisted_form() {
        let encoded = serde_json::to_string(&TaskCategory::DeepFocus).unwrap();
        assert_eq!(encoded, format!("\"{}\"", TaskCategory::DeepFocus.as_str()));
        let encoded = serde_json::to_string(&TimeSlot::Afternoon).unwrap();
        assert_eq!(encoded, format!("\"{}\"", TimeSlot::Afternoon.as_str()));
        assert_eq!(Priority::High.as_str(), "high");
    }
}
