//! Journal and gratitude entries.
//!
//! Both kinds are create-only and delete-only; neither has an edit path.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for tasks, journal entries and gratitude entries.
pub type EntryId = Uuid;

const DISPLAY_DATE_FORMAT: &str = "%Y/%m/%d";

/// Formats the creation-day label stored on entries.
pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub content: String,
    /// Display-formatted creation day.
    pub date: String,
}

impl JournalEntry {
    pub fn new(content: impl Into<String>, created_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            date: display_date(created_on),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratitudeEntry {
    pub id: EntryId,
    /// Ordered list of things the user is grateful for.
    pub items: Vec<String>,
    /// Display-formatted creation day.
    pub date: String,
}

impl GratitudeEntry {
    pub fn new(items: Vec<String>, created_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            items,
            date: display_date(created_on),
        }
    }
}
