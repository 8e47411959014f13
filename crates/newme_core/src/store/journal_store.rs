//! Journal entries and the two-phase release flow.
//!
//! Releasing is delete-after-delay: `begin_release` awards the release
//! points once and marks the entry, `finish_release` removes it. The delay
//! itself belongs to the caller. Release marks are not persisted.

use crate::model::entry::{EntryId, JournalEntry};
use crate::store::points::{awards, PointSink};
use chrono::NaiveDate;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalStore {
    entries: Vec<JournalEntry>,
    releasing: BTreeSet<EntryId>,
}

impl JournalStore {
    pub fn new(entries: Vec<JournalEntry>) -> Self {
        Self {
            entries,
            releasing: BTreeSet::new(),
        }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn is_releasing(&self, id: EntryId) -> bool {
        self.releasing.contains(&id)
    }

    /// Writes a new entry. Blank content is rejected.
    pub fn add(
        &mut self,
        content: &str,
        created_on: NaiveDate,
        points: &mut impl PointSink,
    ) -> Option<EntryId> {
        if content.trim().is_empty() {
            return None;
        }
        let entry = JournalEntry::new(content, created_on);
        let id = entry.id;
        self.entries.insert(0, entry);
        points.add_points(awards::JOURNAL_ENTRY);
        Some(id)
    }

    /// Starts releasing an entry. Returns `false` for unknown entries and for
    /// entries already being released.
    pub fn begin_release(&mut self, id: EntryId, points: &mut impl PointSink) -> bool {
        if !self.entries.iter().any(|entry| entry.id == id) || !self.releasing.insert(id) {
            return false;
        }
        points.add_points(awards::JOURNAL_RELEASE);
        true
    }

    /// Completes a release started by `begin_release`.
    pub fn finish_release(&mut self, id: EntryId) -> bool {
        if !self.releasing.remove(&id) {
            return false;
        }
        self.delete(id)
    }

    /// Deletes an entry without awarding points.
    pub fn delete(&mut self, id: EntryId) -> bool {
        self.releasing.remove(&id);
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }
}
