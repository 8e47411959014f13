//! Gratitude log and its input-slot preference.
//!
//! # Invariants
//! - Stored items are trimmed and non-blank.
//! - The slot count stays within `[MIN_SLOTS, MAX_SLOTS]`.

use crate::model::entry::{EntryId, GratitudeEntry};
use crate::store::points::{awards, PointSink};
use chrono::NaiveDate;

pub const DEFAULT_SLOTS: u8 = 3;
pub const MIN_SLOTS: u8 = 1;
pub const MAX_SLOTS: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GratitudeStore {
    entries: Vec<GratitudeEntry>,
    slots: u8,
}

impl Default for GratitudeStore {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_SLOTS)
    }
}

impl GratitudeStore {
    pub fn new(entries: Vec<GratitudeEntry>, slots: u8) -> Self {
        Self {
            entries,
            slots: slots.clamp(MIN_SLOTS, MAX_SLOTS),
        }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[GratitudeEntry] {
        &self.entries
    }

    /// Number of input slots offered when writing an entry.
    pub fn slots(&self) -> u8 {
        self.slots
    }

    /// Shifts the slot count by `delta`, clamped. Returns the new count.
    pub fn adjust_slots(&mut self, delta: i32) -> u8 {
        let next = (i32::from(self.slots) + delta).clamp(i32::from(MIN_SLOTS), i32::from(MAX_SLOTS));
        self.slots = u8::try_from(next).unwrap_or(DEFAULT_SLOTS);
        self.slots
    }

    /// Records the non-blank items as one entry, 10 points per item.
    ///
    /// Returns `None` when every item is blank.
    pub fn add(
        &mut self,
        items: &[String],
        created_on: NaiveDate,
        points: &mut impl PointSink,
    ) -> Option<EntryId> {
        let kept: Vec<String> = items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
        if kept.is_empty() {
            return None;
        }
        let award = awards::GRATITUDE_ITEM * kept.len() as i64;
        let entry = GratitudeEntry::new(kept, created_on);
        let id = entry.id;
        self.entries.insert(0, entry);
        points.add_points(award);
        Some(id)
    }

    pub fn delete(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::{GratitudeStore, MAX_SLOTS, MIN_SLOTS};
    use crate::store::points::testing::RecordingSink;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 9).unwrap()
    }

    #[test]
    fn blank_items_are_dropped_and_priced_per_kept_item() {
        let mut store = GratitudeStore::default();
        let mut sink = RecordingSink::default();
        let items = vec![
            "sunlight".to_string(),
            "  ".to_string(),
            " my sister ".to_string(),
        ];
        let id = store.add(&items, day(), &mut sink).unwrap();

        let entry = &store.entries()[0];
        assert_eq!(entry.id, id);
        assert_eq!(entry.items, vec!["sunlight", "my sister"]);
        assert_eq!(sink.deltas, vec![20]);
    }

    #[test]
    fn all_blank_items_are_rejected() {
        let mut store = GratitudeStore::default();
        let mut sink = RecordingSink::default();
        assert_eq!(store.add(&[String::new(), " ".to_string()], day(), &mut sink), None);
        assert!(store.entries().is_empty());
        assert!(sink.deltas.is_empty());
    }

    #[test]
    fn slot_count_is_clamped() {
        let mut store = GratitudeStore::default();
        assert_eq!(store.adjust_slots(-10), MIN_SLOTS);
        assert_eq!(store.adjust_slots(50), MAX_SLOTS);
        assert_eq!(GratitudeStore::new(Vec::new(), 0).slots(), MIN_SLOTS);
    }
}
