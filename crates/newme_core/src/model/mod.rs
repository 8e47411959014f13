//! Domain records for habits, planner tasks, journal, gratitude and stats.
//!
//! # Responsibility
//! - Define the canonical persisted shapes shared by stores and services.
//! - Keep record-level invariants (date key canonical form, completion set
//!   uniqueness, one-way badge unlocks) next to the data they protect.
//!
//! # Invariants
//! - Records carry no derived values except `Habit::streak`, which is kept in
//!   lockstep with the completion set.

pub mod date_key;
pub mod entry;
pub mod habit;
pub mod stats;
pub mod task;
pub mod theme;
