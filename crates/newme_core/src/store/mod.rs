//! In-memory feature stores.
//!
//! # Responsibility
//! - Own each feature's collection (habits, tasks, journal, gratitude).
//! - Validate user input locally; invalid input is a silent no-op.
//! - Funnel every point-bearing mutation through `PointSink`.
//!
//! # Invariants
//! - Stores are independent; none reads or writes another's data.

pub mod gratitude_store;
pub mod habit_store;
pub mod journal_store;
pub mod points;
pub mod task_store;
