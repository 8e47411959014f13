//! Repository layer for persisted application state.
//!
//! # Responsibility
//! - Define the namespaced payload storage contract.
//! - Isolate SQLite and JSON encoding details from services.
//!
//! # Invariants
//! - Loading never fails as a whole; each slice degrades to its default.

pub mod snapshot;
pub mod state_repo;
