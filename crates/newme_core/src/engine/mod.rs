//! Pure derivations over current store state.
//!
//! Nothing here is stored. Balance, stage and progress are recomputed from
//! habits and points on every read.

pub mod balance;
pub mod calendar;
pub mod progression;
