//! Use-case services over the feature stores.
//!
//! # Responsibility
//! - Own application state and route every mutation through one root.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod app_service;
pub mod insight_service;
pub mod intuition;
