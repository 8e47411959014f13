//! Advisory text capability contracts.
//!
//! Caching, timeouts and fallbacks live in `service::insight_service`.

pub mod provider;
