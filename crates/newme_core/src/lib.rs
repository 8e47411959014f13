//! Core domain logic for NewMe.
//! This crate is the single source of truth for habits, points and progression.

pub mod db;
pub mod engine;
pub mod insight;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use engine::balance::{evaluate_balance, BalanceReport, HabitBalance, StatusColor};
pub use engine::progression::{LadderError, Progress, Stage, StageLadder};
pub use insight::provider::{InsightContext, InsightError, InsightProvider};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::date_key::{DateKey, DateKeyError};
pub use model::habit::{default_habits, EnergyCenter, Habit, HabitId};
pub use model::stats::{Badge, UserStats};
pub use repo::state_repo::{RepoError, RepoResult, SqliteStateRepository, StateRepository};
pub use service::app_service::{AppService, DashboardSummary};
pub use service::insight_service::{Insight, InsightConfig, InsightService, InsightSource};
pub use service::intuition::{GuessOutcome, IntuitionColor};
pub use store::habit_store::{MoveDirection, NewHabit};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
