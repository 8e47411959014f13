//! Typed load/save of application state over `StateRepository`.
//!
//! # Responsibility
//! - Encode each state slice as JSON under its stable namespace.
//! - Load every slice independently, degrading to defaults on failure.
//!
//! # Invariants
//! - A missing or corrupt slice never prevents other slices from loading.
//! - Persisted habits shorter than the canonical set are replaced by it.
//! - Log lines carry namespaces and error kinds, never user content.

use crate::model::entry::{GratitudeEntry, JournalEntry};
use crate::model::habit::Habit;
use crate::model::stats::UserStats;
use crate::model::task::Task;
use crate::model::theme::{ThemeMode, DEFAULT_THEME_ID};
use crate::repo::state_repo::{RepoError, RepoResult, StateRepository};
use crate::store::gratitude_store::{GratitudeStore, DEFAULT_SLOTS};
use crate::store::habit_store::HabitStore;
use crate::store::journal_store::JournalStore;
use crate::store::task_store::TaskStore;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Stable namespace keys for persisted state.
pub mod namespace {
    pub const TASKS: &str = "mj-tasks";
    pub const HABITS: &str = "mj-habits";
    pub const JOURNAL: &str = "mj-journal";
    pub const GRATITUDE: &str = "mj-gratitude";
    pub const GRATITUDE_SLOTS: &str = "mj-gratitude-count";
    pub const STATS: &str = "mj-stats";
    pub const THEME_ID: &str = "mj-theme-id";
    pub const THEME_MODE: &str = "theme";
}

/// Every persisted slice, as loaded at startup.
#[derive(Debug, Clone)]
pub struct AppSnapshot {
    pub tasks: TaskStore,
    pub habits: HabitStore,
    pub journal: JournalStore,
    pub gratitude: GratitudeStore,
    pub stats: UserStats,
    pub theme_id: String,
    pub theme_mode: ThemeMode,
    /// Whether the persisted habit set was replaced by the defaults.
    pub habits_repaired: bool,
}

/// Outcome of loading one slice.
enum Loaded<T> {
    Found(T),
    Missing,
    Corrupt,
}

impl<T> Loaded<T> {
    fn or_default_with(self, fallback: impl FnOnce() -> T) -> T {
        match self {
            Self::Found(value) => value,
            Self::Missing | Self::Corrupt => fallback(),
        }
    }
}

/// Loads every slice, each falling back independently.
pub fn load_snapshot(repo: &impl StateRepository) -> AppSnapshot {
    let tasks = load_slice::<Vec<Task>>(repo, namespace::TASKS).or_default_with(Vec::new);
    let journal =
        load_slice::<Vec<JournalEntry>>(repo, namespace::JOURNAL).or_default_with(Vec::new);
    let gratitude =
        load_slice::<Vec<GratitudeEntry>>(repo, namespace::GRATITUDE).or_default_with(Vec::new);
    let slots = load_slice::<u8>(repo, namespace::GRATITUDE_SLOTS).or_default_with(|| DEFAULT_SLOTS);
    let stats = load_slice::<UserStats>(repo, namespace::STATS).or_default_with(UserStats::default);
    let theme_id = load_slice::<String>(repo, namespace::THEME_ID)
        .or_default_with(|| DEFAULT_THEME_ID.to_string());
    let theme_mode =
        load_slice::<ThemeMode>(repo, namespace::THEME_MODE).or_default_with(ThemeMode::default);

    let (habits, habits_repaired) = match load_slice::<Vec<Habit>>(repo, namespace::HABITS) {
        Loaded::Found(persisted) => {
            let persisted_len = persisted.len();
            let (store, repaired) = HabitStore::from_persisted(persisted);
            if repaired {
                info!(
                    "event=state_load module=repo status=repaired namespace={} persisted_len={} default_len={}",
                    namespace::HABITS,
                    persisted_len,
                    store.habits().len()
                );
            }
            (store, repaired)
        }
        Loaded::Missing | Loaded::Corrupt => (HabitStore::with_defaults(), false),
    };

    AppSnapshot {
        tasks: TaskStore::new(tasks),
        habits,
        journal: JournalStore::new(journal),
        gratitude: GratitudeStore::new(gratitude, slots),
        stats,
        theme_id,
        theme_mode,
        habits_repaired,
    }
}

fn load_slice<T: DeserializeOwned>(repo: &impl StateRepository, namespace: &str) -> Loaded<T> {
    match load_value::<T>(repo, namespace) {
        Ok(Some(value)) => Loaded::Found(value),
        Ok(None) => Loaded::Missing,
        Err(err) => {
            warn!(
                "event=state_load module=repo status=fallback namespace={} error_kind={}",
                namespace,
                error_kind(&err)
            );
            Loaded::Corrupt
        }
    }
}

/// Loads and decodes one slice; `Ok(None)` when never saved.
pub fn load_value<T: DeserializeOwned>(
    repo: &impl StateRepository,
    namespace: &str,
) -> RepoResult<Option<T>> {
    let Some(payload) = repo.load_payload(namespace)? else {
        return Ok(None);
    };
    serde_json::from_str(&payload)
        .map(Some)
        .map_err(|source| RepoError::Decode {
            namespace: namespace.to_string(),
            source,
        })
}

/// Encodes and saves one slice.
pub fn save_value<T: Serialize + ?Sized>(
    repo: &impl StateRepository,
    namespace: &str,
    value: &T,
) -> RepoResult<()> {
    let payload = serde_json::to_string(value).map_err(|source| RepoError::Encode {
        namespace: namespace.to_string(),
        source,
    })?;
    repo.save_payload(namespace, &payload)
}

/// Short, content-free classification for log lines.
pub(crate) fn error_kind(err: &RepoError) -> &'static str {
    match err {
        RepoError::Db(_) => "db",
        RepoError::InvalidNamespace(_) => "invalid_namespace",
        RepoError::Encode { .. } => "encode",
        RepoError::Decode { .. } => "decode",
    }
}
