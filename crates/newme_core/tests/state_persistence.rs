use newme_core::db::open_db_in_memory;
use newme_core::model::theme::ThemeMode;
use newme_core::repo::snapshot::{load_snapshot, load_value, namespace, save_value};
use newme_core::{
    default_habits, AppService, DateKey, RepoError, RepoResult, SqliteStateRepository,
    StateRepository,
};
use std::cell::RefCell;
use std::collections::HashMap;

fn memory_repo() -> SqliteStateRepository {
    SqliteStateRepository::new(open_db_in_memory().unwrap())
}

/// Repository whose saves always fail.
#[derive(Default)]
struct ReadOnlyRepo {
    payloads: HashMap<String, String>,
    save_attempts: RefCell<u32>,
}

impl StateRepository for ReadOnlyRepo {
    fn load_payload(&self, namespace: &str) -> RepoResult<Option<String>> {
        Ok(self.payloads.get(namespace).cloned())
    }

    fn save_payload(&self, namespace: &str, _payload: &str) -> RepoResult<()> {
        *self.save_attempts.borrow_mut() += 1;
        Err(RepoError::InvalidNamespace(namespace.to_string()))
    }
}

#[test]
fn empty_store_loads_defaults() {
    let snapshot = load_snapshot(&memory_repo());

    assert!(snapshot.tasks.tasks().is_empty());
    assert_eq!(snapshot.habits.habits(), default_habits().as_slice());
    assert_eq!(snapshot.stats.points, 0);
    assert_eq!(snapshot.stats.level, 1);
    assert_eq!(snapshot.gratitude.slots(), 3);
    assert_eq!(snapshot.theme_id, "classic-white");
    assert_eq!(snapshot.theme_mode, ThemeMode::Light);
    assert!(!snapshot.habits_repaired);
}

#[test]
fn short_habit_list_is_replaced_by_defaults() {
    let repo = memory_repo();
    let short: Vec<_> = default_habits().into_iter().take(3).collect();
    save_value(&repo, namespace::HABITS, &short).unwrap();

    let snapshot = load_snapshot(&repo);
    assert!(snapshot.habits_repaired);
    assert_eq!(snapshot.habits.habits().len(), 7);
}

#[test]
fn corrupt_slice_falls_back_without_touching_others() {
    let repo = memory_repo();
    repo.save_payload(namespace::STATS, "{not json").unwrap();
    save_value(&repo, namespace::THEME_ID, "sunset-gold").unwrap();

    let snapshot = load_snapshot(&repo);
    assert_eq!(snapshot.stats.points, 0);
    assert_eq!(snapshot.theme_id, "sunset-gold");

    let err = load_value::<u8>(&repo, namespace::STATS).unwrap_err();
    assert!(matches!(err, RepoError::Decode { .. }));
}

#[test]
fn blank_namespace_is_rejected() {
    let repo = memory_repo();
    assert!(matches!(
        repo.save_payload("  ", "{}"),
        Err(RepoError::InvalidNamespace(_))
    ));
}

#[test]
fn stored_streak_is_rederived_from_completions() {
    let repo = memory_repo();
    let mut habits = default_habits();
    habits[0].toggle_completion(DateKey::parse("2024-01-01").unwrap());
    let mut encoded = serde_json::to_value(&habits).unwrap();
    encoded[0]["streak"] = serde_json::json!(42);
    repo.save_payload(namespace::HABITS, &encoded.to_string())
        .unwrap();

    let snapshot = load_snapshot(&repo);
    assert_eq!(snapshot.habits.habits()[0].streak(), 1);
}

#[test]
fn state_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("newme.db");
    let day = DateKey::parse("2024-04-02").unwrap();

    let task_id = {
        let mut app = AppService::open(&path).unwrap();
        app.toggle_habit("m5", day).unwrap();
        app.set_theme("electric-blue");
        app.set_theme_mode(ThemeMode::Dark);
        app.adjust_gratitude_slots(2);
        app.add_task("stretch", day).unwrap()
    };

    let app = AppService::open(&path).unwrap();
    assert!(app.habit("m5").unwrap().is_completed_on(&day));
    assert_eq!(app.stats().points, 11);
    assert_eq!(app.theme_id(), "electric-blue");
    assert_eq!(app.theme_mode(), ThemeMode::Dark);
    assert_eq!(app.gratitude_slots(), 5);
    assert_eq!(app.tasks()[0].id, task_id);
    assert_eq!(app.tasks()[0].title, "stretch");
}

#[test]
fn save_failures_leave_memory_state_authoritative() {
    let mut app = AppService::load(ReadOnlyRepo::default());
    let day = DateKey::parse("2024-04-02").unwrap();

    assert_eq!(app.toggle_habit("m1", day), Some(true));
    assert_eq!(app.stats().points, 1);
    assert!(*app.repository().save_attempts.borrow() >= 2);
    assert!(app.save_all().is_err());
}

#[test]
fn repaired_habits_are_written_back_on_load() {
    let repo = memory_repo();
    save_value(&repo, namespace::HABITS, &Vec::<u8>::new()).unwrap();

    let app = AppService::load(repo);
    let stored: Vec<serde_json::Value> = load_value(app.repository(), namespace::HABITS)
        .unwrap()
        .unwrap();
    assert_eq!(stored.len(), 7);
}
