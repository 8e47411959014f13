use newme_core::engine::calendar::{month_stats, week_days};
use newme_core::store::habit_store::HabitStore;
use newme_core::{DateKey, MoveDirection, UserStats};

fn key(value: &str) -> DateKey {
    DateKey::parse(value).unwrap()
}

#[test]
fn toggling_twice_restores_completions_and_points() {
    let mut store = HabitStore::with_defaults();
    let mut stats = UserStats::default();
    let day = key("2024-03-10");

    assert_eq!(store.toggle_completion("m3", day, &mut stats), Some(true));
    assert_eq!(stats.points, 1);
    assert!(store.get("m3").unwrap().is_completed_on(&day));

    assert_eq!(store.toggle_completion("m3", day, &mut stats), Some(false));
    assert_eq!(stats.points, 0);
    assert!(store.get("m3").unwrap().completions().is_empty());
}

#[test]
fn streak_tracks_completion_count_not_consecutive_days() {
    let mut store = HabitStore::with_defaults();
    let mut stats = UserStats::default();
    for day in ["2024-01-01", "2024-01-05", "2024-02-14"] {
        store.toggle_completion("m1", key(day), &mut stats);
    }

    let habit = store.get("m1").unwrap();
    assert_eq!(habit.streak(), 3);
    assert_eq!(habit.streak() as usize, habit.completions().len());
    assert_eq!(habit.current_run(key("2024-02-15")), 1);
}

#[test]
fn unknown_habit_toggle_is_a_no_op() {
    let mut store = HabitStore::with_defaults();
    let mut stats = UserStats::default();
    let before = store.clone();

    assert_eq!(store.toggle_completion("m99", key("2024-03-10"), &mut stats), None);
    assert_eq!(store, before);
    assert_eq!(stats.points, 0);
}

#[test]
fn reorder_swaps_neighbors_and_ignores_edges() {
    let mut store = HabitStore::with_defaults();
    let ids = |store: &HabitStore| {
        store
            .habits()
            .iter()
            .map(|habit| habit.id.clone())
            .collect::<Vec<_>>()
    };

    assert!(!store.reorder("m1", MoveDirection::Up));
    assert!(!store.reorder("m7", MoveDirection::Down));
    assert!(!store.reorder("nope", MoveDirection::Down));
    assert_eq!(ids(&store), ["m1", "m2", "m3", "m4", "m5", "m6", "m7"]);

    assert!(store.reorder("m2", MoveDirection::Up));
    assert_eq!(ids(&store), ["m2", "m1", "m3", "m4", "m5", "m6", "m7"]);
    assert!(store.reorder("m2", MoveDirection::Down));
    assert_eq!(ids(&store), ["m1", "m2", "m3", "m4", "m5", "m6", "m7"]);
}

#[test]
fn completions_in_range_is_inclusive_and_ordered() {
    let mut store = HabitStore::with_defaults();
    let mut stats = UserStats::default();
    for day in ["2024-03-01", "2024-03-04", "2024-03-09", "2024-03-10"] {
        store.toggle_completion("m4", key(day), &mut stats);
    }

    let in_range = store
        .completions_in_range("m4", key("2024-03-04"), key("2024-03-09"))
        .unwrap();
    assert_eq!(
        in_range.into_iter().collect::<Vec<_>>(),
        vec![key("2024-03-04"), key("2024-03-09")]
    );

    let reversed = store
        .completions_in_range("m4", key("2024-03-09"), key("2024-03-04"))
        .unwrap();
    assert!(reversed.is_empty());
    assert_eq!(
        store.completions_in_range("m99", key("2024-03-01"), key("2024-03-31")),
        None
    );
}

#[test]
fn month_stats_ignore_other_years() {
    let mut store = HabitStore::with_defaults();
    let mut stats = UserStats::default();
    for day in ["2024-02-01", "2024-02-29", "2023-02-10"] {
        store.toggle_completion("m2", key(day), &mut stats);
    }

    let february = month_stats(store.get("m2").unwrap(), 2024, 2).unwrap();
    assert_eq!(february.completed, 2);
    assert_eq!(february.days_in_month, 29);
    assert_eq!(february.percent, 7);
}

#[test]
fn weeks_start_on_saturday() {
    // 2024-03-13 is a Wednesday.
    let days = week_days(key("2024-03-13"), 0).unwrap();
    assert_eq!(days[0], key("2024-03-09"));
    assert_eq!(days[6], key("2024-03-15"));

    let previous = week_days(key("2024-03-13"), 1).unwrap();
    assert_eq!(previous[0], key("2024-03-02"));
}
