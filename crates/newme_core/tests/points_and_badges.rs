use chrono::NaiveDate;
use newme_core::model::stats::{BADGE_HIGH_FOCUS_ID, BADGE_STARTER_ID};
use newme_core::service::intuition::{IntuitionSession, HIGH_FOCUS_STREAK};
use newme_core::store::gratitude_store::GratitudeStore;
use newme_core::store::journal_store::JournalStore;
use newme_core::store::task_store::TaskStore;
use newme_core::{DateKey, UserStats};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[test]
fn fresh_stats_start_at_level_one_with_starter_badge() {
    let stats = UserStats::default();
    assert_eq!(stats.points, 0);
    assert_eq!(stats.level, 1);
    assert!(stats.is_unlocked(BADGE_STARTER_ID));
    assert!(!stats.is_unlocked(BADGE_HIGH_FOCUS_ID));
}

#[test]
fn wrong_then_right_guess_nets_zero() {
    let mut session = IntuitionSession::new();
    let mut stats = UserStats::default();

    let wrong = session.score(false, &mut stats);
    assert_eq!(wrong.delta, -1);
    let right = session.score(true, &mut stats);
    assert_eq!(right.delta, 1);

    assert_eq!(stats.points, 0);
    assert_eq!(session.consecutive_correct(), 1);
}

#[test]
fn three_correct_in_a_row_unlock_high_focus_once() {
    let mut session = IntuitionSession::new();
    let mut stats = UserStats::default();

    let outcomes: Vec<_> = (0..HIGH_FOCUS_STREAK + 1)
        .map(|_| session.score(true, &mut stats))
        .collect();

    assert!(!outcomes[0].badge_unlocked);
    assert!(!outcomes[1].badge_unlocked);
    assert!(outcomes[2].badge_unlocked);
    assert!(!outcomes[3].badge_unlocked);
    assert!(stats.is_unlocked(BADGE_HIGH_FOCUS_ID));
    assert_eq!(stats.points, 4);
}

#[test]
fn a_miss_resets_the_run_before_the_badge() {
    let mut session = IntuitionSession::new();
    let mut stats = UserStats::default();

    session.score(true, &mut stats);
    session.score(true, &mut stats);
    session.score(false, &mut stats);
    let outcome = session.score(true, &mut stats);

    assert_eq!(outcome.consecutive_correct, 1);
    assert!(!stats.is_unlocked(BADGE_HIGH_FOCUS_ID));
}

#[test]
fn task_awards_creation_and_first_completion_only() {
    let mut tasks = TaskStore::new(Vec::new());
    let mut stats = UserStats::default();
    let date = DateKey::from_date(day());

    let id = tasks.add("call mom", date, &mut stats).unwrap();
    assert_eq!(stats.points, 10);

    assert_eq!(tasks.toggle(id, &mut stats), Some(true));
    assert_eq!(stats.points, 25);
    assert_eq!(tasks.toggle(id, &mut stats), Some(false));
    assert_eq!(stats.points, 25);
    assert_eq!(tasks.toggle(id, &mut stats), Some(true));
    assert_eq!(stats.points, 40);

    assert!(tasks.add("   ", date, &mut stats).is_none());
    assert_eq!(stats.points, 40);
}

#[test]
fn journal_entry_and_release_award_separately() {
    let mut journal = JournalStore::new(Vec::new());
    let mut stats = UserStats::default();

    let id = journal.add("heavy thought", day(), &mut stats).unwrap();
    assert_eq!(stats.points, 20);

    assert!(journal.begin_release(id, &mut stats));
    assert!(!journal.begin_release(id, &mut stats));
    assert_eq!(stats.points, 30);

    assert!(journal.finish_release(id));
    assert!(journal.entries().is_empty());
}

#[test]
fn gratitude_pays_per_non_blank_item() {
    let mut gratitude = GratitudeStore::default();
    let mut stats = UserStats::default();
    let items = vec![
        " family ".to_string(),
        "   ".to_string(),
        "rain".to_string(),
    ];

    let id = gratitude.add(&items, day(), &mut stats).unwrap();
    assert_eq!(stats.points, 20);
    let saved = gratitude.entries().iter().find(|entry| entry.id == id).unwrap();
    assert_eq!(saved.items, ["family", "rain"]);
    assert_eq!(saved.date, "2024/06/01");

    assert!(gratitude.add(&["".to_string()], day(), &mut stats).is_none());
    assert_eq!(stats.points, 20);
}
