//! Application state root.
//!
//! # Responsibility
//! - Exclusively own every feature store, the stats record and preferences.
//! - Expose narrow mutation entry points per feature.
//! - Persist each changed slice right after the mutation that changed it.
//! - Serve derived views (progress, balance, dashboard) computed on read.
//!
//! # Invariants
//! - Mutations never fail from the caller's point of view: save errors are
//!   logged and the in-memory state stays authoritative.
//! - Derived values are never stored.

use crate::db::{open_db, open_db_in_memory};
use crate::engine::balance::{evaluate_balance, BalanceReport};
use crate::engine::calendar::{month_stats, week_days, MonthStats};
use crate::engine::progression::{Progress, StageLadder};
use crate::insight::provider::InsightContext;
use crate::model::date_key::DateKey;
use crate::model::entry::{EntryId, GratitudeEntry, JournalEntry};
use crate::model::habit::{Habit, HabitId};
use crate::model::stats::UserStats;
use crate::model::task::Task;
use crate::model::theme::{find_theme, resolve_theme, ColorTheme, ThemeMode};
use crate::repo::snapshot::{error_kind, load_snapshot, namespace, save_value};
use crate::repo::state_repo::{RepoError, RepoResult, SqliteStateRepository, StateRepository};
use crate::service::intuition::{GuessOutcome, IntuitionColor, IntuitionSession};
use crate::store::gratitude_store::GratitudeStore;
use crate::store::habit_store::{HabitStore, MoveDirection, NewHabit};
use crate::store::journal_store::JournalStore;
use crate::store::points::PointSink;
use crate::store::task_store::TaskStore;
use chrono::{Local, NaiveDate};
use log::{debug, error, info};
use rand::Rng;
use std::collections::BTreeSet;
use std::path::Path;

const ALL_NAMESPACES: [&str; 8] = [
    namespace::TASKS,
    namespace::HABITS,
    namespace::JOURNAL,
    namespace::GRATITUDE,
    namespace::GRATITUDE_SLOTS,
    namespace::STATS,
    namespace::THEME_ID,
    namespace::THEME_MODE,
];

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Read-only dashboard snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub points: i64,
    pub level: u32,
    pub stage_name: String,
    pub next_stage_name: Option<String>,
    pub progress_percent: f64,
    pub balance: BalanceReport,
    pub unlocked_badges: usize,
    pub total_completions: usize,
    pub today_tasks_total: usize,
    pub today_tasks_done: usize,
}

/// Owned application state over a state repository.
pub struct AppService<R: StateRepository> {
    repo: R,
    habits: HabitStore,
    tasks: TaskStore,
    journal: JournalStore,
    gratitude: GratitudeStore,
    stats: UserStats,
    theme_id: String,
    theme_mode: ThemeMode,
    ladder: StageLadder,
    intuition: IntuitionSession,
    clock: fn() -> NaiveDate,
}

impl AppService<SqliteStateRepository> {
    /// Opens the state database at `path` and loads every slice.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let conn = open_db(path)?;
        Ok(Self::load(SqliteStateRepository::new(conn)))
    }

    /// Opens an empty in-memory state database.
    pub fn open_in_memory() -> RepoResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self::load(SqliteStateRepository::new(conn)))
    }
}

impl<R: StateRepository> AppService<R> {
    /// Loads state from `repo`, degrading each slice to its default on
    /// failure. A repaired habit set is written back immediately.
    pub fn load(repo: R) -> Self {
        let snapshot = load_snapshot(&repo);
        let service = Self {
            repo,
            habits: snapshot.habits,
            tasks: snapshot.tasks,
            journal: snapshot.journal,
            gratitude: snapshot.gratitude,
            stats: snapshot.stats,
            theme_id: snapshot.theme_id,
            theme_mode: snapshot.theme_mode,
            ladder: StageLadder::default(),
            intuition: IntuitionSession::new(),
            clock: local_today,
        };

        if snapshot.habits_repaired {
            service.commit(&[namespace::HABITS]);
        }
        info!(
            "event=app_load module=service status=ok habits={} tasks={} journal={} gratitude={} habits_repaired={}",
            service.habits.habits().len(),
            service.tasks.tasks().len(),
            service.journal.entries().len(),
            service.gratitude.entries().len(),
            snapshot.habits_repaired
        );
        service
    }

    /// Replaces the source of "today" (local calendar by default).
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_ladder(mut self, ladder: StageLadder) -> Self {
        self.ladder = ladder;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn today(&self) -> DateKey {
        DateKey::from_date((self.clock)())
    }

    /// Writes every slice. Returns the first failure.
    pub fn save_all(&self) -> RepoResult<()> {
        for namespace in ALL_NAMESPACES {
            self.save_slice(namespace)?;
        }
        Ok(())
    }

    fn save_slice(&self, ns: &str) -> RepoResult<()> {
        match ns {
            namespace::TASKS => save_value(&self.repo, ns, self.tasks.tasks()),
            namespace::HABITS => save_value(&self.repo, ns, self.habits.habits()),
            namespace::JOURNAL => save_value(&self.repo, ns, self.journal.entries()),
            namespace::GRATITUDE => save_value(&self.repo, ns, self.gratitude.entries()),
            namespace::GRATITUDE_SLOTS => save_value(&self.repo, ns, &self.gratitude.slots()),
            namespace::STATS => save_value(&self.repo, ns, &self.stats),
            namespace::THEME_ID => save_value(&self.repo, ns, &self.theme_id),
            namespace::THEME_MODE => save_value(&self.repo, ns, &self.theme_mode),
            other => Err(RepoError::InvalidNamespace(other.to_string())),
        }
    }

    fn commit(&self, namespaces: &[&str]) {
        for namespace in namespaces {
            match self.save_slice(namespace) {
                Ok(()) => debug!("event=state_save module=service status=ok namespace={namespace}"),
                Err(err) => error!(
                    "event=state_save module=service status=error namespace={} error_kind={}",
                    namespace,
                    error_kind(&err)
                ),
            }
        }
    }

    // ---- points -------------------------------------------------------

    /// The single points entry point exposed to features without a store.
    pub fn add_points(&mut self, delta: i64) {
        self.stats.add_points(delta);
        self.commit(&[namespace::STATS]);
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    // ---- habits -------------------------------------------------------

    pub fn habits(&self) -> &[Habit] {
        self.habits.habits()
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.get(id)
    }

    /// Toggles a habit on `date`; `None` for unknown habits.
    pub fn toggle_habit(&mut self, id: &str, date: DateKey) -> Option<bool> {
        let completed = self
            .habits
            .toggle_completion(id, date, &mut self.stats)?;
        debug!(
            "event=habit_toggle module=service status=ok habit_id={} completed={}",
            id, completed
        );
        self.commit(&[namespace::HABITS, namespace::STATS]);
        Some(completed)
    }

    pub fn toggle_habit_today(&mut self, id: &str) -> Option<bool> {
        let today = self.today();
        self.toggle_habit(id, today)
    }

    pub fn move_habit(&mut self, id: &str, direction: MoveDirection) -> bool {
        let moved = self.habits.reorder(id, direction);
        if moved {
            self.commit(&[namespace::HABITS]);
        }
        moved
    }

    pub fn add_habit(&mut self, request: NewHabit) -> Option<HabitId> {
        let id = self.habits.add(request)?;
        self.commit(&[namespace::HABITS]);
        Some(id)
    }

    pub fn remove_habit(&mut self, id: &str) -> bool {
        let removed = self.habits.remove(id);
        if removed {
            self.commit(&[namespace::HABITS]);
        }
        removed
    }

    pub fn set_habit_active(&mut self, id: &str, active: bool) -> bool {
        let changed = self.habits.set_active(id, active);
        if changed {
            self.commit(&[namespace::HABITS]);
        }
        changed
    }

    pub fn reset_habits(&mut self) {
        self.habits.reset_to_defaults();
        self.commit(&[namespace::HABITS]);
    }

    pub fn completions_in_range(
        &self,
        id: &str,
        start: DateKey,
        end: DateKey,
    ) -> Option<BTreeSet<DateKey>> {
        self.habits.completions_in_range(id, start, end)
    }

    pub fn month_stats(&self, id: &str, year: i32, month: u32) -> Option<MonthStats> {
        month_stats(self.habits.get(id)?, year, month)
    }

    /// Days of the Saturday-starting week `weeks_back` weeks before today;
    /// `None` past the start of the calendar.
    pub fn week_days(&self, weeks_back: u32) -> Option<[DateKey; 7]> {
        week_days(self.today(), weeks_back)
    }

    // ---- planner ------------------------------------------------------

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn tasks_for_date(&self, date: &DateKey) -> Vec<&Task> {
        self.tasks.for_date(date)
    }

    pub fn add_task(&mut self, title: &str, date: DateKey) -> Option<EntryId> {
        let id = self.tasks.add(title, date, &mut self.stats)?;
        self.commit(&[namespace::TASKS, namespace::STATS]);
        Some(id)
    }

    pub fn add_task_today(&mut self, title: &str) -> Option<EntryId> {
        let today = self.today();
        self.add_task(title, today)
    }

    pub fn toggle_task(&mut self, id: EntryId) -> Option<bool> {
        let completed = self.tasks.toggle(id, &mut self.stats)?;
        self.commit(&[namespace::TASKS, namespace::STATS]);
        Some(completed)
    }

    pub fn delete_task(&mut self, id: EntryId) -> bool {
        let deleted = self.tasks.delete(id);
        if deleted {
            self.commit(&[namespace::TASKS]);
        }
        deleted
    }

    // ---- journal ------------------------------------------------------

    pub fn journal_entries(&self) -> &[JournalEntry] {
        self.journal.entries()
    }

    pub fn is_journal_releasing(&self, id: EntryId) -> bool {
        self.journal.is_releasing(id)
    }

    pub fn add_journal_entry(&mut self, content: &str) -> Option<EntryId> {
        let today = (self.clock)();
        let id = self.journal.add(content, today, &mut self.stats)?;
        self.commit(&[namespace::JOURNAL, namespace::STATS]);
        Some(id)
    }

    /// Starts releasing an entry; the caller finishes it after its delay.
    pub fn begin_journal_release(&mut self, id: EntryId) -> bool {
        let started = self.journal.begin_release(id, &mut self.stats);
        if started {
            self.commit(&[namespace::STATS]);
        }
        started
    }

    pub fn finish_journal_release(&mut self, id: EntryId) -> bool {
        let finished = self.journal.finish_release(id);
        if finished {
            self.commit(&[namespace::JOURNAL]);
        }
        finished
    }

    pub fn delete_journal_entry(&mut self, id: EntryId) -> bool {
        let deleted = self.journal.delete(id);
        if deleted {
            self.commit(&[namespace::JOURNAL]);
        }
        deleted
    }

    // ---- gratitude ----------------------------------------------------

    pub fn gratitude_entries(&self) -> &[GratitudeEntry] {
        self.gratitude.entries()
    }

    pub fn gratitude_slots(&self) -> u8 {
        self.gratitude.slots()
    }

    pub fn add_gratitude(&mut self, items: &[String]) -> Option<EntryId> {
        let today = (self.clock)();
        let id = self.gratitude.add(items, today, &mut self.stats)?;
        self.commit(&[namespace::GRATITUDE, namespace::STATS]);
        Some(id)
    }

    pub fn delete_gratitude(&mut self, id: EntryId) -> bool {
        let deleted = self.gratitude.delete(id);
        if deleted {
            self.commit(&[namespace::GRATITUDE]);
        }
        deleted
    }

    pub fn adjust_gratitude_slots(&mut self, delta: i32) -> u8 {
        let slots = self.gratitude.adjust_slots(delta);
        self.commit(&[namespace::GRATITUDE_SLOTS]);
        slots
    }

    // ---- intuition game -----------------------------------------------

    pub fn start_intuition_round(&mut self, rng: &mut impl Rng) {
        self.intuition.start_round(rng);
    }

    pub fn intuition_streak(&self) -> u32 {
        self.intuition.consecutive_correct()
    }

    /// Resolves the open round; `None` when no round is open.
    pub fn guess_intuition(
        &mut self,
        guess: IntuitionColor,
    ) -> Option<(IntuitionColor, GuessOutcome)> {
        let resolved = self.intuition.guess(guess, &mut self.stats)?;
        self.commit(&[namespace::STATS]);
        Some(resolved)
    }

    // ---- theme --------------------------------------------------------

    pub fn theme_id(&self) -> &str {
        &self.theme_id
    }

    /// Theme used for display; unknown stored ids resolve to the default.
    pub fn theme(&self) -> &'static ColorTheme {
        resolve_theme(&self.theme_id)
    }

    /// Selects a catalog theme. Unknown ids are rejected.
    pub fn set_theme(&mut self, id: &str) -> bool {
        let Some(theme) = find_theme(id) else {
            return false;
        };
        self.theme_id = theme.id.to_string();
        self.commit(&[namespace::THEME_ID]);
        true
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme_mode = mode;
        self.commit(&[namespace::THEME_MODE]);
    }

    pub fn toggle_theme_mode(&mut self) -> ThemeMode {
        self.set_theme_mode(self.theme_mode.toggled());
        self.theme_mode
    }

    // ---- derived views ------------------------------------------------

    pub fn ladder(&self) -> &StageLadder {
        &self.ladder
    }

    pub fn progress(&self) -> Progress<'_> {
        self.ladder.progress(self.stats.points)
    }

    pub fn balance(&self) -> BalanceReport {
        evaluate_balance(self.habits.habits())
    }

    /// Context handed to the advisory text provider.
    pub fn insight_context(&self) -> InsightContext {
        InsightContext {
            active_habit_names: self.habits.active().map(|habit| habit.name.clone()).collect(),
            total_completions: self.habits.total_completions(),
            level: self.stats.level,
        }
    }

    pub fn dashboard(&self) -> DashboardSummary {
        let progress = self.progress();
        let today = self.today();
        let today_tasks = self.tasks.for_date(&today);

        DashboardSummary {
            points: self.stats.points,
            level: self.stats.level,
            stage_name: progress.current.name.clone(),
            next_stage_name: progress.next.map(|stage| stage.name.clone()),
            progress_percent: progress.percent,
            balance: self.balance(),
            unlocked_badges: self.stats.unlocked_badge_count(),
            total_completions: self.habits.total_completions(),
            today_tasks_total: today_tasks.len(),
            today_tasks_done: today_tasks.iter().filter(|task| task.completed).count(),
        }
    }
}
