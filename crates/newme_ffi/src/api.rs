//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose feature actions and derived views to Dart via FRB.
//! - Own the single process-wide `AppService` and the daily insight cache.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures are reported in response envelopes, never as panics.
//! - Ids cross the boundary as strings; dates as `YYYY-MM-DD`.

use newme_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppService, DateKey, EnergyCenter, InsightContext, InsightError, InsightProvider,
    InsightService, InsightSource, IntuitionColor, MoveDirection, NewHabit, SqliteStateRepository,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use uuid::Uuid;

const STATE_DB_FILE_NAME: &str = "newme_state.sqlite3";
static STATE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static APP: OnceLock<Mutex<AppService<SqliteStateRepository>>> = OnceLock::new();
static INSIGHT: OnceLock<Mutex<InsightService>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory for rolling logs.
///
/// # FFI contract
/// - Sync call; may create the log directory.
/// - Idempotent for the same `level + log_dir`; other settings are rejected.
/// - Never panics; returns an empty string on success and the error message
///   otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created or affected record, when there is one.
    pub id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// One habit row as shown on the habits screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub icon: String,
    pub color: String,
    pub active: bool,
    pub streak: u32,
    pub completed_today: bool,
    /// `red`, `green` or `none`.
    pub status: String,
}

/// Monthly completion figures for one habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthStatsView {
    pub ok: bool,
    pub message: String,
    pub completed: u32,
    pub days_in_month: u32,
    pub percent: u32,
}

impl MonthStatsView {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            completed: 0,
            days_in_month: 0,
            percent: 0,
        }
    }
}

/// One Saturday-starting week for a habit. `completed[i]` belongs to `days[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitWeekView {
    pub ok: bool,
    pub message: String,
    pub days: Vec<String>,
    pub completed: Vec<bool>,
}

impl HabitWeekView {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            days: Vec::new(),
            completed: Vec::new(),
        }
    }
}

/// Date list envelope, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateListView {
    pub ok: bool,
    pub message: String,
    pub dates: Vec<String>,
}

impl DateListView {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            dates: Vec::new(),
        }
    }
}

/// One planner task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    /// `low|medium|high`.
    pub priority: String,
    /// `deep_focus|personal|social|health`.
    pub category: String,
    pub completed: bool,
    pub date: String,
    /// `morning|afternoon|evening`.
    pub time_slot: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
    pub ok: bool,
    pub message: String,
    pub items: Vec<TaskView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntryView {
    pub id: String,
    pub content: String,
    pub date: String,
    /// Release animation in progress; the entry disappears after finish.
    pub releasing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GratitudeEntryView {
    pub id: String,
    pub items: Vec<String>,
    pub date: String,
}

/// Gratitude slot count after an adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotsView {
    pub ok: bool,
    pub message: String,
    pub slots: u32,
}

/// Dashboard envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub ok: bool,
    pub message: String,
    pub points: i64,
    pub level: u32,
    pub stage_name: String,
    pub next_stage_name: Option<String>,
    pub progress_percent: f64,
    pub is_balanced: bool,
    pub lagging_habit_ids: Vec<String>,
    pub unlocked_badges: u32,
    pub today_tasks_total: u32,
    pub today_tasks_done: u32,
    pub theme_id: String,
    pub theme_mode: String,
}

impl DashboardView {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            points: 0,
            level: 1,
            stage_name: String::new(),
            next_stage_name: None,
            progress_percent: 0.0,
            is_balanced: true,
            lagging_habit_ids: Vec::new(),
            unlocked_badges: 0,
            today_tasks_total: 0,
            today_tasks_done: 0,
            theme_id: String::new(),
            theme_mode: String::new(),
        }
    }
}

/// Result of one intuition guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessView {
    pub ok: bool,
    pub message: String,
    pub hidden_color: Option<String>,
    pub correct: bool,
    pub points_delta: i64,
    pub consecutive_correct: u32,
    pub badge_unlocked: bool,
}

impl GuessView {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            hidden_color: None,
            correct: false,
            points_delta: 0,
            consecutive_correct: 0,
            badge_unlocked: false,
        }
    }
}

/// What the host needs to request today's advisory text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightRequestView {
    pub ok: bool,
    pub message: String,
    /// Today's text when already settled; the host should skip its request.
    pub cached_text: Option<String>,
    pub active_habit_names: Vec<String>,
    pub total_completions: u32,
    pub level: u32,
}

/// Displayable advisory text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightView {
    pub ok: bool,
    pub message: String,
    pub text: String,
    /// `cached|provider|empty_response|fallback`.
    pub source: String,
}

/// Dashboard snapshot: points, stage progress, balance and today's tasks.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures return `ok=false` with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard() -> DashboardView {
    let result = with_app(|app| {
        let summary = app.dashboard();
        DashboardView {
            ok: true,
            message: String::new(),
            points: summary.points,
            level: summary.level,
            stage_name: summary.stage_name,
            next_stage_name: summary.next_stage_name,
            progress_percent: summary.progress_percent,
            is_balanced: summary.balance.is_overall_balanced,
            lagging_habit_ids: summary
                .balance
                .lagging()
                .map(|item| item.habit_id.clone())
                .collect(),
            unlocked_badges: to_u32(summary.unlocked_badges),
            today_tasks_total: to_u32(summary.today_tasks_total),
            today_tasks_done: to_u32(summary.today_tasks_done),
            theme_id: app.theme().id.to_string(),
            theme_mode: app.theme_mode().as_str().to_string(),
        }
    });
    result.unwrap_or_else(|err| DashboardView::failure(format!("dashboard failed: {err}")))
}

/// Habits in display order with today's completion and balance status.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns an empty list when state cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_list() -> Vec<HabitView> {
    with_app(|app| {
        let today = app.today();
        let balance = app.balance();
        app.habits()
            .iter()
            .map(|habit| HabitView {
                id: habit.id.clone(),
                name: habit.name.clone(),
                category: habit.category.label().to_string(),
                icon: habit.icon.clone(),
                color: habit.color.clone(),
                active: habit.active,
                streak: habit.streak(),
                completed_today: habit.is_completed_on(&today),
                status: balance
                    .get(&habit.id)
                    .map(|item| item.status.as_str())
                    .unwrap_or("none")
                    .to_string(),
            })
            .collect::<Vec<_>>()
    })
    .unwrap_or_default()
}

/// Toggles a habit on `date` (`YYYY-MM-DD`), or today when absent.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Message distinguishes "completed" from "unmarked".
#[flutter_rust_bridge::frb(sync)]
pub fn habit_toggle(habit_id: String, date: Option<String>) -> ActionResponse {
    let date = match date.as_deref().map(DateKey::parse).transpose() {
        Ok(date) => date,
        Err(err) => return ActionResponse::failure(format!("habit_toggle failed: {err}")),
    };
    let result = with_app(|app| {
        let date = date.unwrap_or_else(|| app.today());
        app.toggle_habit(&habit_id, date)
    });
    match result {
        Ok(Some(true)) => ActionResponse::success("Habit completed.", Some(habit_id)),
        Ok(Some(false)) => ActionResponse::success("Habit unmarked.", Some(habit_id)),
        Ok(None) => ActionResponse::failure(format!("habit_toggle failed: unknown habit `{habit_id}`")),
        Err(err) => ActionResponse::failure(format!("habit_toggle failed: {err}")),
    }
}

/// Moves a habit one slot up or down. Edge moves succeed as no-ops.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_move(habit_id: String, up: bool) -> ActionResponse {
    let direction = if up {
        MoveDirection::Up
    } else {
        MoveDirection::Down
    };
    match with_app(|app| app.move_habit(&habit_id, direction)) {
        Ok(true) => ActionResponse::success("Habit moved.", Some(habit_id)),
        Ok(false) => ActionResponse::success("Habit unchanged.", Some(habit_id)),
        Err(err) => ActionResponse::failure(format!("habit_move failed: {err}")),
    }
}

/// Appends a custom habit.
///
/// - `category`: energy-center label (`Solar Plexus`) or id (`solar_plexus`).
/// - `color`: color tag; the center's tag when absent.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the generated habit id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_add(
    name: String,
    category: String,
    icon: String,
    color: Option<String>,
) -> ActionResponse {
    let Some(category) = EnergyCenter::parse(&category) else {
        return ActionResponse::failure(format!("habit_add failed: unknown category `{category}`"));
    };
    let request = NewHabit {
        name,
        category,
        icon,
        color,
    };
    match with_app(|app| app.add_habit(request)) {
        Ok(Some(id)) => ActionResponse::success("Habit added.", Some(id)),
        Ok(None) => ActionResponse::failure("habit_add failed: name is blank"),
        Err(err) => ActionResponse::failure(format!("habit_add failed: {err}")),
    }
}

/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; unknown ids return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_remove(habit_id: String) -> ActionResponse {
    match with_app(|app| app.remove_habit(&habit_id)) {
        Ok(true) => ActionResponse::success("Habit removed.", Some(habit_id)),
        Ok(false) => ActionResponse::failure(format!("habit_remove failed: unknown habit `{habit_id}`")),
        Err(err) => ActionResponse::failure(format!("habit_remove failed: {err}")),
    }
}

/// Shows or hides a habit without touching its completions.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; unknown ids and unchanged flags return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_set_active(habit_id: String, active: bool) -> ActionResponse {
    match with_app(|app| app.set_habit_active(&habit_id, active)) {
        Ok(true) if active => ActionResponse::success("Habit activated.", Some(habit_id)),
        Ok(true) => ActionResponse::success("Habit paused.", Some(habit_id)),
        Ok(false) => {
            ActionResponse::failure(format!(
                "habit_set_active failed: habit `{habit_id}` is unknown or already in that state"
            ))
        }
        Err(err) => ActionResponse::failure(format!("habit_set_active failed: {err}")),
    }
}

/// Replaces every habit with the canonical seven, dropping all completions.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_reset() -> ActionResponse {
    match with_app(|app| app.reset_habits()) {
        Ok(()) => ActionResponse::success("Habits reset.", None),
        Err(err) => ActionResponse::failure(format!("habit_reset failed: {err}")),
    }
}

/// Completion figures for one habit in one calendar month.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; an unknown habit or invalid month returns `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_month_stats(habit_id: String, year: i32, month: u32) -> MonthStatsView {
    match with_app(|app| app.month_stats(&habit_id, year, month)) {
        Ok(Some(stats)) => MonthStatsView {
            ok: true,
            message: String::new(),
            completed: to_u32(stats.completed),
            days_in_month: stats.days_in_month,
            percent: stats.percent,
        },
        Ok(None) => MonthStatsView::failure(format!(
            "habit_month_stats failed: unknown habit `{habit_id}` or month {year}-{month}"
        )),
        Err(err) => MonthStatsView::failure(format!("habit_month_stats failed: {err}")),
    }
}

/// Saturday-starting week `weeks_back` weeks before today, with the habit's
/// completion for each day.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; a week before the calendar start returns `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_week(habit_id: String, weeks_back: u32) -> HabitWeekView {
    let result = with_app(|app| {
        let habit = app.habit(&habit_id)?;
        let days = app.week_days(weeks_back)?;
        Some(HabitWeekView {
            ok: true,
            message: String::new(),
            days: days.iter().map(ToString::to_string).collect(),
            completed: days.iter().map(|day| habit.is_completed_on(day)).collect(),
        })
    });
    match result {
        Ok(Some(view)) => view,
        Ok(None) => HabitWeekView::failure(format!(
            "habit_week failed: unknown habit `{habit_id}` or week out of range"
        )),
        Err(err) => HabitWeekView::failure(format!("habit_week failed: {err}")),
    }
}

/// Completed days of a habit within `start..=end`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; malformed dates or an unknown habit return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_completions(habit_id: String, start: String, end: String) -> DateListView {
    let (start, end) = match (DateKey::parse(&start), DateKey::parse(&end)) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(err), _) | (_, Err(err)) => {
            return DateListView::failure(format!("habit_completions failed: {err}"))
        }
    };
    match with_app(|app| app.completions_in_range(&habit_id, start, end)) {
        Ok(Some(dates)) => DateListView {
            ok: true,
            message: String::new(),
            dates: dates.iter().map(ToString::to_string).collect(),
        },
        Ok(None) => DateListView::failure(format!(
            "habit_completions failed: unknown habit `{habit_id}`"
        )),
        Err(err) => DateListView::failure(format!("habit_completions failed: {err}")),
    }
}

/// Planner tasks for `date` (`YYYY-MM-DD`), or today when absent.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; a malformed date returns `ok=false` with no items.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list(date: Option<String>) -> TaskListView {
    let date = match date.as_deref().map(DateKey::parse).transpose() {
        Ok(date) => date,
        Err(err) => {
            return TaskListView {
                ok: false,
                message: format!("task_list failed: {err}"),
                items: Vec::new(),
            }
        }
    };
    let result = with_app(|app| {
        let date = date.unwrap_or_else(|| app.today());
        app.tasks_for_date(&date)
            .into_iter()
            .map(|task| TaskView {
                id: task.id.to_string(),
                title: task.title.clone(),
                priority: task.priority.as_str().to_string(),
                category: task.category.as_str().to_string(),
                completed: task.completed,
                date: task.date.to_string(),
                time_slot: task.time_slot.as_str().to_string(),
                created_at: task.created_at,
            })
            .collect::<Vec<_>>()
    });
    match result {
        Ok(items) => TaskListView {
            ok: true,
            message: String::new(),
            items,
        },
        Err(err) => TaskListView {
            ok: false,
            message: format!("task_list failed: {err}"),
            items: Vec::new(),
        },
    }
}

/// Adds a planner task for `date`, or today when absent.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the created task id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(title: String, date: Option<String>) -> ActionResponse {
    let date = match date.as_deref().map(DateKey::parse).transpose() {
        Ok(date) => date,
        Err(err) => return ActionResponse::failure(format!("task_add failed: {err}")),
    };
    let result = with_app(|app| {
        let date = date.unwrap_or_else(|| app.today());
        app.add_task(&title, date)
    });
    match result {
        Ok(Some(id)) => ActionResponse::success("Task added.", Some(id.to_string())),
        Ok(None) => ActionResponse::failure("task_add failed: title is blank"),
        Err(err) => ActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; malformed or unknown ids return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(task_id: String) -> ActionResponse {
    let id = match parse_entry_id(&task_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(format!("task_toggle failed: {message}")),
    };
    match with_app(|app| app.toggle_task(id)) {
        Ok(Some(true)) => ActionResponse::success("Task completed.", Some(task_id)),
        Ok(Some(false)) => ActionResponse::success("Task reopened.", Some(task_id)),
        Ok(None) => ActionResponse::failure(format!("task_toggle failed: unknown task `{task_id}`")),
        Err(err) => ActionResponse::failure(format!("task_toggle failed: {err}")),
    }
}

/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; malformed or unknown ids return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task_id: String) -> ActionResponse {
    let id = match parse_entry_id(&task_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(format!("task_delete failed: {message}")),
    };
    match with_app(|app| app.delete_task(id)) {
        Ok(true) => ActionResponse::success("Task deleted.", Some(task_id)),
        Ok(false) => ActionResponse::failure(format!("task_delete failed: unknown task `{task_id}`")),
        Err(err) => ActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Journal entries, newest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns an empty list when state cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_list() -> Vec<JournalEntryView> {
    with_app(|app| {
        app.journal_entries()
            .iter()
            .map(|entry| JournalEntryView {
                id: entry.id.to_string(),
                content: entry.content.clone(),
                date: entry.date.clone(),
                releasing: app.is_journal_releasing(entry.id),
            })
            .collect::<Vec<_>>()
    })
    .unwrap_or_default()
}

/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the created entry id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_add(content: String) -> ActionResponse {
    match with_app(|app| app.add_journal_entry(&content)) {
        Ok(Some(id)) => ActionResponse::success("Journal entry saved.", Some(id.to_string())),
        Ok(None) => ActionResponse::failure("journal_add failed: content is blank"),
        Err(err) => ActionResponse::failure(format!("journal_add failed: {err}")),
    }
}

/// Starts the release animation for an entry and awards its points once.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; a second begin for the same entry returns `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_release_begin(entry_id: String) -> ActionResponse {
    let id = match parse_entry_id(&entry_id) {
        Ok(id) => id,
        Err(message) => {
            return ActionResponse::failure(format!("journal_release_begin failed: {message}"))
        }
    };
    match with_app(|app| app.begin_journal_release(id)) {
        Ok(true) => ActionResponse::success("Release started.", Some(entry_id)),
        Ok(false) => ActionResponse::failure(format!(
            "journal_release_begin failed: entry `{entry_id}` is unknown or already releasing"
        )),
        Err(err) => ActionResponse::failure(format!("journal_release_begin failed: {err}")),
    }
}

/// Removes a released entry once the UI delay has elapsed.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; entries not releasing return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_release_finish(entry_id: String) -> ActionResponse {
    let id = match parse_entry_id(&entry_id) {
        Ok(id) => id,
        Err(message) => {
            return ActionResponse::failure(format!("journal_release_finish failed: {message}"))
        }
    };
    match with_app(|app| app.finish_journal_release(id)) {
        Ok(true) => ActionResponse::success("Entry released.", Some(entry_id)),
        Ok(false) => ActionResponse::failure(format!(
            "journal_release_finish failed: entry `{entry_id}` is not releasing"
        )),
        Err(err) => ActionResponse::failure(format!("journal_release_finish failed: {err}")),
    }
}

/// Deletes an entry without awarding release points.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; malformed or unknown ids return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_delete(entry_id: String) -> ActionResponse {
    let id = match parse_entry_id(&entry_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(format!("journal_delete failed: {message}")),
    };
    match with_app(|app| app.delete_journal_entry(id)) {
        Ok(true) => ActionResponse::success("Journal entry deleted.", Some(entry_id)),
        Ok(false) => {
            ActionResponse::failure(format!("journal_delete failed: unknown entry `{entry_id}`"))
        }
        Err(err) => ActionResponse::failure(format!("journal_delete failed: {err}")),
    }
}

/// Gratitude entries, newest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns an empty list when state cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn gratitude_list() -> Vec<GratitudeEntryView> {
    with_app(|app| {
        app.gratitude_entries()
            .iter()
            .map(|entry| GratitudeEntryView {
                id: entry.id.to_string(),
                items: entry.items.clone(),
                date: entry.date.clone(),
            })
            .collect::<Vec<_>>()
    })
    .unwrap_or_default()
}

/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; blank items are dropped before saving.
/// - Returns the created entry id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn gratitude_add(items: Vec<String>) -> ActionResponse {
    match with_app(|app| app.add_gratitude(&items)) {
        Ok(Some(id)) => ActionResponse::success("Gratitude saved.", Some(id.to_string())),
        Ok(None) => ActionResponse::failure("gratitude_add failed: every item is blank"),
        Err(err) => ActionResponse::failure(format!("gratitude_add failed: {err}")),
    }
}

/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; malformed or unknown ids return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn gratitude_delete(entry_id: String) -> ActionResponse {
    let id = match parse_entry_id(&entry_id) {
        Ok(id) => id,
        Err(message) => {
            return ActionResponse::failure(format!("gratitude_delete failed: {message}"))
        }
    };
    match with_app(|app| app.delete_gratitude(id)) {
        Ok(true) => ActionResponse::success("Gratitude deleted.", Some(entry_id)),
        Ok(false) => {
            ActionResponse::failure(format!("gratitude_delete failed: unknown entry `{entry_id}`"))
        }
        Err(err) => ActionResponse::failure(format!("gratitude_delete failed: {err}")),
    }
}

/// Current number of gratitude input slots.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns 0 when state cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn gratitude_slots() -> u32 {
    with_app(|app| u32::from(app.gratitude_slots())).unwrap_or_default()
}

/// Grows or shrinks the gratitude slot count, clamped to its bounds.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns the clamped count.
#[flutter_rust_bridge::frb(sync)]
pub fn gratitude_slots_adjust(delta: i32) -> SlotsView {
    match with_app(|app| app.adjust_gratitude_slots(delta)) {
        Ok(slots) => SlotsView {
            ok: true,
            message: String::new(),
            slots: u32::from(slots),
        },
        Err(err) => SlotsView {
            ok: false,
            message: format!("gratitude_slots_adjust failed: {err}"),
            slots: 0,
        },
    }
}

/// Hides a new color for the intuition game.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; replaces any open round.
#[flutter_rust_bridge::frb(sync)]
pub fn intuition_start() -> ActionResponse {
    match with_app(|app| app.start_intuition_round(&mut rand::thread_rng())) {
        Ok(()) => ActionResponse::success("Round started.", None),
        Err(err) => ActionResponse::failure(format!("intuition_start failed: {err}")),
    }
}

/// Resolves the open round with `color` (`blue|red|green|yellow`).
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; no open round or an unknown color returns `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn intuition_guess(color: String) -> GuessView {
    let Some(guess) = IntuitionColor::parse(&color) else {
        return GuessView::failure(format!("intuition_guess failed: unknown color `{color}`"));
    };
    match with_app(|app| app.guess_intuition(guess)) {
        Ok(Some((hidden, outcome))) => GuessView {
            ok: true,
            message: if outcome.correct {
                "Correct.".to_string()
            } else {
                "Not this time.".to_string()
            },
            hidden_color: Some(hidden.as_str().to_string()),
            correct: outcome.correct,
            points_delta: outcome.delta,
            consecutive_correct: outcome.consecutive_correct,
            badge_unlocked: outcome.badge_unlocked,
        },
        Ok(None) => GuessView::failure("intuition_guess failed: no round in progress"),
        Err(err) => GuessView::failure(format!("intuition_guess failed: {err}")),
    }
}

/// Context for today's advisory request, or the settled text when the
/// host has nothing left to fetch today.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures return `ok=false` with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn insight_request() -> InsightRequestView {
    let result = with_app(|app| (app.today(), app.insight_context()));
    let (today, context) = match result {
        Ok(found) => found,
        Err(err) => {
            return InsightRequestView {
                ok: false,
                message: format!("insight_request failed: {err}"),
                cached_text: None,
                active_habit_names: Vec::new(),
                total_completions: 0,
                level: 1,
            }
        }
    };
    let cached_text = with_insight(|insight| insight.cached_for(today.date()).map(str::to_string));
    InsightRequestView {
        ok: true,
        message: String::new(),
        cached_text,
        active_habit_names: context.active_habit_names,
        total_completions: to_u32(context.total_completions),
        level: context.level,
    }
}

/// Settles today's advisory text from the host's answer.
///
/// `reply` is the provider's text, or `None` when the host request failed.
/// An already settled day keeps its text and ignores `reply`.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; always returns displayable text.
#[flutter_rust_bridge::frb(sync)]
pub fn insight_resolve(reply: Option<String>) -> InsightView {
    let today = match with_app(|app| app.today()) {
        Ok(today) => today.date(),
        Err(err) => {
            return InsightView {
                ok: false,
                message: format!("insight_resolve failed: {err}"),
                text: String::new(),
                source: String::new(),
            }
        }
    };
    let insight = with_insight(|insight| {
        if let Some(text) = insight.cached_for(today) {
            return (text.to_string(), InsightSource::Cached);
        }
        let outcome =
            reply.ok_or_else(|| InsightError::Unavailable("host reported no answer".to_string()));
        let settled = insight.settle(today, outcome);
        (settled.text, settled.source)
    });
    InsightView {
        ok: true,
        message: String::new(),
        text: insight.0,
        source: insight.1.as_str().to_string(),
    }
}

/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; unknown theme ids return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_set(theme_id: String) -> ActionResponse {
    match with_app(|app| app.set_theme(theme_id.trim())) {
        Ok(true) => ActionResponse::success("Theme applied.", Some(theme_id)),
        Ok(false) => ActionResponse::failure(format!("theme_set failed: unknown theme `{theme_id}`")),
        Err(err) => ActionResponse::failure(format!("theme_set failed: {err}")),
    }
}

/// Flips light/dark mode and returns the new mode name.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns an empty string when state cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_mode_toggle() -> String {
    with_app(|app| app.toggle_theme_mode().as_str().to_string()).unwrap_or_default()
}

/// Marks answers the host fetched itself; never asked directly.
struct HostRelay;

impl InsightProvider for HostRelay {
    fn provider_id(&self) -> &str {
        "host"
    }

    fn generate(&self, _context: &InsightContext) -> Result<String, InsightError> {
        Err(InsightError::Unavailable(
            "requests are made by the host".to_string(),
        ))
    }
}

fn parse_entry_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|err| format!("invalid id `{raw}`: {err}"))
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn resolve_state_db_path() -> PathBuf {
    STATE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("NEWME_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STATE_DB_FILE_NAME)
        })
        .clone()
}

fn app() -> Result<&'static Mutex<AppService<SqliteStateRepository>>, String> {
    if let Some(app) = APP.get() {
        return Ok(app);
    }
    let service = AppService::open(resolve_state_db_path())
        .map_err(|err| format!("state DB open failed: {err}"))?;
    Ok(APP.get_or_init(|| Mutex::new(service)))
}

fn with_app<T>(f: impl FnOnce(&mut AppService<SqliteStateRepository>) -> T) -> Result<T, String> {
    let mut guard = app()?.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(f(&mut guard))
}

fn with_insight<T>(f: impl FnOnce(&mut InsightService) -> T) -> T {
    let insight = INSIGHT.get_or_init(|| Mutex::new(InsightService::new(Arc::new(HostRelay))));
    let mut guard = insight.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, dashboard, gratitude_add, gratitude_delete, gratitude_list,
        gratitude_slots, gratitude_slots_adjust, habit_add, habit_completions, habit_list,
        habit_month_stats, habit_move, habit_remove, habit_reset, habit_set_active, habit_toggle,
        habit_week, init_logging, insight_request, insight_resolve, intuition_guess, journal_add,
        journal_delete, journal_list, journal_release_begin, journal_release_finish, ping,
        task_add, task_delete, task_list, task_toggle, theme_set,
    };
    use std::sync::{Mutex, MutexGuard, PoisonError};

    // Tests that rewrite the habit set run one at a time.
    static HABITS: Mutex<()> = Mutex::new(());

    fn habits_guard() -> MutexGuard<'static, ()> {
        HABITS.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn add_scratch_habit(name: &str) -> String {
        let created = habit_add(name.to_string(), "heart".to_string(), "*".to_string(), None);
        assert!(created.ok, "{}", created.message);
        created.id.unwrap()
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/newme-logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn dashboard_reports_a_stage() {
        let view = dashboard();
        assert!(view.ok, "{}", view.message);
        assert!(!view.stage_name.is_empty());
        assert!((0.0..=100.0).contains(&view.progress_percent));
    }

    #[test]
    fn habit_list_always_has_the_canonical_set() {
        let _guard = habits_guard();
        assert!(habit_list().len() >= 7);
    }

    #[test]
    fn habit_toggle_twice_on_a_fixed_day_restores_state() {
        let _guard = habits_guard();
        let habit_id = habit_list()[0].id.clone();
        let date = Some("2001-02-03".to_string());

        let first = habit_toggle(habit_id.clone(), date.clone());
        let second = habit_toggle(habit_id, date);
        assert!(first.ok, "{}", first.message);
        assert!(second.ok, "{}", second.message);
        assert_ne!(first.message, second.message);
    }

    #[test]
    fn habit_toggle_rejects_bad_input() {
        let _guard = habits_guard();
        assert!(!habit_toggle("no-such-habit".to_string(), None).ok);
        let habit_id = habit_list()[0].id.clone();
        assert!(!habit_toggle(habit_id, Some("2024-13-40".to_string())).ok);
    }

    #[test]
    fn habit_move_at_edge_is_a_successful_no_op() {
        let _guard = habits_guard();
        let habit_id = habit_list()[0].id.clone();
        let response = habit_move(habit_id, true);
        assert!(response.ok);
    }

    #[test]
    fn custom_habit_can_be_paused_and_removed() {
        let _guard = habits_guard();
        let habit_id = add_scratch_habit("Evening walk");
        let listed = habit_list();
        let row = listed.iter().find(|habit| habit.id == habit_id).unwrap();
        assert_eq!(row.category, "Heart");
        assert_eq!(row.color, "emerald");

        assert_eq!(habit_set_active(habit_id.clone(), false).message, "Habit paused.");
        assert!(!habit_list().iter().any(|habit| habit.id == habit_id && habit.active));

        assert!(habit_remove(habit_id.clone()).ok);
        assert!(!habit_remove(habit_id.clone()).ok);
        assert!(!habit_set_active(habit_id, true).ok);
    }

    #[test]
    fn habit_add_rejects_unknown_category_and_blank_name() {
        let unknown = habit_add("Stretch".to_string(), "spleen".to_string(), "*".to_string(), None);
        assert!(!unknown.ok);
        assert!(unknown.message.contains("unknown category"));
        assert!(!habit_add("  ".to_string(), "Crown".to_string(), "*".to_string(), None).ok);
    }

    #[test]
    fn habit_reset_restores_the_canonical_seven() {
        let _guard = habits_guard();
        let scratch = add_scratch_habit("Cold shower");

        assert!(habit_reset().ok);

        let ids: Vec<String> = habit_list().into_iter().map(|habit| habit.id).collect();
        assert_eq!(ids, ["m1", "m2", "m3", "m4", "m5", "m6", "m7"]);
        assert!(!ids.contains(&scratch));
    }

    #[test]
    fn month_stats_and_range_reflect_completions() {
        let _guard = habits_guard();
        let habit_id = add_scratch_habit("Read");
        assert!(habit_toggle(habit_id.clone(), Some("2001-02-03".to_string())).ok);
        assert!(habit_toggle(habit_id.clone(), Some("2001-03-01".to_string())).ok);

        let february = habit_month_stats(habit_id.clone(), 2001, 2);
        assert!(february.ok, "{}", february.message);
        assert_eq!(february.completed, 1);
        assert_eq!(february.days_in_month, 28);
        assert_eq!(february.percent, 4);
        assert!(!habit_month_stats(habit_id.clone(), 2001, 13).ok);

        let range = habit_completions(
            habit_id.clone(),
            "2001-01-01".to_string(),
            "2001-12-31".to_string(),
        );
        assert_eq!(range.dates, ["2001-02-03", "2001-03-01"]);
        assert!(!habit_completions(habit_id.clone(), "2001-1-1".to_string(), "x".to_string()).ok);

        assert!(habit_remove(habit_id).ok);
    }

    #[test]
    fn habit_week_covers_today_and_rejects_out_of_range_weeks() {
        let _guard = habits_guard();
        let habit_id = add_scratch_habit("Stretch");
        assert!(habit_toggle(habit_id.clone(), None).ok);

        let week = habit_week(habit_id.clone(), 0);
        assert!(week.ok, "{}", week.message);
        assert_eq!(week.days.len(), 7);
        assert_eq!(week.completed.iter().filter(|done| **done).count(), 1);

        let beyond = habit_week(habit_id.clone(), u32::MAX);
        assert!(!beyond.ok);
        assert!(beyond.days.is_empty());
        assert!(!habit_week("no-such-habit".to_string(), 0).ok);

        assert!(habit_remove(habit_id).ok);
    }

    #[test]
    fn task_lifecycle_round_trips_through_ids() {
        let created = task_add("  write tests  ".to_string(), Some("2030-01-01".to_string()));
        assert!(created.ok, "{}", created.message);
        let task_id = created.id.unwrap();

        let toggled = task_toggle(task_id.clone());
        assert_eq!(toggled.message, "Task completed.");
        assert!(task_delete(task_id.clone()).ok);
        assert!(!task_delete(task_id).ok);
    }

    #[test]
    fn task_add_rejects_blank_titles_and_bad_ids() {
        assert!(!task_add("   ".to_string(), None).ok);
        assert!(!task_toggle("not-a-uuid".to_string()).ok);
    }

    #[test]
    fn task_list_is_scoped_to_one_day() {
        let created = task_add("file taxes".to_string(), Some("2031-03-04".to_string()));
        let task_id = created.id.unwrap();

        let listed = task_list(Some("2031-03-04".to_string()));
        assert!(listed.ok, "{}", listed.message);
        let task = listed.items.iter().find(|task| task.id == task_id).unwrap();
        assert_eq!(task.title, "file taxes");
        assert_eq!(task.priority, "medium");
        assert_eq!(task.category, "personal");
        assert_eq!(task.time_slot, "morning");
        assert!(!task_list(Some("2031-03-05".to_string()))
            .items
            .iter()
            .any(|task| task.id == task_id));
        assert!(!task_list(Some("03/04/2031".to_string())).ok);

        assert!(task_delete(task_id).ok);
    }

    #[test]
    fn journal_release_is_two_phase() {
        let created = journal_add("let it go".to_string());
        let entry_id = created.id.unwrap();

        assert!(!journal_release_finish(entry_id.clone()).ok);
        assert!(journal_release_begin(entry_id.clone()).ok);
        assert!(journal_list()
            .iter()
            .any(|entry| entry.id == entry_id && entry.releasing));
        assert!(!journal_release_begin(entry_id.clone()).ok);
        assert!(journal_release_finish(entry_id).ok);
    }

    #[test]
    fn journal_entries_list_and_delete() {
        let entry_id = journal_add("quiet morning".to_string()).id.unwrap();
        let listed = journal_list();
        let entry = listed.iter().find(|entry| entry.id == entry_id).unwrap();
        assert_eq!(entry.content, "quiet morning");
        assert!(!entry.releasing);

        assert!(journal_delete(entry_id.clone()).ok);
        assert!(!journal_list().iter().any(|entry| entry.id == entry_id));
        assert!(!journal_delete(entry_id).ok);
        assert!(!journal_delete("nope".to_string()).ok);
    }

    #[test]
    fn gratitude_requires_a_non_blank_item() {
        assert!(!gratitude_add(vec![" ".to_string(), String::new()]).ok);
        assert!(gratitude_add(vec!["sunlight".to_string(), " ".to_string()]).ok);
    }

    #[test]
    fn gratitude_entries_list_and_delete() {
        let entry_id = gratitude_add(vec!["tea".to_string(), "rain".to_string()])
            .id
            .unwrap();
        let listed = gratitude_list();
        let entry = listed.iter().find(|entry| entry.id == entry_id).unwrap();
        assert_eq!(entry.items, ["tea", "rain"]);

        assert!(gratitude_delete(entry_id.clone()).ok);
        assert!(!gratitude_list().iter().any(|entry| entry.id == entry_id));
        assert!(!gratitude_delete(entry_id).ok);
    }

    #[test]
    fn gratitude_slots_clamp_at_both_ends() {
        assert_eq!(gratitude_slots_adjust(100).slots, 10);
        assert_eq!(gratitude_slots(), 10);
        assert_eq!(gratitude_slots_adjust(-100).slots, 1);
        let restored = gratitude_slots_adjust(2);
        assert!(restored.ok, "{}", restored.message);
        assert_eq!(restored.slots, 3);
    }

    #[test]
    fn intuition_guess_rejects_unknown_colors() {
        let view = intuition_guess("purple".to_string());
        assert!(!view.ok);
        assert!(view.message.contains("unknown color"));
    }

    #[test]
    fn insight_falls_back_then_caches_the_first_answer() {
        let request = insight_request();
        assert!(request.ok, "{}", request.message);
        assert!(request.level >= 1);

        let failed = insight_resolve(None);
        assert_eq!(failed.source, "fallback");
        assert!(!failed.text.is_empty());
        assert!(insight_request().cached_text.is_none());

        let answered = insight_resolve(Some("Small steps count.".to_string()));
        assert_eq!(answered.source, "provider");
        assert_eq!(
            insight_request().cached_text.as_deref(),
            Some("Small steps count.")
        );

        let again = insight_resolve(Some("ignored".to_string()));
        assert_eq!(again.source, "cached");
        assert_eq!(again.text, "Small steps count.");
    }

    #[test]
    fn theme_set_accepts_only_catalog_ids() {
        assert!(theme_set("classic-white".to_string()).ok);
        assert!(!theme_set("neon-void".to_string()).ok);
    }
}
