//! Week and month views over habit completions.
//!
//! Weeks start on Saturday. Month statistics count completions that fall
//! inside the calendar month of the requested year.

use crate::model::date_key::DateKey;
use crate::model::habit::Habit;
use chrono::{Datelike, Days, NaiveDate};

/// The seven days of the Saturday-starting week containing
/// `today - 7 * weeks_back` days.
///
/// `None` when that week falls outside the representable date range.
pub fn week_days(today: DateKey, weeks_back: u32) -> Option<[DateKey; 7]> {
    let anchor = today
        .date()
        .checked_sub_days(Days::new(u64::from(weeks_back) * 7))?;
    let days_since_saturday = (anchor.weekday().num_days_from_sunday() + 1) % 7;
    let start = anchor.checked_sub_days(Days::new(u64::from(days_since_saturday)))?;
    let days: Vec<DateKey> = start.iter_days().take(7).map(DateKey::from_date).collect();
    days.try_into().ok()
}

/// First and last day of a calendar month; `None` for an invalid month.
pub fn month_bounds(year: i32, month: u32) -> Option<(DateKey, DateKey)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_first.pred_opt()?;
    Some((DateKey::from_date(first), DateKey::from_date(last)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthStats {
    pub completed: usize,
    pub days_in_month: u32,
    /// Whole-number share of days completed, rounded half up.
    pub percent: u32,
}

/// Completion statistics for one habit in one calendar month.
pub fn month_stats(habit: &Habit, year: i32, month: u32) -> Option<MonthStats> {
    let (first, last) = month_bounds(year, month)?;
    let completed = habit.completions_in_range(first, last).len();
    let days_in_month = last.date().day();
    let percent = ((completed as f64 / f64::from(days_in_month)) * 100.0).round() as u32;
    Some(MonthStats {
        completed,
        days_in_month,
        percent,
    })
}
