//! Calendar date keys.
//!
//! # Responsibility
//! - Represent one local calendar day as a canonical `YYYY-MM-DD` key.
//! - Serialize as a plain string so persisted payloads stay readable.
//!
//! # Invariants
//! - Only zero-padded `YYYY-MM-DD` text that names a real date is accepted.
//! - Ordering follows calendar order.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date key regex"));

/// Rejection reasons for date key text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    /// Text is not shaped like `YYYY-MM-DD`.
    InvalidFormat(String),
    /// Text is well-shaped but names no calendar day (e.g. `2024-02-30`).
    InvalidDate(String),
}

impl Display for DateKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(value) => {
                write!(f, "date key must be formatted as YYYY-MM-DD, got `{value}`")
            }
            Self::InvalidDate(value) => write!(f, "date key is not a calendar date: `{value}`"),
        }
    }
}

impl Error for DateKeyError {}

/// One local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Parses canonical `YYYY-MM-DD` text.
    ///
    /// # Errors
    /// - `InvalidFormat` when the text is not zero-padded `YYYY-MM-DD`.
    /// - `InvalidDate` when the day does not exist.
    pub fn parse(value: &str) -> Result<Self, DateKeyError> {
        let trimmed = value.trim();
        if !DATE_KEY_RE.is_match(trimmed) {
            return Err(DateKeyError::InvalidFormat(trimmed.to_string()));
        }
        NaiveDate::parse_from_str(trimmed, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DateKeyError::InvalidDate(trimmed.to_string()))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns `None` for out-of-range components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today in the user's local calendar.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Previous calendar day; `None` only at the chrono range limit.
    pub fn pred(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// Next calendar day; `None` only at the chrono range limit.
    pub fn succ(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
