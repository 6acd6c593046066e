//! Local calendar-day keys and timestamp parsing.
//!
//! Every date the engine groups or places on the calendar goes through this
//! module. Dates are always read from the wall clock of the timestamp as it was
//! written; nothing here converts to UTC, so `2025-06-13T23:30:00-04:00` stays on
//! the 13th.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Weekday};
use serde::{Deserialize, Serialize};

use crate::common::ChartKey;

/// Earliest year a key can carry while keeping a four digit year.
pub const MIN_KEY_YEAR: i32 = 0;
/// Latest year a key can carry while keeping a four digit year.
pub const MAX_KEY_YEAR: i32 = 9999;

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parses a raw transaction timestamp into its local wall-clock date-time.
///
/// Accepts RFC 3339 (the offset is kept, not applied), naive date-times with a
/// `T` or space separator, and plain `YYYY-MM-DD` dates. Returns `None` for
/// anything else, including years outside `0000..=9999`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| {
            NAIVE_DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    year_in_range(parsed.year()).then_some(parsed)
}

/// Number of days in the given month, accounting for leap years.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| (first_next - Duration::days(1)).day())
        .unwrap_or(31)
}

/// Number of days `weekday` sits after `week_start` (0 when they match).
pub fn weekday_offset(weekday: Weekday, week_start: Weekday) -> u32 {
    (weekday.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

fn year_in_range(year: i32) -> bool {
    (MIN_KEY_YEAR..=MAX_KEY_YEAR).contains(&year)
}

/// A local calendar day, rendered as `YYYY-MM-DD`.
///
/// Ordering follows the calendar, which for zero-padded four digit years is the
/// same as comparing the rendered strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Wraps a calendar date, rejecting years that do not fit four digits.
    pub fn new(date: NaiveDate) -> Option<Self> {
        year_in_range(date.year()).then_some(Self(date))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(Self::new)
    }

    /// Key for the wall-clock date of a naive (already local) date-time.
    pub fn from_naive(datetime: &NaiveDateTime) -> Option<Self> {
        Self::new(datetime.date())
    }

    /// Key for the date a zoned date-time shows in its own time zone.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Option<Self> {
        Self::new(datetime.naive_local().date())
    }

    /// Key for a raw timestamp string; `None` when it does not parse.
    pub fn from_timestamp(raw: &str) -> Option<Self> {
        parse_timestamp(raw).and_then(|datetime| Self::from_naive(&datetime))
    }

    /// Parses the canonical `YYYY-MM-DD` form and nothing else.
    pub fn parse(value: &str) -> Result<Self, DateKeyError> {
        let bytes = value.as_bytes();
        let shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(idx, b)| idx == 4 || idx == 7 || b.is_ascii_digit());
        if !shaped {
            return Err(DateKeyError::Malformed(value.to_string()));
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| DateKeyError::InvalidDate(value.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey {
            year: self.year(),
            month: self.month(),
        }
    }

    pub fn first_of_month(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    pub fn last_of_month(&self) -> Self {
        let last = days_in_month(self.year(), self.month());
        Self(self.0.with_day(last).unwrap_or(self.0))
    }

    /// The following day, or `None` past `9999-12-31`.
    pub fn next_day(&self) -> Option<Self> {
        self.0.succ_opt().and_then(Self::new)
    }

    /// Un-padded `D/M` label used for daily axis ticks.
    pub fn short_label(&self) -> String {
        format!("{}/{}", self.day(), self.month())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year(),
            self.month(),
            self.day()
        )
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for DateKey {
    type Error = DateKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl ChartKey for DateKey {
    fn key_string(&self) -> String {
        self.to_string()
    }

    fn label(&self) -> String {
        self.short_label()
    }
}

/// A calendar month, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        ((1..=12).contains(&month) && year_in_range(year)).then_some(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> DateKey {
        DateKey(NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default())
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// `Mon YYYY` label used on monthly axes.
    pub fn long_label(&self) -> String {
        let name = SHORT_MONTH_NAMES
            .get(self.month as usize - 1)
            .copied()
            .unwrap_or("???");
        format!("{} {}", name, self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for MonthKey {
    type Error = DateKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (year, month) = value
            .split_once('-')
            .filter(|(year, month)| {
                year.len() == 4
                    && month.len() == 2
                    && year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit())
            })
            .ok_or_else(|| DateKeyError::Malformed(value.clone()))?;
        match (year.parse::<i32>(), month.parse::<u32>()) {
            (Ok(year), Ok(month)) => {
                MonthKey::new(year, month).ok_or(DateKeyError::InvalidDate(value))
            }
            _ => Err(DateKeyError::Malformed(value)),
        }
    }
}

impl ChartKey for MonthKey {
    fn key_string(&self) -> String {
        self.to_string()
    }

    fn label(&self) -> String {
        self.long_label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised when reading a key back from its string form.
pub enum DateKeyError {
    Malformed(String),
    InvalidDate(String),
}

impl fmt::Display for DateKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateKeyError::Malformed(value) => write!(f, "malformed date key `{value}`"),
            DateKeyError::InvalidDate(value) => write!(f, "`{value}` is not a calendar date"),
        }
    }
}

impl std::error::Error for DateKeyError {}
