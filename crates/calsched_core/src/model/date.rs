//! Calendar date and wall-clock time values.
//!
//! # Responsibility
//! - Provide `DateKey`, the canonical index for tasks and notes.
//! - Provide `TaskTime`, the hour/minute of a task.
//! - Parse and format the fixed-width forms `dd-MM-yyyy` and `HH:mm`.
//!
//! # Invariants
//! - A `DateKey` always denotes a real Gregorian date in years `1..=9999`,
//!   so its textual form is always exactly ten characters.
//! - Parsing is strict: short fields, signs and trailing text are rejected.
//! - Ordering is field-wise (year, month, day), which equals chronological.

use super::validation::ValidationError;
use chrono::{Datelike, Local, NaiveDate, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

// ASCII classes on purpose: `\d` would also match non-ASCII digits.
static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})-([0-9]{2})-([0-9]{4})$").expect("valid date regex"));
static TASK_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2}):([0-9]{2})$").expect("valid time regex"));

/// Canonical calendar date used as the key for tasks and notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Builds a key from numeric fields.
    ///
    /// # Errors
    /// - `InvalidYear` when `year` is outside `1..=9999`.
    /// - `InvalidDate` when the fields do not name a real date.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        validate_year(year)?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidDate(format!("{day:02}-{month:02}-{year:04}")))
    }

    /// Parses the `dd-MM-yyyy` form.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDate(text.to_string());
        let caps = DATE_KEY_RE.captures(text).ok_or_else(invalid)?;
        let day: u32 = caps[1].parse().map_err(|_| invalid())?;
        let month: u32 = caps[2].parse().map_err(|_| invalid())?;
        let year: i32 = caps[3].parse().map_err(|_| invalid())?;
        Self::new(year, month, day).map_err(|_| invalid())
    }

    /// Wraps a chrono date, enforcing the supported year range.
    pub fn from_naive(date: NaiveDate) -> Result<Self, ValidationError> {
        validate_year(date.year())?;
        Ok(Self(date))
    }

    /// Today's date on the local calendar.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
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

    /// 1-based ordinal within the year (`1..=366`); the quote index.
    pub fn day_of_year(&self) -> u32 {
        self.0.ordinal()
    }

    /// Weekday with Sunday as 0 and Saturday as 6.
    pub fn weekday_from_sunday(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}-{:02}-{:04}",
            self.0.day(),
            self.0.month(),
            self.0.year()
        )
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(D::Error::custom)
    }
}

/// Wall-clock time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TaskTime(NaiveTime);

impl TaskTime {
    /// Builds a time from `hour` (0..=23) and `minute` (0..=59).
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidTime(format!("{hour:02}:{minute:02}")))
    }

    /// Parses the `HH:mm` form.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidTime(text.to_string());
        let caps = TASK_TIME_RE.captures(text).ok_or_else(invalid)?;
        let hour: u32 = caps[1].parse().map_err(|_| invalid())?;
        let minute: u32 = caps[2].parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl Display for TaskTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl Serialize for TaskTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(D::Error::custom)
    }
}

/// Number of days in `month` of `year`, honouring leap years.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, ValidationError> {
    validate_year(year)?;
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(ValidationError::InvalidMonth(month))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(ValidationError::InvalidMonth(month))?;
    let days = next.signed_duration_since(first).num_days();
    u32::try_from(days).map_err(|_| ValidationError::InvalidMonth(month))
}

fn validate_year(year: i32) -> Result<(), ValidationError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::InvalidYear(year))
    }
}

#[cfg(test)]
mod tests {
    use super::{days_in_month, DateKey, TaskTime};
    use crate::model::validation::ValidationError;

    #[test]
    fn date_key_parses_and_formats_fixed_width() {
        let key = DateKey::parse("05-03-2024").expect("valid date");
        assert_eq!((key.year(), key.month(), key.day()), (2024, 3, 5));
        assert_eq!(key.to_string(), "05-03-2024");
    }

    #[test]
    fn date_key_rejects_short_fields_and_impossible_dates() {
        for input in ["5-3-2024", "05-03-24", "29-02-2023", "31-04-2024", " 05-03-2024", "05/03/2024"] {
            let err = DateKey::parse(input).expect_err("input must be rejected");
            assert_eq!(err, ValidationError::InvalidDate(input.to_string()));
        }
        assert!(DateKey::parse("29-02-2024").is_ok());
    }

    #[test]
    fn date_key_ordering_is_chronological() {
        let earlier = DateKey::new(2023, 12, 31).unwrap();
        let later = DateKey::new(2024, 1, 1).unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn date_key_reports_day_of_year_and_weekday() {
        let key = DateKey::new(2024, 12, 31).unwrap();
        assert_eq!(key.day_of_year(), 366);
        // 2024-02-01 was a Thursday.
        assert_eq!(DateKey::new(2024, 2, 1).unwrap().weekday_from_sunday(), 4);
    }

    #[test]
    fn year_zero_is_rejected() {
        assert_eq!(
            DateKey::new(0, 1, 1).unwrap_err(),
            ValidationError::InvalidYear(0)
        );
    }

    #[test]
    fn task_time_parses_strict_hh_mm() {
        let time = TaskTime::parse("09:05").unwrap();
        assert_eq!((time.hour(), time.minute()), (9, 5));
        assert_eq!(time.to_string(), "09:05");

        for input in ["9:05", "24:00", "12:60", "12:00:00", "12-00", ""] {
            assert!(TaskTime::parse(input).is_err(), "{input} must be rejected");
        }
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
        assert_eq!(days_in_month(2024, 12).unwrap(), 31);
        assert_eq!(
            days_in_month(2024, 13).unwrap_err(),
            ValidationError::InvalidMonth(13)
        );
    }
}
