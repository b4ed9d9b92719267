//! Field validation errors shared by every write path.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected input. Raised before any storage mutation happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title is empty or whitespace only.
    EmptyTitle,
    /// Text is not a real date in `dd-MM-yyyy` form.
    InvalidDate(String),
    /// Text is not a wall-clock time in `HH:mm` form.
    InvalidTime(String),
    /// Text is not one of the five category names.
    InvalidCategory(String),
    /// Quote index outside `1..=366`.
    DayOfYearOutOfRange(u32),
    /// Quote text is empty.
    EmptyQuote(u32),
    /// Month outside `1..=12`.
    InvalidMonth(u32),
    /// Year outside the fixed-width `1..=9999` range.
    InvalidYear(i32),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title cannot be empty"),
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected dd-MM-yyyy")
            }
            Self::InvalidTime(value) => write!(f, "invalid time `{value}`; expected HH:mm"),
            Self::InvalidCategory(value) => write!(
                f,
                "invalid category `{value}`; expected General|Holiday|Personal|Meeting|Social"
            ),
            Self::DayOfYearOutOfRange(day) => {
                write!(f, "day of year {day} is outside 1..=366")
            }
            Self::EmptyQuote(day) => write!(f, "quote for day {day} is empty"),
            Self::InvalidMonth(month) => write!(f, "month {month} is outside 1..=12"),
            Self::InvalidYear(year) => write!(f, "year {year} is outside 1..=9999"),
        }
    }
}

impl Error for ValidationError {}
