//! Month navigation for the calendar header arrows.

use crate::model::date::DateKey;
use crate::model::validation::ValidationError;

/// A (year, month) position of the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(month));
        }
        // Day 1 exists in every month, so this only checks the year range.
        DateKey::new(year, month, 1)?;
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn containing(date: DateKey) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// One month back; January rolls to December of the previous year.
    pub fn previous(self) -> Result<Self, ValidationError> {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// One month forward; December rolls to January of the next year.
    pub fn next(self) -> Result<Self, ValidationError> {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MonthCursor;
    use crate::model::date::DateKey;
    use crate::model::validation::ValidationError;

    #[test]
    fn navigation_rolls_the_year() {
        let january = MonthCursor::new(2024, 1).unwrap();
        assert_eq!(january.previous().unwrap(), MonthCursor::new(2023, 12).unwrap());

        let december = MonthCursor::new(2024, 12).unwrap();
        assert_eq!(december.next().unwrap(), MonthCursor::new(2025, 1).unwrap());

        let june = MonthCursor::containing(DateKey::new(2024, 6, 18).unwrap());
        assert_eq!((june.next().unwrap().month(), june.previous().unwrap().month()), (7, 5));
    }

    #[test]
    fn navigation_stops_at_the_supported_range() {
        let first = MonthCursor::new(1, 1).unwrap();
        assert_eq!(first.previous().unwrap_err(), ValidationError::InvalidYear(0));
        let last = MonthCursor::new(9999, 12).unwrap();
        assert_eq!(last.next().unwrap_err(), ValidationError::InvalidYear(10000));
    }
}
