//! Day-of-year quote record.
//!
//! # Invariants
//! - `day_of_year` is unique and within `1..=366`.
//! - `text` is never empty; days without a quote simply have no record.

use super::validation::ValidationError;
use serde::{Deserialize, Serialize};

pub const MIN_DAY_OF_YEAR: u32 = 1;
pub const MAX_DAY_OF_YEAR: u32 = 366;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub day_of_year: u32,
    pub text: String,
}

impl Quote {
    pub fn new(day_of_year: u32, text: impl Into<String>) -> Result<Self, ValidationError> {
        let quote = Self {
            day_of_year,
            text: text.into(),
        };
        quote.validate()?;
        Ok(quote)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_DAY_OF_YEAR..=MAX_DAY_OF_YEAR).contains(&self.day_of_year) {
            return Err(ValidationError::DayOfYearOutOfRange(self.day_of_year));
        }
        if self.text.is_empty() {
            return Err(ValidationError::EmptyQuote(self.day_of_year));
        }
        Ok(())
    }
}
