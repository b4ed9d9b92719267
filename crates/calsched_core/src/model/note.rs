//! Per-date free-text note.

use super::date::DateKey;
use serde::{Deserialize, Serialize};

/// At most one note exists per date; text may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub date: DateKey,
    pub text: String,
}
