//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted `Task` record and its pre-insert shape `NewTask`.
//! - Provide the explicit create/update discriminator `TaskEdit`.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused while the task exists.
//! - `title` is never empty (or whitespace only) once persisted.
//! - `category` is always one of the five fixed variants.

use super::date::{DateKey, TaskTime};
use super::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned task identity. Always non-negative.
pub type TaskId = i64;

/// Fixed task classification; the UI maps each to a display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    General,
    Holiday,
    Personal,
    Meeting,
    Social,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::General,
        Self::Holiday,
        Self::Personal,
        Self::Meeting,
        Self::Social,
    ];

    /// Stable display and storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Holiday => "Holiday",
            Self::Personal => "Personal",
            Self::Meeting => "Meeting",
            Self::Social => "Social",
        }
    }

    /// Strict parse; only the exact display names are accepted.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| ValidationError::InvalidCategory(value.to_string()))
    }

    /// Display fallback: unrecognized names render as `General`.
    pub fn parse_or_general(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Free text, may be empty.
    pub description: String,
    pub category: Category,
    pub done: bool,
    pub date: DateKey,
    pub time: TaskTime,
}

impl Task {
    /// Checks field-level invariants before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)
    }

    /// `dd-MM-yyyy | HH:mm`, as shown under a task title.
    pub fn date_time_label(&self) -> String {
        format!("{} | {}", self.date, self.time)
    }
}

/// Task under construction; has every field except the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub done: bool,
    pub date: DateKey,
    pub time: TaskTime,
}

impl NewTask {
    /// Creates a not-done `General` task with an empty description.
    pub fn new(title: impl Into<String>, date: DateKey, time: TaskTime) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: Category::General,
            done: false,
            date,
            time,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)
    }

    /// Attaches the identity assigned by the store.
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            done: self.done,
            date: self.date,
            time: self.time,
        }
    }
}

/// Caller intent for a task editor save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEdit {
    /// Insert path; the store assigns the id.
    Create(NewTask),
    /// Update path for an existing id.
    Update(Task),
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Category, NewTask};
    use crate::model::date::{DateKey, TaskTime};
    use crate::model::validation::ValidationError;

    #[test]
    fn category_parse_is_strict_and_fallback_is_general() {
        assert_eq!(Category::parse("Meeting").unwrap(), Category::Meeting);
        assert_eq!(
            Category::parse("meeting").unwrap_err(),
            ValidationError::InvalidCategory("meeting".to_string())
        );
        assert_eq!(Category::parse_or_general("Workout"), Category::General);
    }

    #[test]
    fn whitespace_title_is_rejected() {
        let date = DateKey::new(2024, 2, 15).unwrap();
        let task = NewTask::new("   ", date, TaskTime::default());
        assert_eq!(task.validate().unwrap_err(), ValidationError::EmptyTitle);
    }

    #[test]
    fn into_task_keeps_every_field() {
        let date = DateKey::new(2024, 2, 15).unwrap();
        let time = TaskTime::new(14, 30).unwrap();
        let task = NewTask::new("Dentist", date, time)
            .with_description("bring card")
            .with_category(Category::Personal)
            .into_task(7);
        assert_eq!(task.id, 7);
        assert_eq!(task.description, "bring card");
        assert_eq!(task.category, Category::Personal);
        assert_eq!(task.date_time_label(), "15-02-2024 | 14:30");
    }
}
