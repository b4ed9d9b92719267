//! Error taxonomy shared by all stores.

use crate::db::DbError;
use crate::model::date::DateKey;
use crate::model::task::TaskId;
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// The record an update referred to but could not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundTarget {
    Task(TaskId),
    Note(DateKey),
}

impl Display for NotFoundTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task(id) => write!(f, "task {id}"),
            Self::Note(date) => write!(f, "note for {date}"),
        }
    }
}

#[derive(Debug)]
pub enum RepoError {
    /// Input rejected before touching storage.
    Validation(ValidationError),
    /// Storage transport failure.
    Db(DbError),
    /// Update against a stale reference.
    NotFound(NotFoundTarget),
    /// A note already exists for this date.
    Conflict(DateKey),
    /// A persisted row violates model invariants.
    InvalidData(String),
    /// Connection was not migrated.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(target) => write!(f, "{target} not found"),
            Self::Conflict(date) => write!(f, "note for {date} already exists"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_)
            | Self::Conflict(_)
            | Self::InvalidData(_)
            | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
