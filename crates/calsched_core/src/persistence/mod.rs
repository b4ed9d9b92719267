//! Durable snapshot persistence for all stores.
//!
//! # Responsibility
//! - Load live state from the snapshot file at startup, or create fresh
//!   tables and seed quotes on first run.
//! - Write the full state back as one snapshot at shutdown.
//!
//! # Invariants
//! - Startup never fails because of a bad snapshot; it recovers with fresh
//!   tables and logs the cause.
//! - Shutdown consumes the manager, so it runs at most once.
//! - There is no write-through: a crash loses writes since the last
//!   snapshot.

use crate::db::DbError;
use crate::repo::error::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod manager;
pub mod seed;
pub mod snapshot;

#[derive(Debug)]
pub enum PersistenceError {
    /// Snapshot or seed file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Snapshot could not be serialized.
    Encode(serde_json::Error),
    /// Snapshot bytes are not a valid snapshot document.
    Decode(serde_json::Error),
    /// Snapshot was written by a newer format.
    UnsupportedFormat { found: u32, supported: u32 },
    /// Snapshot parsed but violates a store invariant.
    InvalidSnapshot(String),
    /// An unreadable snapshot could not be moved aside; writing would
    /// overwrite it.
    SnapshotPreserved { path: PathBuf },
    Repo(RepoError),
    Db(DbError),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::Decode(err) => write!(f, "failed to decode snapshot: {err}"),
            Self::UnsupportedFormat { found, supported } => write!(
                f,
                "snapshot format {found} is newer than supported {supported}"
            ),
            Self::InvalidSnapshot(message) => write!(f, "invalid snapshot: {message}"),
            Self::SnapshotPreserved { path } => write!(
                f,
                "refusing to overwrite unreadable snapshot `{}`; move it aside first",
                path.display()
            ),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::UnsupportedFormat { .. }
            | Self::InvalidSnapshot(_)
            | Self::SnapshotPreserved { .. } => None,
        }
    }
}

impl From<RepoError> for PersistenceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for PersistenceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
