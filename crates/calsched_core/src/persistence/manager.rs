//! Process-lifetime owner of the live database and its snapshot.
//!
//! # Responsibility
//! - Build live state once at startup (snapshot load or first-run seed).
//! - Hand out store and service handles borrowed from the live connection.
//! - Write the final snapshot and close the connection at shutdown.
//!
//! # Invariants
//! - Only a failure to open the in-memory database aborts startup.
//! - Store handles cannot outlive the manager (they borrow it).
//! - `shutdown` takes `self`; no store call can follow it.
//! - An unreadable snapshot that could not be moved aside is never
//!   overwritten.
//!
//! # Limitations
//! - State lives in memory between snapshots. A crash or forced kill loses
//!   every write since the last `shutdown` or `checkpoint`.

use super::seed::read_quote_seed;
use super::snapshot::{
    export_snapshot, import_snapshot, read_snapshot_file, write_snapshot_file, SnapshotCounts,
};
use super::PersistenceError;
use crate::config::SchedulerConfig;
use crate::db::open_db_in_memory;
use crate::repo::error::RepoResult;
use crate::repo::note_repo::SqliteNoteStore;
use crate::repo::quote_repo::SqliteQuoteStore;
use crate::repo::task_repo::SqliteTaskStore;
use crate::service::note_service::NoteService;
use crate::service::task_service::TaskService;
use log::{error, info, warn};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Where startup state came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupSource {
    /// Loaded from an existing snapshot; no seeding happened.
    Snapshot,
    /// First run: fresh tables, quotes seeded from the seed file.
    FreshSeeded,
    /// Snapshot existed but could not be loaded; fresh tables were seeded.
    ///
    /// When `quarantined` is true the unreadable file was moved to
    /// `<snapshot>.corrupt`. Otherwise it is still in place and this
    /// session's `checkpoint` and `shutdown` refuse to write.
    Recovered { reason: String, quarantined: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub source: StartupSource,
    /// Live row counts right after startup.
    pub counts: SnapshotCounts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownReport {
    pub snapshot_path: PathBuf,
    pub counts: SnapshotCounts,
}

pub struct PersistenceManager {
    conn: Connection,
    snapshot_path: PathBuf,
    snapshot_writable: bool,
}

impl PersistenceManager {
    /// Builds live state from `config`.
    ///
    /// # Errors
    /// Only when the in-memory database itself cannot be opened. Snapshot
    /// and seed problems are logged and recovered from.
    pub fn start(config: &SchedulerConfig) -> Result<(Self, StartupReport), PersistenceError> {
        let started_at = Instant::now();
        info!("event=persistence_start module=persistence status=start");

        let snapshot_path = config.snapshot_path.clone();
        let (conn, source) = if snapshot_path.is_file() {
            match load_snapshot(&snapshot_path) {
                Ok(conn) => (conn, StartupSource::Snapshot),
                Err(err) => {
                    error!(
                        "event=snapshot_load module=persistence status=error path={} error={err}",
                        snapshot_path.display()
                    );
                    let quarantined = quarantine(&snapshot_path);
                    let conn = open_fresh(&config.quote_seed_path)?;
                    let reason = err.to_string();
                    (conn, StartupSource::Recovered { reason, quarantined })
                }
            }
        } else {
            (open_fresh(&config.quote_seed_path)?, StartupSource::FreshSeeded)
        };

        let counts = export_snapshot(&conn)?.counts();
        info!(
            "event=persistence_start module=persistence status=ok source={} tasks={} notes={} quotes={} duration_ms={}",
            source_label(&source),
            counts.tasks,
            counts.notes,
            counts.quotes,
            started_at.elapsed().as_millis()
        );

        let snapshot_writable = !matches!(
            source,
            StartupSource::Recovered {
                quarantined: false,
                ..
            }
        );
        if !snapshot_writable {
            warn!(
                "event=snapshot_write module=persistence status=disabled path={}",
                snapshot_path.display()
            );
        }

        let manager = Self {
            conn,
            snapshot_path,
            snapshot_writable,
        };
        Ok((manager, StartupReport { source, counts }))
    }

    pub fn tasks(&self) -> RepoResult<SqliteTaskStore<'_>> {
        SqliteTaskStore::try_new(&self.conn)
    }

    pub fn notes(&self) -> RepoResult<SqliteNoteStore<'_>> {
        SqliteNoteStore::try_new(&self.conn)
    }

    pub fn quotes(&self) -> RepoResult<SqliteQuoteStore<'_>> {
        SqliteQuoteStore::try_new(&self.conn)
    }

    pub fn task_service(&self) -> RepoResult<TaskService<SqliteTaskStore<'_>>> {
        Ok(TaskService::new(self.tasks()?))
    }

    pub fn note_service(&self) -> RepoResult<NoteService<SqliteNoteStore<'_>>> {
        Ok(NoteService::new(self.notes()?))
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Writes a snapshot of the current state without closing.
    ///
    /// # Errors
    /// `SnapshotPreserved` when startup could not move an unreadable
    /// snapshot aside.
    pub fn checkpoint(&self) -> Result<SnapshotCounts, PersistenceError> {
        if !self.snapshot_writable {
            return Err(PersistenceError::SnapshotPreserved {
                path: self.snapshot_path.clone(),
            });
        }
        let snapshot = export_snapshot(&self.conn)?;
        write_snapshot_file(&self.snapshot_path, &snapshot)?;
        Ok(snapshot.counts())
    }

    /// Writes the final snapshot and closes the connection.
    ///
    /// The connection is closed even when the write fails; the error is
    /// logged as a warning and returned so the caller can surface it.
    pub fn shutdown(self) -> Result<ShutdownReport, PersistenceError> {
        let started_at = Instant::now();
        let written = self.checkpoint();
        let Self {
            conn,
            snapshot_path,
            ..
        } = self;

        if let Err((_, err)) = conn.close() {
            warn!("event=db_close module=persistence status=error error={err}");
        }

        match written {
            Ok(counts) => {
                info!(
                    "event=persistence_shutdown module=persistence status=ok tasks={} notes={} quotes={} duration_ms={}",
                    counts.tasks,
                    counts.notes,
                    counts.quotes,
                    started_at.elapsed().as_millis()
                );
                Ok(ShutdownReport {
                    snapshot_path,
                    counts,
                })
            }
            Err(err) => {
                warn!(
                    "event=persistence_shutdown module=persistence status=error path={} error={err}",
                    snapshot_path.display()
                );
                Err(err)
            }
        }
    }
}

fn load_snapshot(path: &Path) -> Result<Connection, PersistenceError> {
    let snapshot = read_snapshot_file(path)?;
    let conn = open_db_in_memory()?;
    import_snapshot(&conn, &snapshot)?;
    Ok(conn)
}

fn open_fresh(quote_seed_path: &Path) -> Result<Connection, PersistenceError> {
    let conn = open_db_in_memory()?;
    seed_quotes(&conn, quote_seed_path);
    Ok(conn)
}

fn seed_quotes(conn: &Connection, quote_seed_path: &Path) {
    let lines = match read_quote_seed(quote_seed_path) {
        Ok(Some(lines)) => lines,
        Ok(None) => {
            warn!(
                "event=quote_seed module=persistence status=skipped reason=missing_source path={}",
                quote_seed_path.display()
            );
            return;
        }
        Err(err) => {
            warn!("event=quote_seed module=persistence status=error error={err}");
            return;
        }
    };

    let seeded = SqliteQuoteStore::try_new(conn).and_then(|store| store.seed_quotes(&lines));
    if let Err(err) = seeded {
        warn!("event=quote_seed module=persistence status=error error={err}");
    }
}

/// Renames an unreadable snapshot to `<path>.corrupt`. Returns whether the
/// move happened.
fn quarantine(path: &Path) -> bool {
    let mut raw = path.as_os_str().to_owned();
    raw.push(".corrupt");
    let target = PathBuf::from(raw);
    match std::fs::rename(path, &target) {
        Ok(()) => {
            warn!(
                "event=snapshot_quarantine module=persistence status=ok target={}",
                target.display()
            );
            true
        }
        Err(err) => {
            error!(
                "event=snapshot_quarantine module=persistence status=error path={} error={err}",
                path.display()
            );
            false
        }
    }
}

fn source_label(source: &StartupSource) -> &'static str {
    match source {
        StartupSource::Snapshot => "snapshot",
        StartupSource::FreshSeeded => "fresh",
        StartupSource::Recovered { .. } => "recovered",
    }
}
