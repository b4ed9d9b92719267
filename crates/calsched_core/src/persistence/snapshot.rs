//! JSON snapshot codec.
//!
//! # Responsibility
//! - Export the full contents of the task, note and quote tables.
//! - Import a snapshot into a migrated connection, re-checking every row.
//! - Read and atomically write snapshot files.
//!
//! # Invariants
//! - `import_snapshot(export_snapshot(state))` reproduces `state` exactly.
//! - Import is all-or-nothing: any invalid row rolls back the whole import.
//! - The task id high-water mark survives a round trip, so ids deleted
//!   before a restart are not handed out again.
//! - JSON string escaping covers every character, so stored text needs no
//!   ad hoc quoting.

use super::PersistenceError;
use crate::model::note::Note;
use crate::model::quote::Quote;
use crate::model::task::{Task, TaskId};
use crate::repo::note_repo::{NoteStore, SqliteNoteStore};
use crate::repo::quote_repo::{insert_quote, QuoteStore, SqliteQuoteStore};
use crate::repo::task_repo::{
    insert_task_with_id, last_assigned_task_id, restore_task_id_sequence, SqliteTaskStore,
    TaskStore,
};
use log::warn;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_FORMAT_VERSION: u32 = 2;
/// First format version that records `next_task_id`.
const NEXT_TASK_ID_SINCE_VERSION: u32 = 2;

/// Full durable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub format_version: u32,
    /// Id the next created task receives. Absent in version 1 documents.
    #[serde(default)]
    pub next_task_id: TaskId,
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub quotes: Vec<Quote>,
}

/// Row counts of a snapshot or of live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapshotCounts {
    pub tasks: usize,
    pub notes: usize,
    pub quotes: usize,
}

impl Snapshot {
    pub fn counts(&self) -> SnapshotCounts {
        SnapshotCounts {
            tasks: self.tasks.len(),
            notes: self.notes.len(),
            quotes: self.quotes.len(),
        }
    }
}

/// Captures every row of the three tables.
pub fn export_snapshot(conn: &Connection) -> Result<Snapshot, PersistenceError> {
    Ok(Snapshot {
        format_version: SNAPSHOT_FORMAT_VERSION,
        next_task_id: last_assigned_task_id(conn)? + 1,
        tasks: SqliteTaskStore::try_new(conn)?.list_all_tasks()?,
        notes: SqliteNoteStore::try_new(conn)?.list_all_notes()?,
        quotes: SqliteQuoteStore::try_new(conn)?.list_all_quotes()?,
    })
}

/// Replaces the contents of the three tables with `snapshot`.
pub fn import_snapshot(conn: &Connection, snapshot: &Snapshot) -> Result<(), PersistenceError> {
    if snapshot.format_version > SNAPSHOT_FORMAT_VERSION {
        return Err(PersistenceError::UnsupportedFormat {
            found: snapshot.format_version,
            supported: SNAPSHOT_FORMAT_VERSION,
        });
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "DELETE FROM tasks;
         DELETE FROM notes;
         DELETE FROM quotes;",
    )?;

    for task in &snapshot.tasks {
        insert_task_with_id(&tx, task).map_err(|err| {
            PersistenceError::InvalidSnapshot(format!("task {}: {err}", task.id))
        })?;
    }

    let max_task_id = snapshot.tasks.iter().map(|task| task.id).max().unwrap_or(0);
    let next_task_id = if snapshot.format_version < NEXT_TASK_ID_SINCE_VERSION {
        max_task_id + 1
    } else {
        snapshot.next_task_id
    };
    if next_task_id <= max_task_id {
        return Err(PersistenceError::InvalidSnapshot(format!(
            "next_task_id {next_task_id} does not exceed task id {max_task_id}"
        )));
    }
    restore_task_id_sequence(&tx, next_task_id - 1)?;

    let notes = SqliteNoteStore::try_new(&tx)?;
    for note in &snapshot.notes {
        notes
            .create_notes(note.date, &note.text)
            .map_err(|err| PersistenceError::InvalidSnapshot(format!("note {}: {err}", note.date)))?;
    }

    for quote in &snapshot.quotes {
        insert_quote(&tx, quote).map_err(|err| {
            PersistenceError::InvalidSnapshot(format!("quote {}: {err}", quote.day_of_year))
        })?;
    }

    tx.commit()?;
    Ok(())
}

pub fn encode_snapshot(snapshot: &Snapshot) -> Result<Vec<u8>, PersistenceError> {
    serde_json::to_vec_pretty(snapshot).map_err(PersistenceError::Encode)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, PersistenceError> {
    serde_json::from_slice(bytes).map_err(PersistenceError::Decode)
}

pub fn read_snapshot_file(path: &Path) -> Result<Snapshot, PersistenceError> {
    let bytes = std::fs::read(path).map_err(|source| io_error(path, source))?;
    decode_snapshot(&bytes)
}

/// Writes `snapshot` to a sibling temp file, then renames it into place.
pub fn write_snapshot_file(path: &Path, snapshot: &Snapshot) -> Result<(), PersistenceError> {
    let bytes = encode_snapshot(snapshot)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }

    let temp_path = temp_path_for(path);
    let written = write_synced(&temp_path, &bytes)
        .map_err(|source| io_error(&temp_path, source))
        .and_then(|()| std::fs::rename(&temp_path, path).map_err(|source| io_error(path, source)));
    if written.is_err() {
        discard_temp_file(&temp_path);
    }
    written
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn discard_temp_file(temp_path: &Path) {
    match std::fs::remove_file(temp_path) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => warn!(
            "event=snapshot_temp_cleanup module=persistence status=error path={} error={err}",
            temp_path.display()
        ),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(".tmp");
    PathBuf::from(raw)
}

fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}
