//! Note store contract and SQLite implementation.
//!
//! # Responsibility
//! - Keep at most one free-text note per date.
//!
//! # Invariants
//! - `create_notes` never overwrites: an existing note yields `Conflict`.
//! - `update_notes` never inserts: a missing note yields `NotFound`.
//! - Notes are never deleted.

use super::error::{NotFoundTarget, RepoError, RepoResult};
use super::schema::ensure_table;
use crate::model::date::DateKey;
use crate::model::note::Note;
use log::debug;
use rusqlite::{params, Connection};

/// Collaborator-facing note operations.
pub trait NoteStore {
    fn has_notes(&self, date: DateKey) -> RepoResult<bool>;
    /// Note text for `date`, or empty text when none exists.
    fn get_notes(&self, date: DateKey) -> RepoResult<String>;
    fn create_notes(&self, date: DateKey, text: &str) -> RepoResult<()>;
    fn update_notes(&self, date: DateKey, text: &str) -> RepoResult<()>;
    /// Every stored note ordered by its key text.
    fn list_all_notes(&self) -> RepoResult<Vec<Note>>;
}

pub struct SqliteNoteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteStore<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "notes")?;
        Ok(Self { conn })
    }
}

impl NoteStore for SqliteNoteStore<'_> {
    fn has_notes(&self, date: DateKey) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM notes WHERE date = ?1);",
            [date.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn get_notes(&self, date: DateKey) -> RepoResult<String> {
        let mut stmt = self
            .conn
            .prepare("SELECT note FROM notes WHERE date = ?1;")?;
        let mut rows = stmt.query([date.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(row.get(0)?),
            None => Ok(String::new()),
        }
    }

    fn create_notes(&self, date: DateKey, text: &str) -> RepoResult<()> {
        let inserted = self.conn.execute(
            "INSERT INTO notes (date, note) VALUES (?1, ?2)
             ON CONFLICT(date) DO NOTHING;",
            params![date.to_string(), text],
        )?;
        if inserted == 0 {
            return Err(RepoError::Conflict(date));
        }
        debug!("event=note_create module=repo status=ok date={date}");
        Ok(())
    }

    fn update_notes(&self, date: DateKey, text: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes SET note = ?2 WHERE date = ?1;",
            params![date.to_string(), text],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(NotFoundTarget::Note(date)));
        }
        debug!("event=note_update module=repo status=ok date={date}");
        Ok(())
    }

    fn list_all_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, note FROM notes ORDER BY date ASC;")?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            let date_text: String = row.get(0)?;
            let date = DateKey::parse(&date_text).map_err(|_| {
                RepoError::InvalidData(format!("invalid date `{date_text}` in notes.date"))
            })?;
            notes.push(Note {
                date,
                text: row.get(1)?,
            });
        }
        Ok(notes)
    }
}
