//! Note use-case service.
//!
//! # Responsibility
//! - Implement the notes-area save: create on first save of a date,
//!   update afterwards.

use crate::model::date::DateKey;
use crate::repo::error::RepoResult;
use crate::repo::note_repo::NoteStore;

/// Which store path a save took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteSaveOutcome {
    Created,
    Updated,
}

pub struct NoteService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stores `text` as the note for `date`.
    pub fn save_notes(&self, date: DateKey, text: &str) -> RepoResult<NoteSaveOutcome> {
        if self.store.has_notes(date)? {
            self.store.update_notes(date, text)?;
            Ok(NoteSaveOutcome::Updated)
        } else {
            self.store.create_notes(date, text)?;
            Ok(NoteSaveOutcome::Created)
        }
    }

    pub fn get_notes(&self, date: DateKey) -> RepoResult<String> {
        self.store.get_notes(date)
    }

    pub fn has_notes(&self, date: DateKey) -> RepoResult<bool> {
        self.store.has_notes(date)
    }
}
