use calsched_core::db::open_db_in_memory;
use calsched_core::{
    DateKey, NoteSaveOutcome, NoteService, NoteStore, NotFoundTarget, RepoError, SqliteNoteStore,
};

fn date(text: &str) -> DateKey {
    DateKey::parse(text).unwrap()
}

#[test]
fn missing_note_reads_as_empty_text() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();

    let day = date("29-02-2024");
    assert!(!store.has_notes(day).unwrap());
    assert_eq!(store.get_notes(day).unwrap(), "");
}

#[test]
fn create_then_update_replaces_text() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();

    let day = date("29-02-2024");
    store.create_notes(day, "leap day").unwrap();
    assert!(store.has_notes(day).unwrap());
    assert_eq!(store.get_notes(day).unwrap(), "leap day");

    store.update_notes(day, "it's \"leap\" day;\n-- still text").unwrap();
    assert_eq!(
        store.get_notes(day).unwrap(),
        "it's \"leap\" day;\n-- still text"
    );
}

#[test]
fn empty_note_text_is_still_a_note() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();

    let day = date("01-01-2025");
    store.create_notes(day, "").unwrap();
    assert!(store.has_notes(day).unwrap());
    assert_eq!(store.get_notes(day).unwrap(), "");
}

#[test]
fn second_create_for_same_date_is_conflict() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();

    let day = date("01-01-2025");
    store.create_notes(day, "first").unwrap();

    let err = store.create_notes(day, "second").unwrap_err();
    assert!(matches!(err, RepoError::Conflict(conflict) if conflict == day));
    assert_eq!(store.get_notes(day).unwrap(), "first");
}

#[test]
fn update_without_note_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();

    let day = date("01-01-2025");
    let err = store.update_notes(day, "nothing here").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(NotFoundTarget::Note(missing)) if missing == day));
    assert!(!store.has_notes(day).unwrap());
}

#[test]
fn notes_are_keyed_per_date() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::try_new(&conn).unwrap();

    store.create_notes(date("01-01-2025"), "one").unwrap();
    store.create_notes(date("02-01-2025"), "two").unwrap();

    assert_eq!(store.get_notes(date("01-01-2025")).unwrap(), "one");
    assert_eq!(store.get_notes(date("02-01-2025")).unwrap(), "two");
    assert_eq!(store.list_all_notes().unwrap().len(), 2);
}

#[test]
fn service_save_creates_then_updates() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::new(SqliteNoteStore::try_new(&conn).unwrap());

    let day = date("14-02-2024");
    assert_eq!(
        service.save_notes(day, "flowers").unwrap(),
        NoteSaveOutcome::Created
    );
    assert_eq!(
        service.save_notes(day, "flowers and dinner").unwrap(),
        NoteSaveOutcome::Updated
    );
    assert!(service.has_notes(day).unwrap());
    assert_eq!(service.get_notes(day).unwrap(), "flowers and dinner");
}
