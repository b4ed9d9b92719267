use calsched_core::db::open_db_in_memory;
use calsched_core::{
    Category, DateKey, NewTask, NotFoundTarget, RepoError, SqliteTaskStore, Task, TaskEdit,
    TaskService, TaskStore, TaskTime, ValidationError,
};

fn date(text: &str) -> DateKey {
    DateKey::parse(text).unwrap()
}

fn time(text: &str) -> TaskTime {
    TaskTime::parse(text).unwrap()
}

#[test]
fn empty_date_has_no_tasks() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();

    let day = date("15-02-2024");
    assert!(!store.has_tasks(day).unwrap());
    assert!(store.get_tasks(day).unwrap().is_empty());
}

#[test]
fn create_then_get_roundtrips_every_field() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();

    let day = date("15-02-2024");
    let new_task = NewTask::new("Bob's \"big\" day; DROP TABLE tasks;--", day, time("18:45"))
        .with_description("it's O''Brien's\nsecond line \\ backslash ✓")
        .with_category(Category::Social);
    let id = store.create_task(&new_task).unwrap();

    assert!(store.has_tasks(day).unwrap());
    let tasks = store.get_tasks(day).unwrap();
    assert_eq!(tasks, vec![new_task.into_task(id)]);
}

#[test]
fn get_tasks_is_scoped_to_date_and_insertion_ordered() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();

    let day = date("10-02-2024");
    let other_day = date("11-02-2024");
    let late = store
        .create_task(&NewTask::new("late", day, time("20:00")))
        .unwrap();
    store
        .create_task(&NewTask::new("elsewhere", other_day, time("09:00")))
        .unwrap();
    let early = store
        .create_task(&NewTask::new("early", day, time("07:00")))
        .unwrap();

    let ids: Vec<_> = store.get_tasks(day).unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![late, early]);
    assert_ne!(late, early);

    let service = TaskService::new(store);
    let by_time: Vec<_> = service
        .get_tasks_by_time(day)
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(by_time, vec!["early", "late"]);
}

#[test]
fn empty_title_is_rejected_without_mutation() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();

    let day = date("15-02-2024");
    let err = store
        .create_task(&NewTask::new("", day, time("10:00")))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyTitle)
    ));
    assert!(!store.has_tasks(day).unwrap());
}

#[test]
fn update_replaces_all_fields_and_can_move_dates() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();

    let from = date("15-02-2024");
    let to = date("16-02-2024");
    let id = store
        .create_task(&NewTask::new("draft", from, time("10:00")))
        .unwrap();

    let updated = Task {
        id,
        title: "final".to_string(),
        description: "moved".to_string(),
        category: Category::Meeting,
        done: true,
        date: to,
        time: time("11:30"),
    };
    store.update_task(&updated).unwrap();

    assert!(!store.has_tasks(from).unwrap());
    assert_eq!(store.get_tasks(to).unwrap(), vec![updated.clone()]);
    assert_eq!(store.get_task(id).unwrap(), Some(updated));
}

#[test]
fn update_unknown_id_is_not_found_and_leaves_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();

    let day = date("15-02-2024");
    let id = store
        .create_task(&NewTask::new("keep", day, time("10:00")))
        .unwrap();
    let before = store.list_all_tasks().unwrap();

    let ghost = NewTask::new("ghost", day, time("10:00")).into_task(id + 100);
    let err = store.update_task(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(NotFoundTarget::Task(missing)) if missing == id + 100));
    assert_eq!(store.list_all_tasks().unwrap(), before);
}

#[test]
fn delete_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();

    let day = date("15-02-2024");
    let id = store
        .create_task(&NewTask::new("once", day, time("10:00")))
        .unwrap();

    store.delete_task(id).unwrap();
    let after_first = store.list_all_tasks().unwrap();
    store.delete_task(id).unwrap();

    assert_eq!(store.list_all_tasks().unwrap(), after_first);
    assert!(!store.has_tasks(day).unwrap());
    assert!(store.get_task(id).unwrap().is_none());
}

#[test]
fn service_save_uses_explicit_intent() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskStore::try_new(&conn).unwrap());

    let day = date("01-03-2024");
    let created = service
        .save(TaskEdit::Create(NewTask::new("standup", day, time("09:00"))))
        .unwrap();

    let mut edited = created.clone();
    edited.title = "retro".to_string();
    let saved = service.save(TaskEdit::Update(edited.clone())).unwrap();
    assert_eq!(saved, edited);
    assert_eq!(service.get_tasks(day).unwrap(), vec![edited.clone()]);

    service.delete(created.id).unwrap();
    let err = service.save(TaskEdit::Update(edited)).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn set_done_toggles_completion() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskStore::try_new(&conn).unwrap());

    let day = date("01-03-2024");
    let task = service
        .save(TaskEdit::Create(NewTask::new("laundry", day, time("12:00"))))
        .unwrap();
    assert!(!task.done);

    assert!(service.set_done(task.id, true).unwrap().done);
    assert!(service.get_tasks(day).unwrap()[0].done);
    assert!(!service.set_done(task.id, false).unwrap().done);

    let err = service.set_done(task.id + 1, true).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(NotFoundTarget::Task(_))));
}

#[test]
fn store_requires_migrated_connection() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let err = SqliteTaskStore::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("tasks")));
}

#[test]
fn deleted_ids_are_not_reused_by_later_creates() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();

    let day = date("15-02-2024");
    store
        .create_task(&NewTask::new("a", day, time("09:00")))
        .unwrap();
    let b_id = store
        .create_task(&NewTask::new("b", day, time("10:00")))
        .unwrap();
    let stale_b = store.get_task(b_id).unwrap().unwrap();

    store.delete_task(b_id).unwrap();
    let c_id = store
        .create_task(&NewTask::new("c", day, time("11:00")))
        .unwrap();
    assert!(c_id > b_id);

    let err = store.update_task(&stale_b).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(NotFoundTarget::Task(missing)) if missing == b_id));
    assert_eq!(store.get_task(c_id).unwrap().unwrap().title, "c");
    assert!(store.get_task(b_id).unwrap().is_none());
}
