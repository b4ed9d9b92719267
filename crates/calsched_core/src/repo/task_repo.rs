//! Task store contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over the `tasks` table keyed by store-assigned id.
//! - Date-scoped queries (`get_tasks`, `has_tasks`) for day views and the
//!   calendar grid.
//!
//! # Invariants
//! - `has_tasks(d)` is true iff `get_tasks(d)` is non-empty; both read the
//!   same predicate (`date = ?`).
//! - `get_tasks` returns rows in insertion order (ascending id).
//! - `delete_task` is idempotent; `update_task` on an unknown id is an error.
//! - Ids are never reused, even after the highest id is deleted.

use super::error::{NotFoundTarget, RepoError, RepoResult};
use super::schema::ensure_table;
use crate::model::date::{DateKey, TaskTime};
use crate::model::task::{Category, NewTask, Task, TaskId};
use log::debug;
use rusqlite::{params, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    category,
    is_done,
    date,
    time
FROM tasks";

/// Collaborator-facing task operations.
pub trait TaskStore {
    /// All tasks on `date`, in insertion order. Empty when none exist.
    fn get_tasks(&self, date: DateKey) -> RepoResult<Vec<Task>>;
    /// Whether at least one task exists on `date`.
    fn has_tasks(&self, date: DateKey) -> RepoResult<bool>;
    /// One task by id.
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Persists a new task and returns its assigned id.
    fn create_task(&self, task: &NewTask) -> RepoResult<TaskId>;
    /// Replaces every field of the task with the same id.
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    /// Removes a task; unknown ids are a no-op.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    /// Every stored task ordered by id.
    fn list_all_tasks(&self) -> RepoResult<Vec<Task>>;
}

/// SQLite-backed task store.
pub struct SqliteTaskStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskStore<'conn> {
    /// Wraps a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "tasks")?;
        Ok(Self { conn })
    }
}

impl TaskStore for SqliteTaskStore<'_> {
    fn get_tasks(&self, date: DateKey) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE date = ?1
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([date.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn has_tasks(&self, date: DateKey) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM tasks WHERE date = ?1);",
            [date.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn create_task(&self, task: &NewTask) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (title, description, category, is_done, date, time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                task.title.as_str(),
                task.description.as_str(),
                task.category.as_str(),
                task.done,
                task.date.to_string(),
                task.time.to_string(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("event=task_create module=repo status=ok task_id={id}");
        Ok(id)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                category = ?3,
                is_done = ?4,
                date = ?5,
                time = ?6
             WHERE id = ?7;",
            params![
                task.title.as_str(),
                task.description.as_str(),
                task.category.as_str(),
                task.done,
                task.date.to_string(),
                task.time.to_string(),
                task.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(NotFoundTarget::Task(task.id)));
        }
        debug!("event=task_update module=repo status=ok task_id={}", task.id);
        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let removed = self.conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        debug!("event=task_delete module=repo status=ok task_id={id} removed={removed}");
        Ok(())
    }

    fn list_all_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }
}

/// Inserts a task under a known id. Used by snapshot import only.
pub(crate) fn insert_task_with_id(conn: &Connection, task: &Task) -> RepoResult<()> {
    task.validate()?;
    if task.id < 0 {
        return Err(RepoError::InvalidData(format!(
            "negative task id {}",
            task.id
        )));
    }
    conn.execute(
        "INSERT INTO tasks (id, title, description, category, is_done, date, time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            task.id,
            task.title.as_str(),
            task.description.as_str(),
            task.category.as_str(),
            task.done,
            task.date.to_string(),
            task.time.to_string(),
        ],
    )?;
    Ok(())
}

/// Highest task id ever assigned on this connection, deleted ids included.
pub(crate) fn last_assigned_task_id(conn: &Connection) -> RepoResult<TaskId> {
    let sequence: Option<TaskId> = conn.query_row(
        "SELECT MAX(seq) FROM sqlite_sequence WHERE name = 'tasks';",
        [],
        |row| row.get(0),
    )?;
    let max_live: Option<TaskId> =
        conn.query_row("SELECT MAX(id) FROM tasks;", [], |row| row.get(0))?;
    Ok(sequence.unwrap_or(0).max(max_live.unwrap_or(0)))
}

/// Resets the id sequence so the next created task gets `last_id + 1`.
pub(crate) fn restore_task_id_sequence(conn: &Connection, last_id: TaskId) -> RepoResult<()> {
    conn.execute("DELETE FROM sqlite_sequence WHERE name = 'tasks';", [])?;
    conn.execute(
        "INSERT INTO sqlite_sequence (name, seq) VALUES ('tasks', ?1);",
        [last_id],
    )?;
    Ok(())
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id: TaskId = row.get("id")?;

    let date_text: String = row.get("date")?;
    let date = DateKey::parse(&date_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{date_text}` in tasks.date (id {id})"))
    })?;

    let time_text: String = row.get("time")?;
    let time = TaskTime::parse(&time_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid time `{time_text}` in tasks.time (id {id})"))
    })?;

    let category_text: String = row.get("category")?;
    let category = Category::parse(&category_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in tasks.category (id {id})"
        ))
    })?;

    let done = match row.get::<_, i64>("is_done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_done value `{other}` in tasks.is_done (id {id})"
            )));
        }
    };

    let task = Task {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        category,
        done,
        date,
        time,
    };
    task.validate()?;
    Ok(task)
}
