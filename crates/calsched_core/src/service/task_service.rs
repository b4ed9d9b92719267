//! Task use-case service.
//!
//! # Responsibility
//! - Route task editor saves through the explicit `TaskEdit` intent.
//! - Provide the done-checkbox toggle and time-ordered day listing.
//!
//! # Invariants
//! - Never bypasses store validation.
//! - Returned tasks reflect exactly what was persisted.

use crate::model::date::DateKey;
use crate::model::task::{Task, TaskEdit, TaskId};
use crate::repo::error::{NotFoundTarget, RepoError, RepoResult};
use crate::repo::task_repo::TaskStore;
use log::warn;

pub struct TaskService<S: TaskStore> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persists an editor save and returns the stored task.
    ///
    /// `Create` assigns a fresh id; `Update` fails with `NotFound` when the
    /// id no longer exists.
    pub fn save(&self, edit: TaskEdit) -> RepoResult<Task> {
        match edit {
            TaskEdit::Create(new_task) => {
                let id = self.store.create_task(&new_task)?;
                Ok(new_task.into_task(id))
            }
            TaskEdit::Update(task) => {
                self.store.update_task(&task)?;
                Ok(task)
            }
        }
    }

    /// Sets the completion flag of one task.
    pub fn set_done(&self, id: TaskId, done: bool) -> RepoResult<Task> {
        let mut task = self
            .store
            .get_task(id)?
            .ok_or(RepoError::NotFound(NotFoundTarget::Task(id)))?;
        task.done = done;
        self.store.update_task(&task)?;
        Ok(task)
    }

    pub fn delete(&self, id: TaskId) -> RepoResult<()> {
        self.store.delete_task(id)
    }

    pub fn get_tasks(&self, date: DateKey) -> RepoResult<Vec<Task>> {
        self.store.get_tasks(date)
    }

    /// Tasks on `date` ordered by time, then by id.
    pub fn get_tasks_by_time(&self, date: DateKey) -> RepoResult<Vec<Task>> {
        let mut tasks = self.store.get_tasks(date)?;
        tasks.sort_by_key(|task| (task.time, task.id));
        Ok(tasks)
    }

    pub fn has_tasks(&self, date: DateKey) -> RepoResult<bool> {
        self.store.has_tasks(date)
    }

    /// Infallible variant for the calendar highlight predicate.
    ///
    /// Storage failures are logged and reported as "no tasks".
    pub fn has_tasks_or_false(&self, date: DateKey) -> bool {
        self.store.has_tasks(date).unwrap_or_else(|err| {
            warn!("event=has_tasks module=service status=error date={date} error={err}");
            false
        })
    }
}
