//! Core of the calendar scheduler.
//!
//! Owns all durable state (tasks, notes, quotes), enforces its invariants,
//! answers date-scoped queries and builds the month grid. UI layers call
//! into this crate and never touch storage directly.

pub mod calendar;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod repo;
pub mod service;

pub use calendar::grid::{
    build_calendar_grid, CalendarGrid, DayCell, DayCellKind, GridCell, GRID_CELLS, TOTAL_CELLS,
};
pub use calendar::month::MonthCursor;
pub use config::SchedulerConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::date::{days_in_month, DateKey, TaskTime};
pub use model::note::Note;
pub use model::quote::Quote;
pub use model::task::{Category, NewTask, Task, TaskEdit, TaskId};
pub use model::validation::ValidationError;
pub use persistence::manager::{
    PersistenceManager, ShutdownReport, StartupReport, StartupSource,
};
pub use persistence::snapshot::{export_snapshot, import_snapshot, Snapshot, SnapshotCounts};
pub use persistence::PersistenceError;
pub use repo::error::{NotFoundTarget, RepoError, RepoResult};
pub use repo::note_repo::{NoteStore, SqliteNoteStore};
pub use repo::quote_repo::{QuoteStore, SqliteQuoteStore};
pub use repo::task_repo::{SqliteTaskStore, TaskStore};
pub use service::note_service::{NoteSaveOutcome, NoteService};
pub use service::task_service::TaskService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
