//! Store contracts and their SQLite implementations.
//!
//! # Responsibility
//! - Define the date-scoped read/write contracts consumed by collaborators.
//! - Keep SQL inside the persistence boundary; every statement is
//!   parameterized so stored text never needs manual escaping.
//!
//! # Invariants
//! - Write paths validate input before any SQL mutation.
//! - Read paths reject malformed persisted rows instead of masking them.
//! - Every mutation is visible to the very next read (no deferred writes).

pub mod error;
pub mod note_repo;
pub mod quote_repo;
mod schema;
pub mod task_repo;
