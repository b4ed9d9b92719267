//! Domain model for the date-indexed schedule.
//!
//! # Responsibility
//! - Define the canonical value types shared by stores, services and the
//!   calendar grid.
//! - Own field-level validation so every write path applies the same rules.
//!
//! # Invariants
//! - Tasks and notes are indexed by `DateKey`, never by raw strings.
//! - Externally visible dates use `dd-MM-yyyy`, times use `HH:mm`.

pub mod date;
pub mod note;
pub mod quote;
pub mod task;
pub mod validation;
