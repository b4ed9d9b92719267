//! Month grid computation for the calendar view.
//!
//! # Responsibility
//! - Build the 7-column, 49-cell month grid (headers + 6 week rows).
//! - Provide month navigation with year roll-over.
//!
//! # Invariants
//! - Grid building is pure: no I/O, task lookups go through the injected
//!   predicate only.

pub mod grid;
pub mod month;
