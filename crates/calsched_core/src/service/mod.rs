//! Use-case services over the stores.
//!
//! # Responsibility
//! - Turn editor/checkbox/notes-area intents into store calls.
//! - Keep collaborators decoupled from storage details.

pub mod note_service;
pub mod task_service;
