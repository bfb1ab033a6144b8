//! Domain rules for the Scribe writing platform.
//!
//! This crate performs no I/O. The database and API crates both depend on it
//! for shared identifiers, error types, collaborator role checks, editor-change
//! validation, world-element attribute schemas and reading-progress rules.

pub mod editor_change;
pub mod error;
pub mod reading_progress;
pub mod roles;
pub mod types;
pub mod world;
