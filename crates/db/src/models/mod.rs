//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) where the entity supports patches

pub mod activity;
pub mod chapter;
pub mod collaborator;
pub mod editor_change;
pub mod project;
pub mod reading_progress;
pub mod user;
pub mod world_element;
