//! Domain error type shared by the database and API layers.
//!
//! The API crate maps each variant onto an HTTP status; see
//! `scribe_api::error::AppError`.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced row does not exist (404).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Request content failed a domain rule (400).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The row exists but is not in a state that allows the operation (409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No usable session (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Session is valid but the caller lacks the project role (403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }
}
