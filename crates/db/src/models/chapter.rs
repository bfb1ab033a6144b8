//! Chapter entity model and DTOs.

use scribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `chapters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chapter {
    pub id: DbId,
    pub project_id: DbId,
    pub chapter_number: i32,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new chapter.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChapter {
    pub project_id: DbId,
    pub chapter_number: i32,
    pub title: String,
    pub content: String,
}
