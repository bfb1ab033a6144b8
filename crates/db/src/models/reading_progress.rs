//! Reading progress model.

use scribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reading_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReadingProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub chapter_id: DbId,
    pub progress_percent: f64,
    pub last_position: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting or replacing a reader's progress in a chapter.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertReadingProgress {
    pub user_id: DbId,
    pub chapter_id: DbId,
    pub progress_percent: f64,
    pub last_position: Option<i32>,
}
