//! Repository for the `reading_progress` table.

use scribe_core::types::DbId;
use sqlx::PgPool;

use crate::models::reading_progress::{ReadingProgress, UpsertReadingProgress};

const COLUMNS: &str =
    "id, user_id, chapter_id, progress_percent, last_position, created_at, updated_at";

pub struct ReadingProgressRepo;

impl ReadingProgressRepo {
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        chapter_id: DbId,
    ) -> Result<Option<ReadingProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reading_progress WHERE user_id = $1 AND chapter_id = $2"
        );
        sqlx::query_as::<_, ReadingProgress>(&query)
            .bind(user_id)
            .bind(chapter_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert the reader's progress or overwrite the existing row.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertReadingProgress,
    ) -> Result<ReadingProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO reading_progress (user_id, chapter_id, progress_percent, last_position)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_reading_progress_user_chapter DO UPDATE SET
                progress_percent = EXCLUDED.progress_percent,
                last_position = EXCLUDED.last_position
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReadingProgress>(&query)
            .bind(input.user_id)
            .bind(input.chapter_id)
            .bind(input.progress_percent)
            .bind(input.last_position)
            .fetch_one(pool)
            .await
    }
}
