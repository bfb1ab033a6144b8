//! Repository for the `chapters` table.

use scribe_core::types::DbId;
use sqlx::PgPool;

use crate::models::chapter::{Chapter, CreateChapter};

const COLUMNS: &str = "id, project_id, chapter_number, title, content, created_at, updated_at";

pub struct ChapterRepo;

impl ChapterRepo {
    /// Insert a new chapter, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateChapter) -> Result<Chapter, sqlx::Error> {
        let query = format!(
            "INSERT INTO chapters (project_id, chapter_number, title, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Chapter>(&query)
            .bind(input.project_id)
            .bind(input.chapter_number)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a chapter by id, scoped to its project.
    pub async fn find_in_project(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Chapter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chapters WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Chapter>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's chapters in reading order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Chapter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chapters WHERE project_id = $1 ORDER BY chapter_number ASC"
        );
        sqlx::query_as::<_, Chapter>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
