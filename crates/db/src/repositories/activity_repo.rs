//! Repository for the `project_activity` table.

use scribe_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{CreateActivity, ProjectActivity};

const COLUMNS: &str =
    "id, project_id, user_id, action, entity_type, entity_id, details, created_at";

pub struct ActivityRepo;

impl ActivityRepo {
    /// Append an activity entry.
    pub async fn create(
        pool: &PgPool,
        input: &CreateActivity,
    ) -> Result<ProjectActivity, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_activity
                (project_id, user_id, action, entity_type, entity_id, details)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectActivity>(&query)
            .bind(input.project_id)
            .bind(input.user_id)
            .bind(&input.action)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// List a project's activity, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
    ) -> Result<Vec<ProjectActivity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_activity
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ProjectActivity>(&query)
            .bind(project_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
