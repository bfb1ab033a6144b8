//! Repository for the `projects` table.

use scribe_core::roles::{ROLE_OWNER, STATUS_ACTIVE};
use scribe_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, owner_id, created_at, updated_at";

/// Provides create and read operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project and register its owner as an active `owner`
    /// collaborator, in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (title, description, owner_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.owner_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO project_collaborators (project_id, user_id, role, status)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(project.id)
        .bind(input.owner_id)
        .bind(ROLE_OWNER)
        .bind(STATUS_ACTIVE)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(project)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects where the user is an active collaborator, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            "SELECT p.id, p.title, p.description, p.owner_id, p.created_at, p.updated_at
             FROM projects p
             JOIN project_collaborators pc ON pc.project_id = p.id
             WHERE pc.user_id = $1 AND pc.status = $2
             ORDER BY p.created_at DESC, p.id DESC",
        )
        .bind(user_id)
        .bind(STATUS_ACTIVE)
        .fetch_all(pool)
        .await
    }
}
