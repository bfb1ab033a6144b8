//! Repository for the `project_collaborators` table.

use scribe_core::types::DbId;
use sqlx::PgPool;

use crate::models::collaborator::{CreateCollaborator, ProjectCollaborator};

const COLUMNS: &str =
    "id, project_id, user_id, role, secondary_roles, status, created_at, updated_at";

/// Provides membership lookups for the authorization checks.
pub struct CollaboratorRepo;

impl CollaboratorRepo {
    /// Add a collaborator, or overwrite role and status if the user is
    /// already on the project.
    pub async fn upsert(
        pool: &PgPool,
        input: &CreateCollaborator,
    ) -> Result<ProjectCollaborator, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_collaborators (project_id, user_id, role, secondary_roles, status)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_project_collaborators_project_user DO UPDATE SET
                role = EXCLUDED.role,
                secondary_roles = EXCLUDED.secondary_roles,
                status = EXCLUDED.status
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectCollaborator>(&query)
            .bind(input.project_id)
            .bind(input.user_id)
            .bind(&input.role)
            .bind(&input.secondary_roles)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find the user's membership row on a project regardless of status.
    pub async fn find_membership(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<ProjectCollaborator>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_collaborators
             WHERE project_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, ProjectCollaborator>(&query)
            .bind(project_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all collaborators on a project, oldest membership first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectCollaborator>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_collaborators
             WHERE project_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ProjectCollaborator>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
