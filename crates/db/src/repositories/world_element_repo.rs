//! Repository for the `world_elements` table.
//!
//! Attributes are written from parsed [`scribe_core::world::WorldAttributes`]
//! only. `parent_id` is derived from the attributes on every write so the
//! foreign key and `attributes.research_file_id` cannot drift apart.

use scribe_core::types::DbId;
use scribe_core::world::WorldCategory;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::world_element::{CreateWorldElement, UpdateWorldElement, WorldElement};

const COLUMNS: &str = "id, project_id, parent_id, category, name, description, attributes, \
    tags, created_by, created_at, updated_at";

/// Provides CRUD operations for world elements.
pub struct WorldElementRepo;

impl WorldElementRepo {
    /// Insert a new element, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWorldElement,
    ) -> Result<WorldElement, sqlx::Error> {
        let query = format!(
            "INSERT INTO world_elements
                (project_id, parent_id, category, name, description, attributes, tags, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorldElement>(&query)
            .bind(input.project_id)
            .bind(input.attributes.parent_id())
            .bind(input.attributes.category().as_str())
            .bind(&input.name)
            .bind(&input.description)
            .bind(Json(&input.attributes))
            .bind(&input.tags)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorldElement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM world_elements WHERE id = $1");
        sqlx::query_as::<_, WorldElement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an element by id, scoped to its project.
    pub async fn find_in_project(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<WorldElement>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM world_elements WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, WorldElement>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List all elements of one category in a project, oldest first.
    pub async fn list_by_category(
        pool: &PgPool,
        project_id: DbId,
        category: WorldCategory,
    ) -> Result<Vec<WorldElement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM world_elements
             WHERE project_id = $1 AND category = $2
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, WorldElement>(&query)
            .bind(project_id)
            .bind(category.as_str())
            .fetch_all(pool)
            .await
    }

    /// List the direct children of an element (research content of a file).
    pub async fn list_children(
        pool: &PgPool,
        parent_id: DbId,
    ) -> Result<Vec<WorldElement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM world_elements
             WHERE parent_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, WorldElement>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// Update an element. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWorldElement,
    ) -> Result<Option<WorldElement>, sqlx::Error> {
        let query = format!(
            "UPDATE world_elements SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                attributes = COALESCE($4, attributes),
                parent_id = CASE WHEN $4 IS NULL THEN parent_id ELSE $5 END,
                tags = COALESCE($6, tags)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorldElement>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.attributes.as_ref().map(Json))
            .bind(input.attributes.as_ref().and_then(|a| a.parent_id()))
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Delete an element. Children referencing it through `parent_id` are
    /// removed by the cascading foreign key in the same statement.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM world_elements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
