//! Handlers for world-building elements (arcs, calendars, magic, research).
//!
//! All categories share the `world_elements` table. Attributes are parsed
//! into the category's typed schema before anything is written, and
//! cross-element references are checked against the same project.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use scribe_core::error::CoreError;
use scribe_core::types::DbId;
use scribe_core::world::{ResearchAttributes, WorldAttributes, WorldCategory};
use scribe_db::models::world_element::{CreateWorldElement, UpdateWorldElement, WorldElement};
use scribe_db::repositories::WorldElementRepo;
use scribe_db::DbPool;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::ProjectAccess;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
}

/// Request body for `POST /projects/{project_id}/world`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateWorldElementRequest {
    pub category: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub attributes: serde_json::Value,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for `PUT /projects/{project_id}/world/{id}`.
///
/// `category` may be repeated but not changed.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateWorldElementRequest {
    pub category: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub attributes: Option<serde_json::Value>,
    pub tags: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_category(raw: &str) -> AppResult<WorldCategory> {
    raw.parse::<WorldCategory>()
        .map_err(|e| AppError::Core(CoreError::from(e)))
}

fn parse_attributes(category: WorldCategory, raw: serde_json::Value) -> AppResult<WorldAttributes> {
    WorldAttributes::parse(category, raw).map_err(|e| AppError::Core(CoreError::from(e)))
}

async fn ensure_element_in_project(
    pool: &DbPool,
    project_id: DbId,
    id: DbId,
) -> AppResult<WorldElement> {
    WorldElementRepo::find_in_project(pool, project_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("WorldElement", id)))
}

/// Check that an attribute reference points at an element of the right kind
/// in the same project. Calendar events are also checked against the
/// referenced calendar system's months.
async fn check_reference(
    pool: &DbPool,
    project_id: DbId,
    self_id: Option<DbId>,
    attributes: &WorldAttributes,
) -> AppResult<()> {
    let Some(reference) = attributes.reference() else {
        return Ok(());
    };
    let target_id = reference.id();
    if Some(target_id) == self_id {
        return Err(AppError::BadRequest(
            "A world element cannot reference itself".into(),
        ));
    }

    let target = WorldElementRepo::find_in_project(pool, project_id, target_id)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Referenced {} {target_id} does not exist in this project",
                reference.describe()
            ))
        })?;
    let target_attributes = target.typed_attributes().map_err(|e| {
        AppError::InternalError(format!("Stored world element {target_id} is invalid: {e}"))
    })?;

    if !reference.accepts(&target_attributes) {
        return Err(AppError::BadRequest(format!(
            "World element {target_id} is not a {}",
            reference.describe()
        )));
    }

    if let (WorldAttributes::Calendar(event), WorldAttributes::CalendarSystem(system)) =
        (attributes, &target_attributes)
    {
        system
            .check_date(event.month, event.day)
            .map_err(AppError::BadRequest)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{project_id}/world?category=arcs
///
/// All elements of one category in the project, oldest first.
pub async fn list_elements(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(params): Query<CategoryParams>,
) -> AppResult<Json<DataResponse<Vec<WorldElement>>>> {
    let raw = params
        .category
        .ok_or_else(|| AppError::BadRequest("category query parameter is required".into()))?;
    let category = parse_category(&raw)?;

    ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    let elements = WorldElementRepo::list_by_category(&state.pool, project_id, category).await?;
    Ok(Json(DataResponse { data: elements }))
}

/// POST /api/v1/projects/{project_id}/world
pub async fn create_element(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<CreateWorldElementRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<WorldElement>>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let category = parse_category(&input.category)?;
    let attributes = parse_attributes(category, input.attributes)?;

    let access = ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    access.require_world_writer()?;
    check_reference(&state.pool, project_id, None, &attributes).await?;

    let element = WorldElementRepo::create(
        &state.pool,
        &CreateWorldElement {
            project_id,
            name: input.name,
            description: input.description,
            attributes,
            tags: input.tags,
            created_by: Some(auth.user_id),
        },
    )
    .await?;

    tracing::info!(
        project_id,
        element_id = element.id,
        category = %category,
        user_id = auth.user_id,
        "World element created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: element })))
}

/// GET /api/v1/projects/{project_id}/world/{id}
pub async fn get_element(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<WorldElement>>> {
    ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    let element = ensure_element_in_project(&state.pool, project_id, id).await?;
    Ok(Json(DataResponse { data: element }))
}

/// PUT /api/v1/projects/{project_id}/world/{id}
///
/// Last write wins. `attributes`, when present, replaces the stored object
/// and must validate against the element's existing category.
pub async fn update_element(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateWorldElementRequest>,
) -> AppResult<Json<DataResponse<WorldElement>>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let access = ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    access.require_world_writer()?;

    let existing = ensure_element_in_project(&state.pool, project_id, id).await?;
    let category = existing.category().map_err(|e| {
        AppError::InternalError(format!("Stored world element {id} is invalid: {e}"))
    })?;

    if let Some(raw) = input.category.as_deref() {
        if parse_category(raw)? != category {
            return Err(AppError::BadRequest(
                "The category of a world element cannot be changed".into(),
            ));
        }
    }

    let attributes = match input.attributes {
        Some(raw) => {
            let attributes = parse_attributes(category, raw)?;
            check_reference(&state.pool, project_id, Some(id), &attributes).await?;
            let is_research_file = matches!(
                attributes,
                WorldAttributes::Research(ResearchAttributes::File(_))
            );
            if category == WorldCategory::Research
                && !is_research_file
                && !WorldElementRepo::list_children(&state.pool, id).await?.is_empty()
            {
                return Err(AppError::Core(CoreError::Conflict(
                    "A research file with content cannot change its research type".into(),
                )));
            }
            Some(attributes)
        }
        None => None,
    };

    let element = WorldElementRepo::update(
        &state.pool,
        id,
        &UpdateWorldElement {
            name: input.name,
            description: input.description,
            attributes,
            tags: input.tags,
        },
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("WorldElement", id)))?;

    tracing::info!(project_id, element_id = id, user_id = auth.user_id, "World element updated");

    Ok(Json(DataResponse { data: element }))
}

/// DELETE /api/v1/projects/{project_id}/world/{id}
///
/// Deleting a research file also deletes its research content.
pub async fn delete_element(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let access = ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    access.require_world_writer()?;

    ensure_element_in_project(&state.pool, project_id, id).await?;
    WorldElementRepo::delete(&state.pool, id).await?;

    tracing::info!(project_id, element_id = id, user_id = auth.user_id, "World element deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/projects/{project_id}/world/{id}/children
///
/// Research content entries belonging to a research file.
pub async fn list_children(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Vec<WorldElement>>>> {
    ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    ensure_element_in_project(&state.pool, project_id, id).await?;
    let children = WorldElementRepo::list_children(&state.pool, id).await?;
    Ok(Json(DataResponse { data: children }))
}
