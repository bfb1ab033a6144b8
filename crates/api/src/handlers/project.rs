//! Handlers for projects and their collaborators.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scribe_core::error::CoreError;
use scribe_core::roles::{validate_collaborator_role, ROLE_OWNER, STATUS_ACTIVE};
use scribe_core::types::DbId;
use scribe_db::models::activity::CreateActivity;
use scribe_db::models::collaborator::{CreateCollaborator, ProjectCollaborator};
use scribe_db::models::project::{CreateProject, Project};
use scribe_db::repositories::{CollaboratorRepo, ProjectRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::activity;
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::ProjectAccess;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
}

/// Request body for `POST /projects/{id}/collaborators`.
#[derive(Debug, Deserialize)]
pub struct AddCollaboratorRequest {
    pub user_id: DbId,
    pub role: String,
    #[serde(default)]
    pub secondary_roles: Vec<String>,
}

/// POST /api/v1/projects
///
/// The caller becomes the owner and first active collaborator.
pub async fn create_project(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            title: input.title,
            description: input.description,
            owner_id: auth.user_id,
        },
    )
    .await?;

    tracing::info!(project_id = project.id, user_id = auth.user_id, "Project created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects
///
/// Projects on which the caller is an active collaborator.
pub async fn list_projects(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let access = ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: access.project,
    }))
}

/// GET /api/v1/projects/{id}/collaborators
pub async fn list_collaborators(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProjectCollaborator>>>> {
    ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    let collaborators = CollaboratorRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse {
        data: collaborators,
    }))
}

/// POST /api/v1/projects/{id}/collaborators
///
/// Add a user to the project, or change an existing member's roles.
/// Owner only. The `owner` role cannot be granted this way.
pub async fn add_collaborator(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<AddCollaboratorRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectCollaborator>>)> {
    let access = ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    access.require_owner()?;

    for role in std::iter::once(&input.role).chain(&input.secondary_roles) {
        validate_collaborator_role(role).map_err(AppError::BadRequest)?;
        if role == ROLE_OWNER {
            return Err(AppError::BadRequest(
                "The owner role cannot be assigned to a collaborator".into(),
            ));
        }
    }
    if input.user_id == access.project.owner_id {
        return Err(AppError::Core(CoreError::Conflict(
            "The project owner's membership cannot be changed".into(),
        )));
    }

    UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", input.user_id)))?;

    let collaborator = CollaboratorRepo::upsert(
        &state.pool,
        &CreateCollaborator {
            project_id,
            user_id: input.user_id,
            role: input.role,
            secondary_roles: input.secondary_roles,
            status: STATUS_ACTIVE.to_string(),
        },
    )
    .await?;

    tracing::info!(
        project_id,
        user_id = collaborator.user_id,
        role = %collaborator.role,
        "Collaborator added"
    );

    activity::record(
        &state.pool,
        CreateActivity {
            project_id,
            user_id: Some(auth.user_id),
            action: "collaborator_added".to_string(),
            entity_type: Some("user".to_string()),
            entity_id: Some(collaborator.user_id),
            details: Some(serde_json::json!({ "role": collaborator.role })),
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: collaborator })))
}
