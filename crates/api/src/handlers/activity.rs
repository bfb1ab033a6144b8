//! Project activity feed: best-effort writes and the owner-facing listing.

use axum::extract::{Path, Query, State};
use axum::Json;
use scribe_core::types::DbId;
use scribe_db::models::activity::{CreateActivity, ProjectActivity};
use scribe_db::repositories::ActivityRepo;
use scribe_db::DbPool;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::ProjectAccess;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// Append an activity row. Failures are logged and swallowed so the
/// caller's primary operation is never affected.
pub async fn record(pool: &DbPool, input: CreateActivity) {
    if let Err(e) = ActivityRepo::create(pool, &input).await {
        tracing::warn!(
            error = %e,
            project_id = input.project_id,
            action = %input.action,
            "Failed to record project activity"
        );
    }
}

#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    pub limit: Option<i64>,
}

/// GET /api/v1/projects/{id}/activity
///
/// Most recent activity on the project. Any active collaborator may read it.
pub async fn list_activity(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(params): Query<ActivityParams>,
) -> AppResult<Json<DataResponse<Vec<ProjectActivity>>>> {
    ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let entries = ActivityRepo::list_for_project(&state.pool, project_id, limit).await?;
    Ok(Json(DataResponse { data: entries }))
}
