//! Handlers for a reader's progress through a chapter.

use axum::extract::{Path, State};
use axum::Json;
use scribe_core::reading_progress::{should_persist, validate_progress};
use scribe_core::types::DbId;
use scribe_db::models::reading_progress::{ReadingProgress, UpsertReadingProgress};
use scribe_db::repositories::ReadingProgressRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::chapter::ensure_chapter_in_project;
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::ProjectAccess;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT .../progress`.
#[derive(Debug, Deserialize)]
pub struct SaveProgressRequest {
    pub progress_percent: f64,
    pub last_position: Option<i32>,
}

/// Result of a save. `saved` is `false` when the change was below the
/// persistence step; `progress` is then the previously stored row.
#[derive(Debug, Serialize)]
pub struct SaveProgressResponse {
    pub saved: bool,
    pub progress: Option<ReadingProgress>,
}

/// GET /api/v1/projects/{id}/chapters/{chapter_id}/progress
///
/// `data` is `null` if the caller has never opened the chapter.
pub async fn get_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, chapter_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Option<ReadingProgress>>>> {
    ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    ensure_chapter_in_project(&state.pool, project_id, chapter_id).await?;

    let progress = ReadingProgressRepo::find(&state.pool, auth.user_id, chapter_id).await?;
    Ok(Json(DataResponse { data: progress }))
}

/// PUT /api/v1/projects/{id}/chapters/{chapter_id}/progress
///
/// Throttled: small movements are acknowledged but not written.
pub async fn save_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, chapter_id)): Path<(DbId, DbId)>,
    AppJson(input): AppJson<SaveProgressRequest>,
) -> AppResult<Json<DataResponse<SaveProgressResponse>>> {
    validate_progress(input.progress_percent).map_err(AppError::BadRequest)?;

    ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    ensure_chapter_in_project(&state.pool, project_id, chapter_id).await?;

    let stored = ReadingProgressRepo::find(&state.pool, auth.user_id, chapter_id).await?;
    if !should_persist(
        stored.as_ref().map(|p| p.progress_percent),
        input.progress_percent,
    ) {
        return Ok(Json(DataResponse {
            data: SaveProgressResponse {
                saved: false,
                progress: stored,
            },
        }));
    }

    let progress = ReadingProgressRepo::upsert(
        &state.pool,
        &UpsertReadingProgress {
            user_id: auth.user_id,
            chapter_id,
            progress_percent: input.progress_percent,
            last_position: input.last_position,
        },
    )
    .await?;

    tracing::debug!(
        user_id = auth.user_id,
        chapter_id,
        progress_percent = progress.progress_percent,
        "Reading progress saved"
    );

    Ok(Json(DataResponse {
        data: SaveProgressResponse {
            saved: true,
            progress: Some(progress),
        },
    }))
}
