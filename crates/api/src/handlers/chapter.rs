//! Handlers for chapters within a project.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scribe_core::error::CoreError;
use scribe_core::types::DbId;
use scribe_db::models::chapter::{Chapter, CreateChapter};
use scribe_db::repositories::ChapterRepo;
use scribe_db::DbPool;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::ProjectAccess;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects/{id}/chapters`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateChapterRequest {
    #[validate(range(min = 1))]
    pub chapter_number: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Load a chapter, returning 404 unless it belongs to `project_id`.
pub async fn ensure_chapter_in_project(
    pool: &DbPool,
    project_id: DbId,
    chapter_id: DbId,
) -> AppResult<Chapter> {
    ChapterRepo::find_in_project(pool, project_id, chapter_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Chapter", chapter_id)))
}

/// GET /api/v1/projects/{id}/chapters
pub async fn list_chapters(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Chapter>>>> {
    ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    let chapters = ChapterRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: chapters }))
}

/// POST /api/v1/projects/{id}/chapters
///
/// Owners, writers and editors only. 409 if the chapter number is taken.
pub async fn create_chapter(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<CreateChapterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Chapter>>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let access = ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    access.require_chapter_writer()?;

    let chapter = ChapterRepo::create(
        &state.pool,
        &CreateChapter {
            project_id,
            chapter_number: input.chapter_number,
            title: input.title,
            content: input.content,
        },
    )
    .await?;

    tracing::info!(
        project_id,
        chapter_id = chapter.id,
        chapter_number = chapter.chapter_number,
        "Chapter created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: chapter })))
}

/// GET /api/v1/projects/{id}/chapters/{chapter_id}
pub async fn get_chapter(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, chapter_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Chapter>>> {
    ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    let chapter = ensure_chapter_in_project(&state.pool, project_id, chapter_id).await?;
    Ok(Json(DataResponse { data: chapter }))
}
