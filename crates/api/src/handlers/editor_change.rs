//! Handlers for the editor change approval workflow.
//!
//! Editors propose chapter edits; the project owner approves or rejects them.
//! Status transitions happen inside the `submit_editor_change_for_approval`
//! and `review_editor_change` stored procedures.
//!
//! The submit and list endpoints keep the camelCase wire format the editor
//! client already speaks.

use axum::extract::{Path, State};
use axum::Json;
use scribe_core::editor_change::{
    require_content, validate_decision, ACTIVITY_REVIEWED, ACTIVITY_SUBMITTED,
    DEFAULT_CONTENT_TYPE, MSG_SUBMITTED, STATUS_PENDING_APPROVAL,
};
use scribe_core::error::CoreError;
use scribe_core::types::DbId;
use scribe_db::models::activity::CreateActivity;
use scribe_db::models::editor_change::{
    PendingEditorChange, PendingEditorChangeView, ReviewEditorChange, SubmitEditorChange,
};
use scribe_db::repositories::EditorChangeRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::activity;
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::ProjectAccess;
use crate::response::DataResponse;
use crate::state::AppState;

const MSG_SUBMIT_FAILED: &str = "Failed to submit change for approval";
const MSG_LIST_FAILED: &str = "Failed to load pending changes";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /projects/{id}/editor-changes`.
///
/// Every field is optional at the serde level so that a missing content
/// field produces the dedicated 400 message instead of a generic
/// deserialization rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitChangeRequest {
    pub chapter_id: Option<DbId>,
    pub content_type: Option<String>,
    pub original_content: Option<String>,
    pub proposed_content: Option<String>,
    pub change_description: Option<String>,
    pub editor_notes: Option<String>,
    pub content_title: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitChangeResponse {
    pub success: bool,
    pub pending_change_id: DbId,
    pub message: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingChangesResponse {
    pub success: bool,
    pub pending_changes: Vec<PendingEditorChangeView>,
}

/// Request body for `POST /projects/{id}/editor-changes/{change_id}/review`.
#[derive(Debug, Deserialize)]
pub struct ReviewChangeRequest {
    pub decision: String,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{id}/editor-changes
///
/// Submit a proposed edit for owner approval. Order of checks:
/// 1. both content fields present (400)
/// 2. valid session (401)
/// 3. project exists (404)
/// 4. caller is an active collaborator (403)
/// 5. caller holds the `editor` role, primary or secondary (403)
pub async fn submit_change(
    auth: Result<AuthUser, AppError>,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<SubmitChangeRequest>,
) -> AppResult<Json<SubmitChangeResponse>> {
    require_content(
        input.original_content.as_deref(),
        input.proposed_content.as_deref(),
    )?;
    let auth = auth?;

    let access = ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    access.require_editor()?;

    let submit = SubmitEditorChange {
        project_id,
        editor_id: auth.user_id,
        chapter_id: input.chapter_id,
        content_type: input
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        original_content: input.original_content.unwrap_or_default(),
        proposed_content: input.proposed_content.unwrap_or_default(),
        change_description: input.change_description,
        editor_notes: input.editor_notes,
        content_title: input.content_title,
    };

    let change_id = EditorChangeRepo::submit(&state.pool, &submit)
        .await
        .map_err(|e| AppError::downstream(MSG_SUBMIT_FAILED, e))?;

    tracing::info!(
        project_id,
        user_id = auth.user_id,
        change_id,
        chapter_id = ?submit.chapter_id,
        content_type = %submit.content_type,
        "Editor change submitted"
    );

    activity::record(
        &state.pool,
        CreateActivity {
            project_id,
            user_id: Some(auth.user_id),
            action: ACTIVITY_SUBMITTED.to_string(),
            entity_type: Some("editor_change".to_string()),
            entity_id: Some(change_id),
            details: Some(serde_json::json!({
                "chapter_id": submit.chapter_id,
                "content_type": submit.content_type,
                "content_title": submit.content_title,
            })),
        },
    )
    .await;

    Ok(Json(SubmitChangeResponse {
        success: true,
        pending_change_id: change_id,
        message: MSG_SUBMITTED,
        status: STATUS_PENDING_APPROVAL,
    }))
}

/// GET /api/v1/projects/{id}/editor-changes
///
/// The caller's own proposals on this project, newest first, with project
/// title, editor profile and recorded decisions joined in.
pub async fn list_changes(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<PendingChangesResponse>> {
    let pending_changes = EditorChangeRepo::list_for_editor(&state.pool, project_id, auth.user_id)
        .await
        .map_err(|e| AppError::downstream(MSG_LIST_FAILED, e))?;

    Ok(Json(PendingChangesResponse {
        success: true,
        pending_changes,
    }))
}

/// POST /api/v1/projects/{id}/editor-changes/{change_id}/review
///
/// Approve or reject a pending change. Owner only. An approved `chapter`
/// change overwrites the chapter's content. 409 if the change is no longer
/// pending.
pub async fn review_change(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, change_id)): Path<(DbId, DbId)>,
    AppJson(input): AppJson<ReviewChangeRequest>,
) -> AppResult<Json<DataResponse<PendingEditorChange>>> {
    validate_decision(&input.decision).map_err(AppError::BadRequest)?;

    let access = ProjectAccess::load(&state.pool, project_id, auth.user_id).await?;
    access.require_owner()?;

    let not_found = || AppError::Core(CoreError::not_found("EditorChange", change_id));
    EditorChangeRepo::find_by_id(&state.pool, change_id)
        .await?
        .filter(|change| change.project_id == project_id)
        .ok_or_else(not_found)?;

    EditorChangeRepo::review(
        &state.pool,
        &ReviewEditorChange {
            change_id,
            reviewer_id: auth.user_id,
            decision: input.decision.clone(),
            notes: input.notes.clone(),
        },
    )
    .await?;

    let change = EditorChangeRepo::find_by_id(&state.pool, change_id)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(
        project_id,
        change_id,
        reviewer_id = auth.user_id,
        decision = %input.decision,
        "Editor change reviewed"
    );

    activity::record(
        &state.pool,
        CreateActivity {
            project_id,
            user_id: Some(auth.user_id),
            action: ACTIVITY_REVIEWED.to_string(),
            entity_type: Some("editor_change".to_string()),
            entity_id: Some(change_id),
            details: Some(serde_json::json!({
                "decision": input.decision,
                "editor_id": change.editor_id,
            })),
        },
    )
    .await;

    Ok(Json(DataResponse { data: change }))
}
