//! Repository for pending editor changes.
//!
//! State transitions go through the `submit_editor_change_for_approval` and
//! `review_editor_change` stored procedures; this repository never writes
//! `status` directly.

use scribe_core::types::DbId;
use sqlx::PgPool;

use crate::models::editor_change::{
    PendingEditorChange, PendingEditorChangeView, ReviewEditorChange, SubmitEditorChange,
};

const COLUMNS: &str = "id, project_id, chapter_id, editor_id, content_type, original_content, \
    proposed_content, change_description, editor_notes, content_title, status, \
    created_at, updated_at";

const VIEW_COLUMNS: &str = "id, project_id, project_title, chapter_id, editor_id, \
    editor_username, editor_display_name, content_type, original_content, proposed_content, \
    change_description, editor_notes, content_title, status, decisions, created_at, updated_at";

pub struct EditorChangeRepo;

impl EditorChangeRepo {
    /// Call `submit_editor_change_for_approval`, returning the new change id.
    pub async fn submit(pool: &PgPool, input: &SubmitEditorChange) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT submit_editor_change_for_approval(
                p_project_id => $1,
                p_editor_id => $2,
                p_chapter_id => $3,
                p_content_type => $4,
                p_original_content => $5,
                p_proposed_content => $6,
                p_change_description => $7,
                p_editor_notes => $8,
                p_content_title => $9
             )",
        )
        .bind(input.project_id)
        .bind(input.editor_id)
        .bind(input.chapter_id)
        .bind(&input.content_type)
        .bind(&input.original_content)
        .bind(&input.proposed_content)
        .bind(&input.change_description)
        .bind(&input.editor_notes)
        .bind(&input.content_title)
        .fetch_one(pool)
        .await
    }

    /// Call `review_editor_change`, returning the recorded decision.
    pub async fn review(pool: &PgPool, input: &ReviewEditorChange) -> Result<String, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT review_editor_change(
                p_change_id => $1,
                p_reviewer_id => $2,
                p_decision => $3,
                p_notes => $4
             )",
        )
        .bind(input.change_id)
        .bind(input.reviewer_id)
        .bind(&input.decision)
        .bind(&input.notes)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PendingEditorChange>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pending_editor_changes WHERE id = $1");
        sqlx::query_as::<_, PendingEditorChange>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All changes one editor proposed on a project, newest first.
    ///
    /// Unpaginated: the full history is returned.
    pub async fn list_for_editor(
        pool: &PgPool,
        project_id: DbId,
        editor_id: DbId,
    ) -> Result<Vec<PendingEditorChangeView>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM pending_editor_changes_view
             WHERE project_id = $1 AND editor_id = $2
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, PendingEditorChangeView>(&query)
            .bind(project_id)
            .bind(editor_id)
            .fetch_all(pool)
            .await
    }
}
