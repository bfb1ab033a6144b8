//! Pending editor change models and DTOs.

use scribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pending_editor_changes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingEditorChange {
    pub id: DbId,
    pub project_id: DbId,
    pub chapter_id: Option<DbId>,
    pub editor_id: DbId,
    pub content_type: String,
    pub original_content: String,
    pub proposed_content: String,
    pub change_description: Option<String>,
    pub editor_notes: Option<String>,
    pub content_title: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `pending_editor_changes_view`: the change plus project title,
/// editor profile and the recorded decisions as a JSON array.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingEditorChangeView {
    pub id: DbId,
    pub project_id: DbId,
    pub project_title: String,
    pub chapter_id: Option<DbId>,
    pub editor_id: DbId,
    pub editor_username: String,
    pub editor_display_name: Option<String>,
    pub content_type: String,
    pub original_content: String,
    pub proposed_content: String,
    pub change_description: Option<String>,
    pub editor_notes: Option<String>,
    pub content_title: Option<String>,
    pub status: String,
    pub decisions: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Named parameters for `submit_editor_change_for_approval`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitEditorChange {
    pub project_id: DbId,
    pub editor_id: DbId,
    pub chapter_id: Option<DbId>,
    pub content_type: String,
    pub original_content: String,
    pub proposed_content: String,
    pub change_description: Option<String>,
    pub editor_notes: Option<String>,
    pub content_title: Option<String>,
}

/// Named parameters for `review_editor_change`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewEditorChange {
    pub change_id: DbId,
    pub reviewer_id: DbId,
    pub decision: String,
    pub notes: Option<String>,
}
