//! Project collaborator model and DTOs.

use scribe_core::roles::{self, STATUS_ACTIVE};
use scribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `project_collaborators` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectCollaborator {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub secondary_roles: Vec<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProjectCollaborator {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }

    pub fn is_editor(&self) -> bool {
        roles::is_editor(&self.role, &self.secondary_roles)
    }

    pub fn can_write_chapters(&self) -> bool {
        roles::can_write_chapters(&self.role, &self.secondary_roles)
    }

    pub fn can_write_world(&self) -> bool {
        roles::can_write_world(&self.role, &self.secondary_roles)
    }
}

/// DTO for adding (or re-activating) a collaborator on a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCollaborator {
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub secondary_roles: Vec<String>,
    pub status: String,
}
