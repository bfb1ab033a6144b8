//! Per-project authorization.
//!
//! Roles live on `project_collaborators`, not on the user, so access is
//! resolved per request once the project id is known from the path.

use scribe_core::error::CoreError;
use scribe_core::types::DbId;
use scribe_db::models::collaborator::ProjectCollaborator;
use scribe_db::models::project::Project;
use scribe_db::repositories::{CollaboratorRepo, ProjectRepo};
use scribe_db::DbPool;

use crate::error::{AppError, AppResult};

/// A project together with the caller's active membership on it.
#[derive(Debug, Clone)]
pub struct ProjectAccess {
    pub project: Project,
    pub membership: ProjectCollaborator,
}

impl ProjectAccess {
    /// Load the project and the caller's membership.
    ///
    /// 404 if the project does not exist, 403 if the caller has no
    /// `active` collaborator row.
    pub async fn load(pool: &DbPool, project_id: DbId, user_id: DbId) -> AppResult<Self> {
        let project = ProjectRepo::find_by_id(pool, project_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::not_found("Project", project_id)))?;

        let membership = CollaboratorRepo::find_membership(pool, project_id, user_id)
            .await?
            .filter(ProjectCollaborator::is_active)
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden(
                    "You are not a collaborator on this project".into(),
                ))
            })?;

        Ok(Self {
            project,
            membership,
        })
    }

    pub fn is_owner(&self) -> bool {
        self.project.owner_id == self.membership.user_id
    }

    pub fn require_owner(&self) -> AppResult<()> {
        if self.is_owner() {
            Ok(())
        } else {
            Err(forbidden("Only the project owner can perform this action"))
        }
    }

    pub fn require_editor(&self) -> AppResult<()> {
        if self.membership.is_editor() {
            Ok(())
        } else {
            Err(forbidden("Only editors can submit changes for approval"))
        }
    }

    pub fn require_chapter_writer(&self) -> AppResult<()> {
        if self.membership.can_write_chapters() {
            Ok(())
        } else {
            Err(forbidden("Your role cannot edit chapters on this project"))
        }
    }

    pub fn require_world_writer(&self) -> AppResult<()> {
        if self.membership.can_write_world() {
            Ok(())
        } else {
            Err(forbidden("Viewers cannot modify world-building data"))
        }
    }
}

fn forbidden(msg: &str) -> AppError {
    AppError::Core(CoreError::Forbidden(msg.into()))
}
