//! Project collaborator roles and membership status.
//!
//! These must match the check constraints in
//! `20261001000003_create_project_collaborators_table.sql`.
//!
//! A collaborator carries one primary `role` plus an optional list of
//! `secondary_roles`. Every permission check in this module considers both.

pub const ROLE_OWNER: &str = "owner";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_WRITER: &str = "writer";
pub const ROLE_BETA_READER: &str = "beta_reader";
pub const ROLE_VIEWER: &str = "viewer";

/// All roles a collaborator row may carry.
pub const VALID_COLLABORATOR_ROLES: &[&str] = &[
    ROLE_OWNER,
    ROLE_EDITOR,
    ROLE_WRITER,
    ROLE_BETA_READER,
    ROLE_VIEWER,
];

/// Membership status values for `project_collaborators.status`.
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INVITED: &str = "invited";
pub const STATUS_REMOVED: &str = "removed";

/// Validate that a role name is one of [`VALID_COLLABORATOR_ROLES`].
pub fn validate_collaborator_role(role: &str) -> Result<(), String> {
    if VALID_COLLABORATOR_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_COLLABORATOR_ROLES.join(", ")
        ))
    }
}

/// Returns `true` if `role` is either the primary role or one of the secondaries.
pub fn has_role(primary: &str, secondary: &[String], role: &str) -> bool {
    primary == role || secondary.iter().any(|r| r == role)
}

/// Editors may submit proposed changes for owner approval.
pub fn is_editor(primary: &str, secondary: &[String]) -> bool {
    has_role(primary, secondary, ROLE_EDITOR)
}

/// Owners, writers and editors may create and edit chapters.
pub fn can_write_chapters(primary: &str, secondary: &[String]) -> bool {
    [ROLE_OWNER, ROLE_WRITER, ROLE_EDITOR]
        .iter()
        .any(|role| has_role(primary, secondary, role))
}

/// Any role other than a bare `viewer` may write world-building data.
pub fn can_write_world(primary: &str, secondary: &[String]) -> bool {
    primary != ROLE_VIEWER || secondary.iter().any(|r| r != ROLE_VIEWER)
}
