//! Editor change approval constants and validation.
//!
//! The status lifecycle (`pending_approval -> approved | rejected | superseded`)
//! is owned by the `submit_editor_change_for_approval` and
//! `review_editor_change` stored procedures. This module only holds the
//! names the application needs to agree on with them, plus the request-level
//! checks that run before the procedures are invoked.

use crate::error::CoreError;

pub const STATUS_PENDING_APPROVAL: &str = "pending_approval";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";
pub const STATUS_SUPERSEDED: &str = "superseded";

/// Content type used when the request omits `contentType`.
pub const DEFAULT_CONTENT_TYPE: &str = "chapter";

/// Decisions an owner may record through `review_editor_change`.
pub const VALID_DECISIONS: &[&str] = &[STATUS_APPROVED, STATUS_REJECTED];

pub const MSG_ORIGINAL_CONTENT_REQUIRED: &str = "Original content is required";
pub const MSG_PROPOSED_CONTENT_REQUIRED: &str = "Proposed content is required";

/// Message returned alongside a new pending change id.
pub const MSG_SUBMITTED: &str = "Change submitted for owner approval";

/// Activity log action names.
pub const ACTIVITY_SUBMITTED: &str = "editor_change_submitted";
pub const ACTIVITY_REVIEWED: &str = "editor_change_reviewed";

/// Check that both content fields are present.
///
/// An empty string counts as present; only a missing (or `null`) field is
/// rejected. `original` is checked first.
pub fn require_content(original: Option<&str>, proposed: Option<&str>) -> Result<(), CoreError> {
    if original.is_none() {
        return Err(CoreError::Validation(MSG_ORIGINAL_CONTENT_REQUIRED.into()));
    }
    if proposed.is_none() {
        return Err(CoreError::Validation(MSG_PROPOSED_CONTENT_REQUIRED.into()));
    }
    Ok(())
}

/// Validate that a review decision is one of [`VALID_DECISIONS`].
pub fn validate_decision(decision: &str) -> Result<(), String> {
    if VALID_DECISIONS.contains(&decision) {
        Ok(())
    } else {
        Err(format!(
            "Invalid decision '{decision}'. Must be one of: {}",
            VALID_DECISIONS.join(", ")
        ))
    }
}
