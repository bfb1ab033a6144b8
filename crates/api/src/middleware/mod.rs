//! Authentication and authorization helpers.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`project_access::ProjectAccess`] -- Resolves the caller's membership on a project.

pub mod auth;
pub mod project_access;
