//! World element model and DTOs.
//!
//! The row keeps `attributes` as raw JSON; [`WorldElement::typed_attributes`]
//! parses it against the row's category. Inserts and updates only accept
//! already-parsed [`WorldAttributes`].

use scribe_core::types::{DbId, Timestamp};
use scribe_core::world::{AttributesError, WorldAttributes, WorldCategory};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `world_elements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorldElement {
    pub id: DbId,
    pub project_id: DbId,
    pub parent_id: Option<DbId>,
    pub category: String,
    pub name: String,
    pub description: Option<String>,
    pub attributes: serde_json::Value,
    pub tags: Vec<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl WorldElement {
    pub fn category(&self) -> Result<WorldCategory, AttributesError> {
        self.category.parse()
    }

    /// Parse the stored attributes against the stored category.
    pub fn typed_attributes(&self) -> Result<WorldAttributes, AttributesError> {
        WorldAttributes::parse(self.category()?, self.attributes.clone())
    }
}

/// DTO for inserting a world element.
#[derive(Debug, Clone)]
pub struct CreateWorldElement {
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub attributes: WorldAttributes,
    pub tags: Vec<String>,
    pub created_by: Option<DbId>,
}

/// DTO for updating a world element. `attributes`, when present, replaces
/// the stored object wholesale.
#[derive(Debug, Clone, Default)]
pub struct UpdateWorldElement {
    pub name: Option<String>,
    pub description: Option<String>,
    pub attributes: Option<WorldAttributes>,
    pub tags: Option<Vec<String>>,
}
